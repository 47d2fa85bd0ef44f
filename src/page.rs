//! Static page rendering.
//!
//! A rendered page is one container holding a (hidden) loading screen and
//! the main content: the controls panel followed by the scale table. Every
//! id inside is prefixed with the container id so several pages can be
//! pasted into one document.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use calculators::Page;
use calculators::pages::PAGES;
use controls::presets::{IMSHOW_FIELDS, IMSHOW_LABELS, core_wave_configs, imshow_selection_config, overlay_toggle_config, prefixed};
use controls::tree::NodeId;
use controls::{CoordinateMode, MemoryTree, Overrides, PanelBuilder, PhysicalScaleConfig, ScaleTable, TreeError, UiTree};

use crate::CliError;

/// Name of the gravity-wave model controls page.
pub const GRAVITY_WAVES: &str = "gravity-waves";

/// Something `render` knows how to lay out.
#[derive(Debug, Clone, Copy)]
pub enum PageKind {
    /// Log-scale sliders driving a scale table.
    Calculator(&'static Page),
    /// Coordinate toggle, the core wave sliders and the display toggles.
    GravityWaves,
}

impl PageKind {
    /// # Errors
    ///
    /// Returns [`CliError::UnknownPage`] for names that are not listed.
    pub fn resolve(name: &str) -> Result<Self, CliError> {
        if name == GRAVITY_WAVES {
            return Ok(Self::GravityWaves);
        }
        calculators::by_name(name)
            .map(Self::Calculator)
            .ok_or_else(|| CliError::UnknownPage(name.to_owned()))
    }

    /// `(name, title)` for every page.
    #[must_use]
    pub fn listing() -> Vec<(&'static str, &'static str)> {
        PAGES
            .iter()
            .map(|page| (page.name, page.title))
            .chain(std::iter::once((GRAVITY_WAVES, "Gravity-wave model controls")))
            .collect()
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Calculator(page) => page.name,
            Self::GravityWaves => GRAVITY_WAVES,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub container_id: String,
    pub starting: CoordinateMode,
    pub config: PhysicalScaleConfig,
    pub overrides: Overrides,
}

/// Skeleton nodes of one page.
pub struct Layout {
    pub container: NodeId,
    pub controls_id: String,
    pub scales: NodeId,
}

/// Build the page skeleton under the tree root.
///
/// # Errors
///
/// Propagates tree errors.
pub fn layout(tree: &mut MemoryTree, container_id: &str) -> Result<Layout, TreeError> {
    let root = tree.root();
    let container = element(tree, &root, "div", container_id)?;

    let loading = element(tree, &container, "div", &prefixed(container_id, "loading-screen"))?;
    tree.set_attribute(&loading, "style", "display: none")?;
    let spinner = tree.create_element("div")?;
    tree.add_class(&spinner, "spinner")?;
    tree.append_child(&loading, &spinner)?;
    let message = tree.create_element("p")?;
    tree.set_text(&message, "Loading...")?;
    tree.append_child(&loading, &message)?;

    let main = element(tree, &container, "div", &prefixed(container_id, "main-content"))?;
    tree.set_attribute(&main, "style", "display: block")?;
    let controls_id = prefixed(container_id, "controls");
    element(tree, &main, "div", &controls_id)?;
    let scales = element(tree, &main, "div", &prefixed(container_id, "scales"))?;

    Ok(Layout { container, controls_id, scales })
}

fn element(tree: &mut MemoryTree, parent: &NodeId, tag: &str, id: &str) -> Result<NodeId, TreeError> {
    let node = tree.create_element(tag)?;
    tree.set_attribute(&node, "id", id)?;
    tree.append_child(parent, &node)?;
    Ok(node)
}

/// Render `kind` and return the container's markup.
///
/// # Errors
///
/// Returns configuration, shape and tree errors from the builders.
pub fn render(kind: &PageKind, options: &RenderOptions) -> Result<String, CliError> {
    let mut tree = MemoryTree::new();
    let layout = layout(&mut tree, &options.container_id)?;
    let prefix = options.container_id.as_str();
    let builder = PanelBuilder::new(&layout.controls_id)
        .config(options.config)
        .overrides(options.overrides.clone())
        .starting_coordinates(options.starting);

    match kind {
        PageKind::Calculator(page) => {
            let panel = builder.controls(page.descriptors(prefix)).build(&mut tree)?;
            let table = ScaleTable::build(&mut tree, page.table_spec(prefix))?;
            tree.append_child(&layout.scales, table.table())?;
            if table.has_inferred() {
                tree.append_child(&layout.scales, table.strip())?;
            }
            tracing::debug!(
                page = page.name,
                sliders = panel.slider_ids().len(),
                rejected = panel.rejected().len(),
                "calculator page assembled"
            );
        }
        PageKind::GravityWaves => {
            let descriptors = core_wave_configs(prefix, &options.config, &Overrides::new())
                .into_iter()
                .chain([
                    overlay_toggle_config(prefix),
                    imshow_selection_config(prefix, &IMSHOW_FIELDS, &IMSHOW_LABELS),
                ]);
            let panel = builder.controls(descriptors).build(&mut tree)?;
            tracing::debug!(
                sliders = panel.slider_ids().len(),
                rejected = panel.rejected().len(),
                "gravity-wave page assembled"
            );
        }
    }

    Ok(tree.to_html(layout.container))
}
