//! Control panel assembler and the coordinate-mode state machine.
//!
//! A panel is an ordered stack of control rows inside one container,
//! preceded by exactly one coordinate toggle. Both dimensional and
//! non-dimensional rows stay in the tree; the toggle only swaps the mode tag
//! on the container, and page CSS decides which rows are foregrounded.
//!
//! Two calling conventions build the same panel:
//!
//! - descriptors ([`build_panel`] / [`PanelBuilder::controls`]), the primary one;
//! - rows built positionally with [`slider_row`] or [`log_slider_row`] and handed over through
//!   [`PanelBuilder::prebuilt`], kept for pages written against it.
//!
//! Event wiring lives with the host (see [`crate::web`]); the handlers here
//! ([`Panel::on_input`], [`Panel::on_toggle_change`]) are plain methods.

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::PhysicalScaleConfig;
use crate::consts::{DIMENSIONAL_MODE_TAG, NON_DIMENSIONAL_MODE_TAG};
use crate::descriptor::{ControlDescriptor, Overrides, SliderSpec, apply_overrides, slider_config};
use crate::error::{ConfigurationError, Error};
use crate::factory::{Rendered, RenderedControl, build_control};
use crate::presets::{coordinate_option_id, coordinates_config, core_wave_configs};
use crate::tree::UiTree;
use crate::typeset::Typesetter;

/// Which unit representation the panel foregrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoordinateMode {
    Dimensional,
    #[default]
    NonDimensional,
}

impl CoordinateMode {
    /// Option value and id stem: `dimensional` / `non-dimensional`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dimensional => "dimensional",
            Self::NonDimensional => "non-dimensional",
        }
    }

    /// Tag placed on the container while this mode is active.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Dimensional => DIMENSIONAL_MODE_TAG,
            Self::NonDimensional => NON_DIMENSIONAL_MODE_TAG,
        }
    }

    /// The other mode.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Dimensional => Self::NonDimensional,
            Self::NonDimensional => Self::Dimensional,
        }
    }
}

impl FromStr for CoordinateMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dimensional" => Ok(Self::Dimensional),
            "non-dimensional" | "nondimensional" => Ok(Self::NonDimensional),
            other => Err(format!("unknown coordinate mode `{other}`")),
        }
    }
}

/// An assembled panel.
#[derive(Debug, Clone)]
pub struct Panel<N> {
    container_id: String,
    container: N,
    config: PhysicalScaleConfig,
    toggle: RenderedControl<N>,
    controls: Vec<RenderedControl<N>>,
    index: HashMap<String, usize>,
    mode: CoordinateMode,
    rejected: Vec<ConfigurationError>,
}

impl<N: Clone> Panel<N> {
    #[must_use]
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    #[must_use]
    pub fn container(&self) -> &N {
        &self.container
    }

    /// Scale configuration this panel was built with.
    #[must_use]
    pub fn config(&self) -> &PhysicalScaleConfig {
        &self.config
    }

    /// Current coordinate mode.
    #[must_use]
    pub fn mode(&self) -> CoordinateMode {
        self.mode
    }

    /// The coordinate toggle row.
    #[must_use]
    pub fn toggle(&self) -> &RenderedControl<N> {
        &self.toggle
    }

    /// Rendered controls in display order (toggle excluded).
    #[must_use]
    pub fn controls(&self) -> &[RenderedControl<N>] {
        &self.controls
    }

    /// Look up a rendered control by id.
    #[must_use]
    pub fn control(&self, id: &str) -> Option<&RenderedControl<N>> {
        self.index.get(id).and_then(|&i| self.controls.get(i))
    }

    /// Descriptors that failed validation and were left out.
    #[must_use]
    pub fn rejected(&self) -> &[ConfigurationError] {
        &self.rejected
    }

    /// Ids of every slider, in display order.
    #[must_use]
    pub fn slider_ids(&self) -> Vec<&str> {
        self.controls
            .iter()
            .filter(|c| c.is_slider())
            .map(|c| c.id.as_str())
            .collect()
    }

    /// Toggle option id for `mode`.
    #[must_use]
    pub fn option_id(&self, mode: CoordinateMode) -> String {
        coordinate_option_id(&self.container_id, mode)
    }

    fn option_node(&self, mode: CoordinateMode) -> Option<&N> {
        let id = self.option_id(mode);
        match &self.toggle.rendered {
            Rendered::Toggles { inputs } => inputs.iter().find(|(oid, _)| *oid == id).map(|(_, n)| n),
            Rendered::Slider { .. } | Rendered::Text { .. } => None,
        }
    }

    /// Switch to `mode`: check its option and make its tag the only mode tag.
    ///
    /// Returns whether the mode changed. Controls are left untouched.
    ///
    /// # Errors
    ///
    /// Propagates tree errors.
    pub fn select_mode<T: UiTree<Node = N>>(&mut self, tree: &mut T, mode: CoordinateMode) -> Result<bool, Error> {
        if let Some(option) = self.option_node(mode).cloned() {
            if !tree.checked(&option) {
                tree.set_checked(&option, true)?;
            }
        }
        tree.remove_class(&self.container, mode.other().tag())?;
        tree.add_class(&self.container, mode.tag())?;
        let changed = self.mode != mode;
        if changed {
            log::debug!("panel `{}` switched to {} coordinates", self.container_id, mode.as_str());
        }
        self.mode = mode;
        Ok(changed)
    }

    /// Handle a `change` event on a coordinate toggle option.
    ///
    /// Transitions only if the option is now checked. Returns the new mode,
    /// or `None` if `option_id` is not a toggle option or is unchecked.
    ///
    /// # Errors
    ///
    /// Propagates tree errors.
    pub fn on_toggle_change<T: UiTree<Node = N>>(
        &mut self,
        tree: &mut T,
        option_id: &str,
    ) -> Result<Option<CoordinateMode>, Error> {
        let Some(mode) = [CoordinateMode::NonDimensional, CoordinateMode::Dimensional]
            .into_iter()
            .find(|m| self.option_id(*m) == option_id)
        else {
            return Ok(None);
        };
        let Some(option) = self.option_node(mode).cloned() else {
            return Ok(None);
        };
        if !tree.checked(&option) {
            return Ok(None);
        }
        self.select_mode(tree, mode)?;
        Ok(Some(mode))
    }

    /// Handle an `input` event on a control: refresh a slider's output text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownSlider`] for unknown ids and
    /// propagates read and tree errors.
    pub fn on_input<T: UiTree<Node = N>>(&self, tree: &mut T, id: &str) -> Result<(), Error> {
        let control = self
            .control(id)
            .ok_or_else(|| ConfigurationError::UnknownSlider(id.to_owned()))?;
        control.refresh_output(tree)
    }
}

/// Builder for [`Panel`].
pub struct PanelBuilder<'a, N> {
    container_id: String,
    config: PhysicalScaleConfig,
    descriptors: Vec<ControlDescriptor>,
    prebuilt: Vec<RenderedControl<N>>,
    overrides: Overrides,
    starting: CoordinateMode,
    typesetter: Option<&'a dyn Typesetter<N>>,
}

impl<'a, N: Clone> PanelBuilder<'a, N> {
    #[must_use]
    pub fn new(container_id: &str) -> Self {
        Self {
            container_id: container_id.to_owned(),
            config: PhysicalScaleConfig::default(),
            descriptors: Vec::new(),
            prebuilt: Vec::new(),
            overrides: Overrides::new(),
            starting: CoordinateMode::default(),
            typesetter: None,
        }
    }

    #[must_use]
    pub fn config(mut self, config: PhysicalScaleConfig) -> Self {
        self.config = config;
        self
    }

    /// Append descriptors, rendered in order.
    #[must_use]
    pub fn controls(mut self, descriptors: impl IntoIterator<Item = ControlDescriptor>) -> Self {
        self.descriptors.extend(descriptors);
        self
    }

    /// Append the core gravity-wave sliders derived from this builder's config.
    ///
    /// Ids are prefixed with the container id.
    #[must_use]
    pub fn core_wave_controls(mut self) -> Self {
        let configs = core_wave_configs(&self.container_id, &self.config, &Overrides::new());
        self.descriptors.extend(configs);
        self
    }

    /// Append rows already built with [`slider_row`] or [`build_control`].
    #[must_use]
    pub fn prebuilt(mut self, rows: impl IntoIterator<Item = RenderedControl<N>>) -> Self {
        self.prebuilt.extend(rows);
        self
    }

    #[must_use]
    pub fn overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    #[must_use]
    pub fn starting_coordinates(mut self, mode: CoordinateMode) -> Self {
        self.starting = mode;
        self
    }

    #[must_use]
    pub fn typesetter(mut self, typesetter: &'a dyn Typesetter<N>) -> Self {
        self.typesetter = Some(typesetter);
        self
    }

    /// Populate the container.
    ///
    /// A descriptor that fails validation is logged, recorded in
    /// [`Panel::rejected`] and skipped; the other rows still render.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingContainer`] if the container does
    /// not exist, [`ConfigurationError::DuplicateId`] if two controls or
    /// options share an id, and tree errors from the host.
    pub fn build<T: UiTree<Node = N>>(self, tree: &mut T) -> Result<Panel<N>, Error> {
        let root = tree.root();
        let container = tree
            .find_by_id(&root, &self.container_id)
            .ok_or_else(|| ConfigurationError::MissingContainer(self.container_id.clone()))?;

        let mut descriptors = self.descriptors;
        for unmatched in apply_overrides(&mut descriptors, &self.overrides) {
            log::warn!("override for unknown control `{unmatched}` ignored");
        }

        let toggle_descriptor = coordinates_config(&self.container_id, self.starting);
        check_unique(&toggle_descriptor, &descriptors, &self.prebuilt)?;

        let toggle = build_control(tree, &toggle_descriptor)?;
        tree.append_child(&container, &toggle.row)?;

        let mut controls = Vec::with_capacity(descriptors.len() + self.prebuilt.len());
        let mut rejected = Vec::new();
        for descriptor in &descriptors {
            match build_control(tree, descriptor) {
                Ok(control) => controls.push(control),
                Err(Error::Configuration(err)) => {
                    log::error!("control `{}` not rendered: {err}", descriptor.id());
                    rejected.push(err);
                }
                Err(err) => return Err(err),
            }
        }
        controls.extend(self.prebuilt);

        let mut index = HashMap::with_capacity(controls.len());
        for (i, control) in controls.iter().enumerate() {
            tree.append_child(&container, &control.row)?;
            index.insert(control.id.clone(), i);
        }

        let mut panel = Panel {
            container_id: self.container_id,
            container,
            config: self.config,
            toggle,
            controls,
            index,
            mode: self.starting,
            rejected,
        };
        panel.select_mode(tree, self.starting)?;

        match self.typesetter {
            Some(typesetter) => {
                if !typesetter.typeset(&panel.container) {
                    log::debug!("typesetter unavailable; labels left as markup");
                }
            }
            None => log::debug!("no typesetter for panel `{}`", panel.container_id),
        }

        log::info!(
            "panel `{}` built with {} controls ({} rejected)",
            panel.container_id,
            panel.controls.len(),
            panel.rejected.len()
        );
        Ok(panel)
    }
}

fn check_unique<N>(
    toggle: &ControlDescriptor,
    descriptors: &[ControlDescriptor],
    prebuilt: &[RenderedControl<N>],
) -> Result<(), ConfigurationError> {
    let mut seen = HashSet::new();
    let descriptor_ids = std::iter::once(toggle)
        .chain(descriptors)
        .flat_map(ControlDescriptor::ids)
        .map(str::to_owned);
    let prebuilt_ids = prebuilt.iter().flat_map(|control| {
        let options = match &control.rendered {
            Rendered::Toggles { inputs } => inputs.iter().map(|(id, _)| id.clone()).collect(),
            Rendered::Slider { .. } | Rendered::Text { .. } => Vec::new(),
        };
        std::iter::once(control.id.clone()).chain(options)
    });
    for id in descriptor_ids.chain(prebuilt_ids) {
        if id.is_empty() {
            continue;
        }
        if !seen.insert(id.clone()) {
            return Err(ConfigurationError::DuplicateId(id));
        }
    }
    Ok(())
}

/// Build a panel from descriptors with default options.
///
/// # Errors
///
/// See [`PanelBuilder::build`].
pub fn build_panel<T: UiTree>(
    tree: &mut T,
    container_id: &str,
    descriptors: Vec<ControlDescriptor>,
    overrides: Option<Overrides>,
) -> Result<Panel<T::Node>, Error> {
    PanelBuilder::new(container_id)
        .controls(descriptors)
        .overrides(overrides.unwrap_or_default())
        .build(tree)
}

/// Positional slider-row convention: build one slider row directly.
///
/// A thin adapter over [`slider_config`]; hand the rows to
/// [`PanelBuilder::prebuilt`] to get the coordinate toggle and mode handling.
///
/// # Errors
///
/// See [`build_control`].
#[allow(clippy::too_many_arguments)]
pub fn slider_row<T: UiTree>(
    tree: &mut T,
    id: &str,
    label: &str,
    min: f64,
    max: f64,
    value: f64,
    step: f64,
    display_class: Option<&str>,
    unit: Option<&str>,
) -> Result<RenderedControl<T::Node>, Error> {
    let descriptor = slider_config(
        label,
        id,
        min,
        max,
        value,
        step,
        display_class.unwrap_or_default(),
        unit.unwrap_or_default(),
    );
    build_control(tree, &descriptor)
}

/// Positional row for a slider that stores a decimal exponent.
///
/// Same argument order as [`slider_row`]; the output reads `10^value unit`
/// and the binder de-logarithmises the reading.
///
/// # Errors
///
/// See [`build_control`].
#[allow(clippy::too_many_arguments)]
pub fn log_slider_row<T: UiTree>(
    tree: &mut T,
    id: &str,
    label: &str,
    min: f64,
    max: f64,
    value: f64,
    step: f64,
    display_class: Option<&str>,
    unit: Option<&str>,
) -> Result<RenderedControl<T::Node>, Error> {
    let mut spec = SliderSpec::new(id, label, min, max, value, step).log_scale();
    spec.display_class = display_class.map(str::to_owned);
    spec.unit = unit.map(str::to_owned);
    build_control(tree, &ControlDescriptor::Slider(spec))
}
