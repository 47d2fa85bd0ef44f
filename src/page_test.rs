use controls::Override;

use super::*;

fn options(container_id: &str) -> RenderOptions {
    RenderOptions { container_id: container_id.to_owned(), ..RenderOptions::default() }
}

// =============================================================
// Page lookup
// =============================================================

#[test]
fn resolves_calculator_and_model_pages() {
    assert!(matches!(PageKind::resolve("anelastic"), Ok(PageKind::Calculator(page)) if page.name == "anelastic"));
    assert!(matches!(PageKind::resolve(GRAVITY_WAVES), Ok(PageKind::GravityWaves)));
    assert!(matches!(PageKind::resolve("nope"), Err(CliError::UnknownPage(ref name)) if name == "nope"));
}

#[test]
fn listing_names_every_page() {
    let names: Vec<&str> = PageKind::listing().into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["anelastic", "buoyancy", GRAVITY_WAVES]);
}

// =============================================================
// Layout
// =============================================================

#[test]
fn layout_scopes_ids_to_the_container() {
    let mut tree = MemoryTree::new();
    let layout = layout(&mut tree, "an").unwrap();
    assert_eq!(layout.controls_id, "an-controls");
    assert!(tree.element_by_id("an-loading-screen").is_some());
    assert!(tree.element_by_id("an-main-content").is_some());
    assert_eq!(tree.attribute(layout.scales, "id").as_deref(), Some("an-scales"));
    assert_eq!(tree.children(layout.container).len(), 2);
}

// =============================================================
// Rendering
// =============================================================

#[test]
fn calculator_page_renders_panel_and_table() {
    let kind = PageKind::resolve("anelastic").unwrap();
    let html = render(&kind, &options("an")).unwrap();
    assert!(html.starts_with("<div id=\"an\">"));
    assert!(html.contains("id=\"an-L-slider\""));
    assert!(html.contains("10^3.0 m"));
    assert!(html.contains("id=\"an-scale-table\""));
    assert!(html.contains("id=\"an-scale-table-inferred\""));
    assert!(html.contains("class=\"non-dimensional-mode\""));
}

#[test]
fn anelastic_table_is_typesettable() {
    let kind = PageKind::resolve("anelastic").unwrap();
    let html = render(&kind, &options("an")).unwrap();
    assert!(html.contains("10^-1.0 m s<sup>-2</sup>"));
    assert!(!html.contains("&lt;sup&gt;"));
    assert!(html.contains("<span class=\"scale-label\">\\(\\frac{D \\mathbf{u}}{D t}\\)</span>"));
    assert!(html.contains("\\(T\\) = 10^2.0"));
}

#[test]
fn starting_coordinates_tag_the_panel() {
    let kind = PageKind::resolve("buoyancy").unwrap();
    let options = RenderOptions { starting: CoordinateMode::Dimensional, ..options("b") };
    let html = render(&kind, &options).unwrap();
    assert!(html.contains("<div id=\"b-controls\" class=\"dimensional-mode\">"));
    assert!(!html.contains("b-scale-table-inferred"));
}

#[test]
fn gravity_wave_page_uses_config_and_overrides() {
    let config = PhysicalScaleConfig { depth: 3000.0, ..PhysicalScaleConfig::default() };
    let overrides = Overrides::from([("gw-N-slider".to_owned(), Override::value(0.02))]);
    let options = RenderOptions { config, overrides, ..options("gw") };
    let html = render(&PageKind::GravityWaves, &options).unwrap();
    assert!(html.contains("id=\"gw-H-slider\""));
    assert!(html.contains("value=\"3000\""));
    assert!(html.contains("value=\"0.02\""));
    assert!(html.contains("id=\"gw-quiver-checkbox\""));
    assert!(html.contains("id=\"gw-imshow-psi-button\""));
}

#[test]
fn two_pages_share_one_document_without_clashes() {
    let kind = PageKind::resolve("anelastic").unwrap();
    let left = render(&kind, &options("left")).unwrap();
    let right = render(&kind, &options("right")).unwrap();
    assert!(left.contains("left-U-slider"));
    assert!(!left.contains("right-"));
    assert!(right.contains("right-U-slider"));
}
