use std::collections::HashSet;

use super::*;
use crate::descriptor::Override;

fn sliders(configs: &[ControlDescriptor]) -> Vec<&SliderSpec> {
    configs
        .iter()
        .filter_map(|d| match d {
            ControlDescriptor::Slider(spec) => Some(spec),
            _ => None,
        })
        .collect()
}

fn find<'a>(configs: &'a [ControlDescriptor], id: &str) -> &'a SliderSpec {
    sliders(configs).into_iter().find(|s| s.id == id).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-12 * a.abs().max(b.abs()).max(1.0)
}

// =============================================================
// Toggles
// =============================================================

#[test]
fn coordinate_toggle_ids_are_container_scoped() {
    let ControlDescriptor::Radio(group) = coordinates_config("wave", CoordinateMode::Dimensional) else {
        unreachable!("toggle is a radio group");
    };
    assert_eq!(group.id, "wave-coordinates");
    assert_eq!(group.name, "wave-coordinates");
    let ids: Vec<&str> = group.options.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["wave-non-dimensional-button", "wave-dimensional-button"]);
}

#[test]
fn coordinate_toggle_checks_starting_mode() {
    for mode in [CoordinateMode::Dimensional, CoordinateMode::NonDimensional] {
        let ControlDescriptor::Radio(group) = coordinates_config("p", mode) else {
            unreachable!("toggle is a radio group");
        };
        let checked: Vec<&str> = group
            .options
            .iter()
            .filter(|o| o.checked)
            .filter_map(|o| o.value.as_deref())
            .collect();
        assert_eq!(checked, vec![mode.as_str()]);
    }
}

#[test]
fn overlay_defaults() {
    let ControlDescriptor::Checkbox(group) = overlay_toggle_config("p") else {
        unreachable!("overlay is a checkbox group");
    };
    let state: Vec<(&str, bool)> = group.options.iter().map(|o| (o.id.as_str(), o.checked)).collect();
    assert_eq!(
        state,
        vec![("p-displacement-checkbox", false), ("p-quiver-checkbox", true), ("p-imshow-checkbox", true)]
    );
}

#[test]
fn imshow_selection_checks_first_and_falls_back_to_field_names() {
    let ControlDescriptor::Radio(group) = imshow_selection_config("p", &["u", "w", "phi"], &["\\(u\\)"]) else {
        unreachable!("selection is a radio group");
    };
    assert_eq!(group.name, "p-imshow-field");
    assert_eq!(group.checked_index(), 0);
    assert!(group.options[0].checked);
    assert!(!group.options[1].checked);
    assert_eq!(group.options[0].label, "\\(u\\)");
    assert_eq!(group.options[2].label, "phi");
    assert_eq!(group.options[2].id, "p-imshow-phi-button");
}

#[test]
fn default_imshow_fields_have_labels() {
    assert_eq!(IMSHOW_FIELDS.len(), IMSHOW_LABELS.len());
    let descriptor = imshow_selection_config("", &IMSHOW_FIELDS, &IMSHOW_LABELS);
    assert_eq!(descriptor.validate(), Ok(()));
    assert_eq!(descriptor.id(), "imshow-selection");
}

// =============================================================
// Core wave sliders
// =============================================================

#[test]
fn core_sets_have_expected_ids_and_classes() {
    let config = PhysicalScaleConfig::default();
    let configs = core_wave_configs("p", &config, &Overrides::new());
    let ids: Vec<&str> = configs.iter().map(ControlDescriptor::id).collect();
    assert_eq!(
        ids,
        vec![
            "p-t-slider",
            "p-f_omega-slider",
            "p-alpha_omega-slider",
            "p-N_omega-slider",
            "p-t_dim-slider",
            "p-f-slider",
            "p-alpha-slider",
            "p-N-slider",
            "p-H-slider",
            "p-Q_0-slider",
        ]
    );
    for spec in sliders(&configs) {
        let class = spec.display_class.as_deref();
        if spec.unit.is_some() {
            assert_eq!(class, Some(DIMENSIONAL_CLASS), "{}", spec.id);
        } else {
            assert_eq!(class, Some(NON_DIMENSIONAL_CLASS), "{}", spec.id);
        }
    }
}

#[test]
fn core_sets_are_valid_and_unique() {
    let config = PhysicalScaleConfig::default();
    let configs = core_wave_configs("p", &config, &Overrides::new());
    for descriptor in &configs {
        assert_eq!(descriptor.validate(), Ok(()), "{}", descriptor.id());
    }
    let ids: HashSet<&str> = configs.iter().map(ControlDescriptor::id).collect();
    assert_eq!(ids.len(), configs.len());
}

#[test]
fn non_dimensional_pairs_match_dimensional_ranges() {
    let config = PhysicalScaleConfig::default();
    let configs = core_wave_configs("", &config, &Overrides::new());
    for (dim, non_dim) in [("f-slider", "f_omega-slider"), ("alpha-slider", "alpha_omega-slider"), ("N-slider", "N_omega-slider")] {
        let d = find(&configs, dim);
        let n = find(&configs, non_dim);
        assert!(approx(n.min, d.min / config.omega), "{dim}");
        assert!(approx(n.max, d.max / config.omega), "{dim}");
        assert!(approx(n.value, d.value / config.omega), "{dim}");
        assert!(approx(n.step / (n.max - n.min), d.step / (d.max - d.min)), "{dim}");
    }
}

#[test]
fn units_on_dimensional_sliders() {
    let configs = core_wave_configs_dim("", &PhysicalScaleConfig::default(), &Overrides::new());
    let units: Vec<Option<&str>> = sliders(&configs).into_iter().map(|s| s.unit.as_deref()).collect();
    assert_eq!(
        units,
        vec![Some("s"), Some("s⁻¹"), Some("s⁻¹"), Some("s⁻¹"), Some("m"), Some("m s⁻³")]
    );
}

#[test]
fn overrides_apply_to_either_set() {
    let config = PhysicalScaleConfig::default();
    let overrides = Overrides::from([
        ("p-N-slider".to_owned(), Override::value(0.02)),
        ("p-t-slider".to_owned(), Override { max: Some(2.0), ..Override::default() }),
    ]);
    let configs = core_wave_configs("p", &config, &overrides);
    assert!(approx(find(&configs, "p-N-slider").value, 0.02));
    assert!(approx(find(&configs, "p-t-slider").max, 2.0));
}

#[test]
fn config_changes_flow_into_ranges() {
    let config = PhysicalScaleConfig { depth: 3000.0, ..PhysicalScaleConfig::default() };
    let configs = core_wave_configs_dim("", &config, &Overrides::new());
    assert!(approx(find(&configs, "H-slider").value, 3000.0));
}

#[test]
fn prefixed_ids() {
    assert_eq!(prefixed("", "N-slider"), "N-slider");
    assert_eq!(prefixed("panel", "N-slider"), "panel-N-slider");
}
