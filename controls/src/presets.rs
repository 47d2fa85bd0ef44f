//! Ready-made descriptor sets for gravity-wave model pages.
//!
//! Dimensional sliders carry units and the `dimensional` display class;
//! their non-dimensional counterparts are the same ranges divided by the
//! reference frequency `omega` and carry the `non-dimensional` class. Both
//! sets are derived from one [`PhysicalScaleConfig`], which keeps each pair
//! stepping through the same fraction of its range.
//!
//! Ids take an optional prefix (usually the page's container id) so several
//! models can share one page.

#[cfg(test)]
#[path = "presets_test.rs"]
mod presets_test;

use crate::config::{PhysicalScaleConfig, SliderRange};
use crate::consts::{COORDINATES_GROUP, DIMENSIONAL_CLASS, NON_DIMENSIONAL_CLASS};
use crate::descriptor::{
    CheckboxGroupSpec, ControlDescriptor, Overrides, RadioGroupSpec, SliderSpec, ToggleOption, apply_overrides,
    radio_config,
};
use crate::panel::CoordinateMode;

/// Shading fields offered by default.
pub const IMSHOW_FIELDS: [&str; 6] = ["psi", "u", "v", "w", "Q", "phi"];

/// Typeset labels for [`IMSHOW_FIELDS`].
pub const IMSHOW_LABELS: [&str; 6] = [
    "\\(\\psi\\)",
    "\\(u\\)",
    "\\(v\\)",
    "\\(w\\)",
    "\\(Q\\)",
    "\\(\\phi\\)",
];

/// `name` with `prefix-` in front, or `name` alone for an empty prefix.
#[must_use]
pub fn prefixed(prefix: &str, name: &str) -> String {
    if prefix.is_empty() { name.to_owned() } else { format!("{prefix}-{name}") }
}

/// Id of the coordinate toggle option for `mode` in the given container.
#[must_use]
pub fn coordinate_option_id(container_id: &str, mode: CoordinateMode) -> String {
    prefixed(container_id, &format!("{}-button", mode.as_str()))
}

/// The coordinate toggle: "Non-dimensional" / "Dimensional" radios.
#[must_use]
pub fn coordinates_config(container_id: &str, starting: CoordinateMode) -> ControlDescriptor {
    let group = prefixed(container_id, COORDINATES_GROUP);
    let option = |mode: CoordinateMode, label: &str| {
        radio_config(label, &coordinate_option_id(container_id, mode), mode.as_str(), mode == starting)
    };
    ControlDescriptor::Radio(RadioGroupSpec {
        id: group.clone(),
        label: "Coordinates:".to_owned(),
        name: group,
        options: vec![
            option(CoordinateMode::NonDimensional, "Non-dimensional"),
            option(CoordinateMode::Dimensional, "Dimensional"),
        ],
        display_class: None,
    })
}

/// "Show:" checkboxes for the figure overlays.
#[must_use]
pub fn overlay_toggle_config(prefix: &str) -> ControlDescriptor {
    let option = |name: &str, label: &str, checked: bool| ToggleOption {
        id: prefixed(prefix, &format!("{name}-checkbox")),
        label: label.to_owned(),
        value: None,
        checked,
    };
    ControlDescriptor::Checkbox(CheckboxGroupSpec {
        id: prefixed(prefix, "overlay"),
        label: "Show:".to_owned(),
        options: vec![
            option("displacement", "Displacement", false),
            option("quiver", "Quiver", true),
            option("imshow", "Shading", true),
        ],
        display_class: None,
    })
}

/// "Shading:" radios choosing the shaded field; the first is checked.
///
/// A missing label falls back to the field name.
#[must_use]
pub fn imshow_selection_config(prefix: &str, fields: &[&str], labels: &[&str]) -> ControlDescriptor {
    let options = fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let label = labels.get(index).copied().unwrap_or(*field);
            let id = prefixed(prefix, &format!("imshow-{field}-button"));
            radio_config(label, &id, field, index == 0)
        })
        .collect();
    ControlDescriptor::Radio(RadioGroupSpec {
        id: prefixed(prefix, "imshow-selection"),
        label: "Shading:".to_owned(),
        name: prefixed(prefix, "imshow-field"),
        options,
        display_class: None,
    })
}

fn slider(prefix: &str, name: &str, label: &str, range: SliderRange, class: &str) -> SliderSpec {
    let id = prefixed(prefix, &format!("{name}-slider"));
    SliderSpec::new(&id, label, range.min, range.max, range.value, range.step).with_class(class)
}

/// Dimensional core sliders: `t`, `f`, `alpha`, `N`, `H`, `Q_0`.
#[must_use]
pub fn core_wave_configs_dim(prefix: &str, config: &PhysicalScaleConfig, overrides: &Overrides) -> Vec<ControlDescriptor> {
    let class = DIMENSIONAL_CLASS;
    let mut configs: Vec<ControlDescriptor> = vec![
        slider(prefix, "t_dim", "\\(t:\\)", config.time(), class).with_unit("s").into(),
        slider(prefix, "f", "\\(f:\\)", config.coriolis(), class).with_unit("s⁻¹").into(),
        slider(prefix, "alpha", "\\(\\alpha:\\)", config.damping(), class).with_unit("s⁻¹").into(),
        slider(prefix, "N", "\\(N:\\)", config.buoyancy_frequency(), class).with_unit("s⁻¹").into(),
        slider(prefix, "H", "\\(H:\\)", config.depth(), class).with_unit("m").into(),
        slider(prefix, "Q_0", "\\(Q_0:\\)", config.heating(), class).with_unit("m s⁻³").into(),
    ];
    apply_overrides(&mut configs, overrides);
    configs
}

/// Non-dimensional core sliders: `t`, `f / omega`, `alpha / omega`, `N / omega`.
#[must_use]
pub fn core_wave_configs_non_dim(
    prefix: &str,
    config: &PhysicalScaleConfig,
    overrides: &Overrides,
) -> Vec<ControlDescriptor> {
    let class = NON_DIMENSIONAL_CLASS;
    let omega = config.omega;
    let mut configs: Vec<ControlDescriptor> = vec![
        slider(prefix, "t", "\\(t:\\)", config.time_non_dim(), class).into(),
        slider(prefix, "f_omega", "\\(f / \\omega :\\)", config.coriolis().divided_by(omega), class).into(),
        slider(prefix, "alpha_omega", "\\(\\alpha / \\omega :\\)", config.damping().divided_by(omega), class).into(),
        slider(prefix, "N_omega", "\\(N / \\omega :\\)", config.buoyancy_frequency().divided_by(omega), class).into(),
    ];
    apply_overrides(&mut configs, overrides);
    configs
}

/// Non-dimensional sliders followed by dimensional ones.
#[must_use]
pub fn core_wave_configs(prefix: &str, config: &PhysicalScaleConfig, overrides: &Overrides) -> Vec<ControlDescriptor> {
    let mut configs = core_wave_configs_non_dim(prefix, config, overrides);
    configs.extend(core_wave_configs_dim(prefix, config, overrides));
    configs
}
