//! Control descriptors: declarative data describing one control before render.
//!
//! A [`ControlDescriptor`] is a tagged union keyed by `kind`; each variant's
//! required fields are enforced by its struct, and the remaining semantic
//! constraints (non-empty ids, ordered bounds, positive step, at most one
//! checked radio) are checked by [`ControlDescriptor::validate`] at build time.
//!
//! Descriptors are plain data and deserialise from JSON, e.g.
//!
//! ```json
//! { "kind": "slider", "id": "N-slider", "label": "\\(N:\\)",
//!   "min": 0.0, "max": 0.1, "value": 0.01, "step": 0.0005, "unit": "s⁻¹" }
//! ```

#[cfg(test)]
#[path = "descriptor_test.rs"]
mod descriptor_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// How a slider's stored value relates to the physical quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliderScale {
    /// The slider stores and displays the quantity itself.
    #[default]
    Linear,
    /// The slider stores `log10` of the quantity and displays `10^value`.
    Log,
}

/// A range slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderSpec {
    pub id: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub value: f64,
    pub step: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Dimensional / non-dimensional grouping tag; not parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_class: Option<String>,
    #[serde(default)]
    pub scale: SliderScale,
}

impl SliderSpec {
    #[must_use]
    pub fn new(id: &str, label: &str, min: f64, max: f64, value: f64, step: f64) -> Self {
        Self {
            id: id.to_owned(),
            label: label.to_owned(),
            min,
            max,
            value,
            step,
            unit: None,
            display_class: None,
            scale: SliderScale::Linear,
        }
    }

    #[must_use]
    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_owned());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.display_class = Some(class.to_owned());
        self
    }

    /// Mark the slider as storing an exponent.
    #[must_use]
    pub fn log_scale(mut self) -> Self {
        self.scale = SliderScale::Log;
        self
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.id.is_empty() {
            return Err(ConfigurationError::MissingId { kind: "slider" });
        }
        for (field, v) in [("min", self.min), ("max", self.max), ("value", self.value), ("step", self.step)] {
            if !v.is_finite() {
                return Err(ConfigurationError::NonFinite { id: self.id.clone(), field });
            }
        }
        if self.min > self.max {
            return Err(ConfigurationError::InvertedBounds {
                id: self.id.clone(),
                min: self.min,
                max: self.max,
            });
        }
        if self.step <= 0.0 {
            return Err(ConfigurationError::NonPositiveStep { id: self.id.clone(), step: self.step });
        }
        if self.value < self.min || self.value > self.max {
            return Err(ConfigurationError::ValueOutOfRange {
                id: self.id.clone(),
                value: self.value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// One checkbox or radio option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleOption {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default)]
    pub checked: bool,
}

/// Convenience constructor for a radio (or checkbox) option.
#[must_use]
pub fn radio_config(label: &str, id: &str, value: &str, checked: bool) -> ToggleOption {
    ToggleOption {
        id: id.to_owned(),
        label: label.to_owned(),
        value: Some(value.to_owned()),
        checked,
    }
}

/// Positional slider constructor: `label` first, empty `class` / `unit` mean none.
#[allow(clippy::too_many_arguments)]
#[must_use]
pub fn slider_config(
    label: &str,
    id: &str,
    min: f64,
    max: f64,
    value: f64,
    step: f64,
    class: &str,
    unit: &str,
) -> ControlDescriptor {
    let mut spec = SliderSpec::new(id, label, min, max, value, step);
    if !class.is_empty() {
        spec.display_class = Some(class.to_owned());
    }
    if !unit.is_empty() {
        spec.unit = Some(unit.to_owned());
    }
    ControlDescriptor::Slider(spec)
}

/// A row of independent checkboxes under one group label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckboxGroupSpec {
    pub id: String,
    pub label: String,
    pub options: Vec<ToggleOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_class: Option<String>,
}

/// A row of mutually exclusive radios sharing `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadioGroupSpec {
    pub id: String,
    pub label: String,
    pub name: String,
    pub options: Vec<ToggleOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_class: Option<String>,
}

impl RadioGroupSpec {
    /// Index of the option rendered checked: the marked one, else the first.
    #[must_use]
    pub fn checked_index(&self) -> usize {
        self.options.iter().position(|o| o.checked).unwrap_or(0)
    }
}

/// A free-text input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSpec {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_class: Option<String>,
}

/// Declarative description of one interactive control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ControlDescriptor {
    Slider(SliderSpec),
    Checkbox(CheckboxGroupSpec),
    Radio(RadioGroupSpec),
    Text(TextSpec),
}

impl From<SliderSpec> for ControlDescriptor {
    fn from(spec: SliderSpec) -> Self {
        Self::Slider(spec)
    }
}

impl ControlDescriptor {
    /// The control's id (the join key to its rendered nodes).
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Slider(s) => &s.id,
            Self::Checkbox(c) => &c.id,
            Self::Radio(r) => &r.id,
            Self::Text(t) => &t.id,
        }
    }

    /// Lowercase kind name, as used in the serialised `kind` tag.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Slider(_) => "slider",
            Self::Checkbox(_) => "checkbox",
            Self::Radio(_) => "radio",
            Self::Text(_) => "text",
        }
    }

    /// Every id this control will place in the tree: its own plus its options'.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids = vec![self.id()];
        if let Some(options) = self.options() {
            ids.extend(options.iter().map(|o| o.id.as_str()));
        }
        ids
    }

    fn options(&self) -> Option<&[ToggleOption]> {
        match self {
            Self::Checkbox(c) => Some(&c.options),
            Self::Radio(r) => Some(&r.options),
            Self::Slider(_) | Self::Text(_) => None,
        }
    }

    /// Check the constraints the type system cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match self {
            Self::Slider(spec) => spec.validate(),
            Self::Checkbox(spec) => validate_group("checkbox", &spec.id, &spec.options),
            Self::Radio(spec) => {
                validate_group("radio", &spec.id, &spec.options)?;
                if spec.name.is_empty() {
                    return Err(ConfigurationError::MissingGroupName { id: spec.id.clone() });
                }
                let count = spec.options.iter().filter(|o| o.checked).count();
                if count > 1 {
                    return Err(ConfigurationError::MultipleChecked { id: spec.id.clone(), count });
                }
                Ok(())
            }
            Self::Text(spec) => {
                if spec.id.is_empty() {
                    return Err(ConfigurationError::MissingId { kind: "text" });
                }
                Ok(())
            }
        }
    }

    /// Merge an override addressed to this control or one of its options.
    ///
    /// Returns `true` if `target` matched. Bounds are not re-checked here.
    pub fn apply_override(&mut self, target: &str, fields: &Override) -> bool {
        match self {
            Self::Slider(spec) if spec.id == target => {
                if let Some(v) = fields.min {
                    spec.min = v;
                }
                if let Some(v) = fields.max {
                    spec.max = v;
                }
                if let Some(v) = fields.step {
                    spec.step = v;
                }
                if let Some(v) = fields.value {
                    spec.value = v;
                }
                true
            }
            Self::Checkbox(spec) => apply_checked(&mut spec.options, target, fields, false),
            Self::Radio(spec) => apply_checked(&mut spec.options, target, fields, true),
            Self::Slider(_) | Self::Text(_) => false,
        }
    }
}

fn validate_group(kind: &'static str, id: &str, options: &[ToggleOption]) -> Result<(), ConfigurationError> {
    if id.is_empty() {
        return Err(ConfigurationError::MissingId { kind });
    }
    if options.is_empty() {
        return Err(ConfigurationError::EmptyGroup { kind, id: id.to_owned() });
    }
    if options.iter().any(|o| o.id.is_empty()) {
        return Err(ConfigurationError::MissingId { kind });
    }
    Ok(())
}

fn apply_checked(options: &mut [ToggleOption], target: &str, fields: &Override, exclusive: bool) -> bool {
    let Some(index) = options.iter().position(|o| o.id == target) else {
        return false;
    };
    if let Some(checked) = fields.checked {
        if checked && exclusive {
            for option in options.iter_mut() {
                option.checked = false;
            }
        }
        options[index].checked = checked;
    }
    true
}

/// Sparse fields merged into a descriptor before render. Only present fields apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Override {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
}

impl Override {
    /// Override only the initial value.
    #[must_use]
    pub fn value(value: f64) -> Self {
        Self { value: Some(value), ..Self::default() }
    }
}

/// Overrides keyed by control or option id.
pub type Overrides = HashMap<String, Override>;

/// Apply `overrides` to matching descriptors in place.
///
/// Returns the override ids that matched nothing, sorted, so callers can warn.
pub fn apply_overrides(descriptors: &mut [ControlDescriptor], overrides: &Overrides) -> Vec<String> {
    let mut unmatched = Vec::new();
    for (target, fields) in overrides {
        let mut matched = false;
        for descriptor in descriptors.iter_mut() {
            matched |= descriptor.apply_override(target, fields);
        }
        if !matched {
            unmatched.push(target.clone());
        }
    }
    unmatched.sort();
    unmatched
}
