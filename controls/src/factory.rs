//! Control factory: turns a validated descriptor into a rendered control row.
//!
//! Each row is a `div.control-row` holding a label plus the control itself.
//! Sliders pair a range input with an `<output>` whose text follows the
//! formatting rules in [`crate::format`]; groups pair a label with one
//! wrapper per option. The factory writes nodes only: the current value of a
//! control always lives in its input element and is read back on demand.

#[cfg(test)]
#[path = "factory_test.rs"]
mod factory_test;

use crate::consts::{
    CHECKBOX_BUTTON_CLASS, CHECKBOX_GROUP_CLASS, OUTPUT_SUFFIX, RADIO_BUTTON_CLASS, RADIO_GROUP_CLASS, ROW_CLASS,
    SLIDER_SUFFIX,
};
use crate::descriptor::{CheckboxGroupSpec, ControlDescriptor, RadioGroupSpec, SliderScale, SliderSpec, TextSpec};
use crate::error::{ConfigurationError, Error};
use crate::format::{format_log_output, format_output};
use crate::tree::UiTree;

/// How a slider's output element displays the input's value.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputFormat {
    /// Linear value: exponential with a unit, fixed-point from `step` without.
    Linear { unit: Option<String>, step: f64 },
    /// Exponent: displayed as `10^value`.
    Log { unit: Option<String> },
}

impl OutputFormat {
    fn for_slider(spec: &SliderSpec) -> Self {
        match spec.scale {
            SliderScale::Linear => Self::Linear { unit: spec.unit.clone(), step: spec.step },
            SliderScale::Log => Self::Log { unit: spec.unit.clone() },
        }
    }

    /// Display text for a raw slider value.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Linear { unit, step } => format_output(value, unit.as_deref(), *step),
            Self::Log { unit } => format_log_output(value, unit.as_deref()),
        }
    }

    /// Convert a raw slider value into the physical quantity.
    #[must_use]
    pub fn physical(&self, value: f64) -> f64 {
        match self {
            Self::Linear { .. } => value,
            Self::Log { .. } => 10f64.powf(value),
        }
    }
}

/// The live nodes of one rendered control.
#[derive(Debug, Clone)]
pub enum Rendered<N> {
    Slider { input: N, output: N, format: OutputFormat },
    /// Checkbox or radio options, as `(option id, input node)` in order.
    Toggles { inputs: Vec<(String, N)> },
    Text { input: N },
}

/// One control row as placed in the tree, addressable by id.
#[derive(Debug, Clone)]
pub struct RenderedControl<N> {
    pub id: String,
    pub row: N,
    pub display_class: Option<String>,
    pub rendered: Rendered<N>,
}

impl<N: Clone> RenderedControl<N> {
    /// Whether this is a slider.
    #[must_use]
    pub fn is_slider(&self) -> bool {
        matches!(self.rendered, Rendered::Slider { .. })
    }

    /// Raw slider value read live from the input element.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownSlider`] for non-sliders and
    /// [`Error::NonNumeric`] if the input holds unparsable text.
    pub fn current_value<T: UiTree<Node = N>>(&self, tree: &T) -> Result<f64, Error> {
        let Rendered::Slider { input, .. } = &self.rendered else {
            return Err(ConfigurationError::UnknownSlider(self.id.clone()).into());
        };
        let raw = tree.value(input);
        raw.trim()
            .parse::<f64>()
            .map_err(|_| Error::NonNumeric { id: self.id.clone(), raw })
    }

    /// Physical slider value: the raw value, or `10^raw` for log-scale sliders.
    ///
    /// # Errors
    ///
    /// Same as [`Self::current_value`].
    pub fn physical_value<T: UiTree<Node = N>>(&self, tree: &T) -> Result<f64, Error> {
        let raw = self.current_value(tree)?;
        match &self.rendered {
            Rendered::Slider { format, .. } => Ok(format.physical(raw)),
            Rendered::Toggles { .. } | Rendered::Text { .. } => Ok(raw),
        }
    }

    /// Recompute a slider's output text from its input. No-op for other kinds.
    ///
    /// # Errors
    ///
    /// Propagates read and tree errors.
    pub fn refresh_output<T: UiTree<Node = N>>(&self, tree: &mut T) -> Result<(), Error> {
        let Rendered::Slider { output, format, .. } = &self.rendered else {
            return Ok(());
        };
        let value = self.current_value(tree)?;
        tree.set_text(output, &format.format(value))?;
        Ok(())
    }

    /// Ids of the options currently checked, in order.
    #[must_use]
    pub fn checked_ids<T: UiTree<Node = N>>(&self, tree: &T) -> Vec<String> {
        match &self.rendered {
            Rendered::Toggles { inputs } => inputs
                .iter()
                .filter(|(_, node)| tree.checked(node))
                .map(|(id, _)| id.clone())
                .collect(),
            Rendered::Slider { .. } | Rendered::Text { .. } => Vec::new(),
        }
    }

    /// Raw input text for text and slider controls.
    #[must_use]
    pub fn raw_value<T: UiTree<Node = N>>(&self, tree: &T) -> String {
        match &self.rendered {
            Rendered::Slider { input, .. } | Rendered::Text { input } => tree.value(input),
            Rendered::Toggles { .. } => String::new(),
        }
    }
}

/// Output element id for a slider id: `x-slider` becomes `x-out`, else `x-out` is appended.
#[must_use]
pub fn output_id(slider_id: &str) -> String {
    let stem = slider_id.strip_suffix(SLIDER_SUFFIX).unwrap_or(slider_id);
    format!("{stem}{OUTPUT_SUFFIX}")
}

/// Validate `descriptor` and build its row (detached; the caller appends it).
///
/// # Errors
///
/// Returns [`Error::Configuration`] for a malformed descriptor and
/// [`Error::Tree`] if the host rejects a node operation.
pub fn build_control<T: UiTree>(tree: &mut T, descriptor: &ControlDescriptor) -> Result<RenderedControl<T::Node>, Error> {
    descriptor.validate()?;
    match descriptor {
        ControlDescriptor::Slider(spec) => build_slider(tree, spec),
        ControlDescriptor::Checkbox(spec) => build_checkbox_group(tree, spec),
        ControlDescriptor::Radio(spec) => build_radio_group(tree, spec),
        ControlDescriptor::Text(spec) => build_text(tree, spec),
    }
}

fn start_row<T: UiTree>(tree: &mut T, label: &str, display_class: Option<&str>) -> Result<T::Node, Error> {
    let row = tree.create_element("div")?;
    tree.add_class(&row, ROW_CLASS)?;
    if let Some(class) = display_class.filter(|c| !c.is_empty()) {
        tree.add_class(&row, class)?;
    }
    let label_el = tree.create_element("label")?;
    tree.set_inner_html(&label_el, label)?;
    tree.append_child(&row, &label_el)?;
    Ok(row)
}

fn build_slider<T: UiTree>(tree: &mut T, spec: &SliderSpec) -> Result<RenderedControl<T::Node>, Error> {
    let row = start_row(tree, &spec.label, spec.display_class.as_deref())?;

    let input = tree.create_element("input")?;
    tree.set_attribute(&input, "type", "range")?;
    tree.set_attribute(&input, "id", &spec.id)?;
    tree.set_attribute(&input, "min", &spec.min.to_string())?;
    tree.set_attribute(&input, "max", &spec.max.to_string())?;
    tree.set_attribute(&input, "step", &spec.step.to_string())?;
    tree.append_child(&row, &input)?;
    // Value after min/max/step and attachment, or the host may clamp it to defaults.
    tree.set_value(&input, &spec.value.to_string())?;

    let format = OutputFormat::for_slider(spec);
    let output = tree.create_element("output")?;
    tree.set_attribute(&output, "id", &output_id(&spec.id))?;
    tree.set_text(&output, &format.format(spec.value))?;
    tree.append_child(&row, &output)?;

    Ok(RenderedControl {
        id: spec.id.clone(),
        row,
        display_class: spec.display_class.clone(),
        rendered: Rendered::Slider { input, output, format },
    })
}

struct GroupStyle<'a> {
    input_type: &'a str,
    container_class: &'a str,
    wrapper_class: &'a str,
    name: Option<&'a str>,
}

fn build_group<T: UiTree>(
    tree: &mut T,
    id: &str,
    label: &str,
    display_class: Option<&String>,
    options: &[crate::descriptor::ToggleOption],
    checked: impl Fn(usize) -> bool,
    style: &GroupStyle<'_>,
) -> Result<RenderedControl<T::Node>, Error> {
    let row = start_row(tree, label, display_class.map(String::as_str))?;

    let container = tree.create_element("div")?;
    tree.add_class(&container, style.container_class)?;
    tree.set_attribute(&container, "id", id)?;

    let mut inputs = Vec::with_capacity(options.len());
    for (index, option) in options.iter().enumerate() {
        let wrapper = tree.create_element("span")?;
        tree.add_class(&wrapper, style.wrapper_class)?;

        let input = tree.create_element("input")?;
        tree.set_attribute(&input, "type", style.input_type)?;
        tree.set_attribute(&input, "id", &option.id)?;
        if let Some(name) = style.name {
            tree.set_attribute(&input, "name", name)?;
        }
        if let Some(value) = &option.value {
            tree.set_attribute(&input, "value", value)?;
        }

        let option_label = tree.create_element("label")?;
        tree.set_attribute(&option_label, "for", &option.id)?;
        tree.set_inner_html(&option_label, &option.label)?;

        tree.append_child(&wrapper, &input)?;
        tree.append_child(&wrapper, &option_label)?;
        tree.append_child(&container, &wrapper)?;
        tree.set_checked(&input, checked(index))?;
        inputs.push((option.id.clone(), input));
    }
    tree.append_child(&row, &container)?;

    Ok(RenderedControl {
        id: id.to_owned(),
        row,
        display_class: display_class.cloned(),
        rendered: Rendered::Toggles { inputs },
    })
}

fn build_checkbox_group<T: UiTree>(tree: &mut T, spec: &CheckboxGroupSpec) -> Result<RenderedControl<T::Node>, Error> {
    let style = GroupStyle {
        input_type: "checkbox",
        container_class: CHECKBOX_GROUP_CLASS,
        wrapper_class: CHECKBOX_BUTTON_CLASS,
        name: None,
    };
    let checked = |i: usize| spec.options[i].checked;
    build_group(tree, &spec.id, &spec.label, spec.display_class.as_ref(), &spec.options, checked, &style)
}

fn build_radio_group<T: UiTree>(tree: &mut T, spec: &RadioGroupSpec) -> Result<RenderedControl<T::Node>, Error> {
    let style = GroupStyle {
        input_type: "radio",
        container_class: RADIO_GROUP_CLASS,
        wrapper_class: RADIO_BUTTON_CLASS,
        name: Some(&spec.name),
    };
    let selected = spec.checked_index();
    build_group(tree, &spec.id, &spec.label, spec.display_class.as_ref(), &spec.options, |i| i == selected, &style)
}

fn build_text<T: UiTree>(tree: &mut T, spec: &TextSpec) -> Result<RenderedControl<T::Node>, Error> {
    let row = start_row(tree, &spec.label, spec.display_class.as_deref())?;
    let input = tree.create_element("input")?;
    tree.set_attribute(&input, "type", "text")?;
    tree.set_attribute(&input, "id", &spec.id)?;
    tree.set_attribute(&input, "placeholder", &spec.placeholder)?;
    tree.append_child(&row, &input)?;
    tree.set_value(&input, &spec.value)?;
    Ok(RenderedControl {
        id: spec.id.clone(),
        row,
        display_class: spec.display_class.clone(),
        rendered: Rendered::Text { input },
    })
}
