//! Headless scale-table evaluation.
//!
//! Builds a calculator page in memory, moves the requested sliders the way a
//! browser range input would (clamped to its bounds), runs one recompute and
//! reports what the page would show.

#[cfg(test)]
#[path = "scales_test.rs"]
mod scales_test;

use calculators::Page;
use calculators::pages::slider_id;
use controls::factory::Rendered;
use controls::format::{format_inferred, format_inferred_strip};
use controls::{MemoryTree, PanelBuilder, ScaleTable, UiTree, bind};
use serde::Serialize;

use crate::CliError;
use crate::page::layout;

/// Container id used for headless evaluation.
const CONTAINER: &str = "scales";

/// One `--set` request, before it is matched against the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub slider: String,
    pub value: f64,
}

/// Parse `<slider>=<value>`.
///
/// # Errors
///
/// Returns [`CliError::InvalidAssignment`] if either side is missing or the
/// value is not a finite number.
pub fn parse_assignment(raw: &str) -> Result<Assignment, CliError> {
    let invalid = || CliError::InvalidAssignment(raw.to_owned());
    let (slider, value) = raw.split_once('=').ok_or_else(invalid)?;
    let slider = slider.trim();
    let value = value.trim().parse::<f64>().map_err(|_| invalid())?;
    if slider.is_empty() || !value.is_finite() {
        return Err(invalid());
    }
    Ok(Assignment { slider: slider.to_owned(), value })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderReading {
    pub id: String,
    /// Raw input value (the exponent for log sliders).
    pub value: f64,
    pub physical: f64,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub label: String,
    pub value: Option<f64>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleReport {
    pub page: String,
    pub title: String,
    pub sliders: Vec<SliderReading>,
    pub rows: Vec<Vec<Cell>>,
    pub inferred: Vec<Cell>,
}

/// Evaluate `page` with the given slider positions.
///
/// Slider names may be given as the page key (`L`) or the full id
/// (`L-slider`). Values outside a slider's bounds are clamped.
///
/// # Errors
///
/// Returns [`CliError::UnknownSlider`] for names the page does not have,
/// plus any build or recompute error.
pub fn evaluate(page: &'static Page, assignments: &[Assignment]) -> Result<ScaleReport, CliError> {
    let mut tree = MemoryTree::new();
    let layout = layout(&mut tree, CONTAINER)?;
    let panel = PanelBuilder::new(&layout.controls_id)
        .controls(page.descriptors(CONTAINER))
        .build(&mut tree)?;
    let table = ScaleTable::build(&mut tree, page.table_spec(CONTAINER))?;

    let ids = page.slider_ids(CONTAINER);
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let mut binding = bind(&panel, &id_refs, page.calc_fn(), table)?;
    if let Some(infer) = page.infer_fn() {
        binding = binding.with_inferred(infer);
    }

    for assignment in assignments {
        let (id, slider) = page
            .sliders
            .iter()
            .map(|s| (slider_id(CONTAINER, s.key), s))
            .find(|(id, s)| {
                let name = assignment.slider.as_str();
                s.key == name || *id == name || slider_id("", s.key) == name
            })
            .ok_or_else(|| CliError::UnknownSlider(assignment.slider.clone()))?;
        let Some(Rendered::Slider { input, .. }) = panel.control(&id).map(|c| &c.rendered) else {
            return Err(CliError::UnknownSlider(assignment.slider.clone()));
        };
        let value = assignment.value.clamp(slider.min, slider.max);
        if !(slider.min..=slider.max).contains(&assignment.value) {
            tracing::warn!(slider = %id, requested = assignment.value, value, "value clamped to slider bounds");
        }
        tree.set_value(input, &value.to_string())?;
        panel.on_input(&mut tree, &id)?;
    }
    let written = binding.recompute(&mut tree)?;
    tracing::debug!(page = page.name, written, "scale table evaluated");

    let sliders = ids
        .iter()
        .filter_map(|id| panel.control(id))
        .map(|control| {
            let output = match &control.rendered {
                Rendered::Slider { output, .. } => tree.text(output),
                Rendered::Toggles { .. } | Rendered::Text { .. } => String::new(),
            };
            Ok(SliderReading {
                id: control.id.clone(),
                value: control.current_value(&tree)?,
                physical: control.physical_value(&tree)?,
                output,
            })
        })
        .collect::<Result<Vec<_>, controls::Error>>()?;

    let table = binding.table();
    let rows: Vec<Vec<Cell>> = table
        .labels()
        .iter()
        .zip(table.values())
        .zip(table.rendered())
        .map(|((labels, values), texts)| {
            labels
                .iter()
                .zip(values)
                .zip(texts)
                .map(|((label, value), text)| Cell { label: label.clone(), value: *value, text: text.clone() })
                .collect()
        })
        .collect();
    let inferred: Vec<Cell> = table
        .inferred_labels()
        .iter()
        .zip(table.inferred_values())
        .map(|(label, value)| Cell { label: label.clone(), value: *value, text: format_inferred(label, *value) })
        .collect();

    Ok(ScaleReport { page: page.name.to_owned(), title: page.title.to_owned(), sliders, rows, inferred })
}

/// Plain-text rendering of a report.
#[must_use]
pub fn format_report(report: &ScaleReport) -> String {
    let mut lines = vec![report.title.clone()];
    for slider in &report.sliders {
        lines.push(format!("  {:<24} {}", slider.id, slider.output));
    }
    for (i, row) in report.rows.iter().enumerate() {
        lines.push(format!("row {}", i + 1));
        for cell in row {
            let text = if cell.text.is_empty() { "-" } else { cell.text.as_str() };
            lines.push(format!("  {:<48} {text}", cell.label));
        }
    }
    if !report.inferred.is_empty() {
        let labels: Vec<String> = report.inferred.iter().map(|c| c.label.clone()).collect();
        let values: Vec<Option<f64>> = report.inferred.iter().map(|c| c.value).collect();
        lines.push(format!("inferred: {}", format_inferred_strip(&labels, &values)));
    }
    lines.push(String::new());
    lines.join("\n")
}
