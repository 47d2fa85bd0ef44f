//! Value formatting rules for slider outputs and scale-table cells.
//!
//! Three rules coexist:
//!
//! - **Output rule** ([`format_output`]): linear sliders with a unit show
//!   exponential notation with one fractional digit (`1.2e4 m`); unit-less
//!   sliders show fixed-point with a decimal count derived from their step.
//! - **Log output rule** ([`format_log_output`]): log-scale sliders hold an
//!   exponent and show `10^{v:.1} {unit}`.
//! - **Scale rule** ([`format_scale`]): table cells show the order of
//!   magnitude `10^{round(log10|v|, 1)} {unit}`; `null`, zero and non-finite
//!   values render empty.
//!
//! Table labels are TeX fragments; [`inline_math`] adds the `\(...\)`
//! delimiters the typesetter looks for.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// Number of decimals shown by a unit-less slider with the given step.
///
/// `max(0, -floor(log10(step)))`: a step of `0.01` gives 2, `1` gives 0.
/// Non-positive or non-finite steps give 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn decimals_for_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    let decimals = -step.log10().floor();
    if decimals <= 0.0 { 0 } else { decimals as usize }
}

/// Format a linear slider's displayed value.
///
/// Ties round away from zero in both notations (`0.25` at one decimal is
/// `0.3`), where Rust's own formatting would round them to even.
#[must_use]
pub fn format_output(value: f64, unit: Option<&str>, step: f64) -> String {
    match unit.filter(|u| !u.is_empty()) {
        Some(unit) => format!("{} {unit}", exponential_half_up(value)),
        None => {
            let decimals = decimals_for_step(step);
            let rounded = round_half_up(value, decimals);
            format!("{rounded:.decimals$}")
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn round_half_up(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// One-fractional-digit exponential notation, `1.3e0`.
#[allow(clippy::cast_possible_truncation)]
fn exponential_half_up(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return format!("{value:.1e}");
    }
    let mut exponent = value.abs().log10().floor() as i32;
    let mut mantissa = round_half_up(value / 10f64.powi(exponent), 1);
    if mantissa.abs() >= 10.0 {
        exponent += 1;
        mantissa = round_half_up(value / 10f64.powi(exponent), 1);
    }
    format!("{mantissa:.1}e{exponent}")
}

/// Format a log-scale slider's displayed value, `value` being the exponent.
#[must_use]
pub fn format_log_output(exponent: f64, unit: Option<&str>) -> String {
    match unit.filter(|u| !u.is_empty()) {
        Some(unit) => format!("10^{exponent:.1} {unit}"),
        None => format!("10^{exponent:.1}"),
    }
}

/// Order-of-magnitude exponent of `value`, rounded to one decimal.
///
/// Sign is dropped. Returns `None` for `null`, zero and non-finite values so
/// that `-inf` and `NaN` never reach the display.
#[must_use]
pub fn scale_exponent(value: Option<f64>) -> Option<f64> {
    let value = value?;
    if !value.is_finite() || value == 0.0 {
        return None;
    }
    let rounded = (value.abs().log10() * 10.0).round() / 10.0;
    // -0.0 + 0.0 == +0.0
    Some(rounded + 0.0)
}

/// Format one scale-table value cell.
#[must_use]
pub fn format_scale(value: Option<f64>, unit: &str) -> String {
    match scale_exponent(value) {
        None => String::new(),
        Some(exponent) if unit.is_empty() => format!("10^{exponent:.1}"),
        Some(exponent) => format!("10^{exponent:.1} {unit}"),
    }
}

/// Wrap a TeX fragment in inline-math delimiters.
///
/// Fragments already delimited with `\(` or `$` are returned unchanged, as
/// is the empty string.
#[must_use]
pub fn inline_math(tex: &str) -> String {
    let trimmed = tex.trim();
    if trimmed.is_empty() || trimmed.starts_with("\\(") || trimmed.starts_with('$') {
        return tex.to_owned();
    }
    format!("\\({trimmed}\\)")
}

/// Format one inferred-scale slot as `label = 10^exponent`, without unit.
#[must_use]
pub fn format_inferred(label: &str, value: Option<f64>) -> String {
    match scale_exponent(value) {
        None => String::new(),
        Some(exponent) => format!("{label} = 10^{exponent:.1}"),
    }
}

/// Format the whole inferred-scale strip: non-empty slots joined by commas.
#[must_use]
pub fn format_inferred_strip(labels: &[String], values: &[Option<f64>]) -> String {
    labels
        .iter()
        .zip(values)
        .map(|(label, value)| format_inferred(label, *value))
        .filter(|slot| !slot.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
