#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// decimals_for_step
// =============================================================

#[test]
fn decimals_follow_negative_power_of_ten() {
    for (step, expected) in [(1.0, 0), (0.1, 1), (0.01, 2), (0.001, 3), (1e-4, 4), (1e-5, 5)] {
        assert_eq!(decimals_for_step(step), expected, "step {step}");
    }
}

#[test]
fn decimals_round_down_between_powers() {
    assert_eq!(decimals_for_step(0.5), 1);
    assert_eq!(decimals_for_step(5e-3), 3);
    assert_eq!(decimals_for_step(0.25), 1);
}

#[test]
fn decimals_never_negative() {
    assert_eq!(decimals_for_step(2.0), 0);
    assert_eq!(decimals_for_step(10.0), 0);
    assert_eq!(decimals_for_step(100.0), 0);
}

#[test]
fn decimals_for_degenerate_steps() {
    assert_eq!(decimals_for_step(0.0), 0);
    assert_eq!(decimals_for_step(-0.1), 0);
    assert_eq!(decimals_for_step(f64::NAN), 0);
    assert_eq!(decimals_for_step(f64::INFINITY), 0);
}

// =============================================================
// format_output
// =============================================================

#[test]
fn output_with_unit_is_exponential() {
    assert_eq!(format_output(12_345.0, Some("m"), 1.0), "1.2e4 m");
    assert_eq!(format_output(0.000_12, Some("s⁻¹"), 1e-6), "1.2e-4 s⁻¹");
}

#[test]
fn output_without_unit_is_fixed_point() {
    assert_eq!(format_output(0.5, None, 0.01), "0.50");
    assert_eq!(format_output(3.0, None, 1.0), "3");
    assert_eq!(format_output(2.3, None, 0.1), "2.3");
}

#[test]
fn output_ties_round_away_from_zero() {
    assert_eq!(format_output(0.25, None, 0.1), "0.3");
    assert_eq!(format_output(-0.25, None, 0.1), "-0.3");
    assert_eq!(format_output(2.5, None, 1.0), "3");
    assert_eq!(format_output(1.25, Some("m"), 1.0), "1.3e0 m");
    assert_eq!(format_output(-125.0, Some("m"), 1.0), "-1.3e2 m");
}

#[test]
fn output_mantissa_carry_bumps_exponent() {
    assert_eq!(format_output(9.96, Some("m"), 1.0), "1.0e1 m");
    assert_eq!(format_output(0.0, Some("m"), 1.0), "0.0e0 m");
}

#[test]
fn output_with_empty_unit_is_fixed_point() {
    assert_eq!(format_output(0.5, Some(""), 0.1), "0.5");
}

#[test]
fn output_exponential_recovers_value_to_two_significant_digits() {
    for value in [1.0, 12_345.0, 0.000_731, 86_400.0, 4.2e-5, 987.0] {
        let text = format_output(value, Some("m"), 1.0);
        let mantissa = text.split_whitespace().next().unwrap_or_default();
        let parsed: f64 = mantissa.parse().unwrap_or(f64::NAN);
        let tolerance = 0.05 * 10f64.powf(value.abs().log10().floor());
        assert!((parsed - value).abs() <= tolerance, "{value} -> {text}");
    }
}

// =============================================================
// format_log_output
// =============================================================

#[test]
fn log_output_shows_power_of_ten() {
    assert_eq!(format_log_output(5.0, Some("Pa")), "10^5.0 Pa");
    assert_eq!(format_log_output(-3.0, Some("m")), "10^-3.0 m");
}

#[test]
fn log_output_without_unit() {
    assert_eq!(format_log_output(0.3, None), "10^0.3");
    assert_eq!(format_log_output(0.3, Some("")), "10^0.3");
}

// =============================================================
// scale_exponent / format_scale
// =============================================================

#[test]
fn exponent_rounds_to_one_decimal() {
    assert_eq!(scale_exponent(Some(5000.0)), Some(3.7));
    assert_eq!(scale_exponent(Some(100.0)), Some(2.0));
}

#[test]
fn exponent_drops_sign() {
    assert_eq!(scale_exponent(Some(-100.0)), scale_exponent(Some(100.0)));
}

#[test]
fn exponent_undefined_for_null_zero_and_non_finite() {
    assert_eq!(scale_exponent(None), None);
    assert_eq!(scale_exponent(Some(0.0)), None);
    assert_eq!(scale_exponent(Some(-0.0)), None);
    assert_eq!(scale_exponent(Some(f64::NAN)), None);
    assert_eq!(scale_exponent(Some(f64::INFINITY)), None);
    assert_eq!(scale_exponent(Some(f64::NEG_INFINITY)), None);
}

#[test]
fn scale_cells_match_reference_examples() {
    assert_eq!(format_scale(Some(100.0), "m"), "10^2.0 m");
    assert_eq!(format_scale(Some(0.001), "s"), "10^-3.0 s");
    assert_eq!(format_scale(Some(5000.0), "s"), "10^3.7 s");
}

#[test]
fn scale_null_and_zero_render_identically_empty() {
    assert_eq!(format_scale(None, "m"), "");
    assert_eq!(format_scale(Some(0.0), "m"), format_scale(None, "m"));
    assert!(!format_scale(Some(f64::NAN), "m").contains("NaN"));
    assert!(!format_scale(Some(0.0), "m").contains("inf"));
}

#[test]
fn scale_near_one_has_no_negative_zero() {
    assert_eq!(format_scale(Some(0.99), ""), "10^0.0");
    assert_eq!(format_scale(Some(1.0), "m"), "10^0.0 m");
}

#[test]
fn scale_without_unit_has_no_trailing_space() {
    assert_eq!(format_scale(Some(10.0), ""), "10^1.0");
}

// =============================================================
// Inferred strip
// =============================================================

#[test]
fn inferred_slot_has_label_and_no_unit() {
    assert_eq!(format_inferred("T", Some(1000.0)), "T = 10^3.0");
    assert_eq!(format_inferred("\\Delta P", Some(-10.0)), "\\Delta P = 10^1.0");
}

#[test]
fn inline_math_adds_delimiters_once() {
    assert_eq!(inline_math("\\Delta P"), "\\(\\Delta P\\)");
    assert_eq!(inline_math("\\(L:\\)"), "\\(L:\\)");
    assert_eq!(inline_math("$x$"), "$x$");
    assert_eq!(inline_math(""), "");
}

#[test]
fn inferred_slot_empty_when_undefined() {
    assert_eq!(format_inferred("T", None), "");
    assert_eq!(format_inferred("T", Some(0.0)), "");
}

#[test]
fn inferred_strip_joins_defined_slots() {
    let labels = vec!["T".to_owned(), "H".to_owned(), "P".to_owned()];
    let strip = format_inferred_strip(&labels, &[Some(10.0), None, Some(1e5)]);
    assert_eq!(strip, "T = 10^1.0, P = 10^5.0");
}

#[test]
fn inferred_strip_all_null_is_empty() {
    let labels = vec!["T".to_owned(), "H".to_owned()];
    assert_eq!(format_inferred_strip(&labels, &[None, None]), "");
}
