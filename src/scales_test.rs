use super::*;

fn anelastic() -> &'static Page {
    calculators::by_name("anelastic").unwrap()
}

fn set(slider: &str, value: f64) -> Assignment {
    Assignment { slider: slider.to_owned(), value }
}

// =============================================================
// --set parsing
// =============================================================

#[test]
fn parses_assignments() {
    assert_eq!(parse_assignment("L=4").unwrap(), set("L", 4.0));
    assert_eq!(parse_assignment(" U = -1.5 ").unwrap(), set("U", -1.5));
}

#[test]
fn rejects_malformed_assignments() {
    for raw in ["L", "=4", "L=", "L=abc", "L=inf"] {
        assert!(
            matches!(parse_assignment(raw), Err(CliError::InvalidAssignment(ref r)) if r == raw),
            "{raw}"
        );
    }
}

// =============================================================
// Evaluation
// =============================================================

#[test]
fn defaults_match_the_initial_render() {
    let report = evaluate(anelastic(), &[]).unwrap();
    assert_eq!(report.page, "anelastic");
    assert_eq!(report.sliders.len(), 5);
    assert_eq!(report.sliders[0].output, "10^3.0 m");
    assert!((report.sliders[0].physical - 1e3).abs() < 1e-9);
    assert_eq!(report.rows.len(), 3);
    assert_eq!(report.rows[0][0].text, "10^-1.0 m s<sup>-2</sup>");
    assert_eq!(report.inferred[0].text, "T = 10^2.0");
}

#[test]
fn sliders_accept_keys_and_ids() {
    let by_key = evaluate(anelastic(), &[set("U", 0.0)]).unwrap();
    let by_id = evaluate(anelastic(), &[set("U-slider", 0.0)]).unwrap();
    assert_eq!(by_key, by_id);
    assert_eq!(by_key.rows[0][0].text, "10^-3.0 m s<sup>-2</sup>");
    assert_eq!(by_key.sliders[1].output, "10^0.0 m s⁻¹");
}

#[test]
fn out_of_range_values_are_clamped() {
    let report = evaluate(anelastic(), &[set("L", 42.0)]).unwrap();
    assert!((report.sliders[0].value - 6.0).abs() < f64::EPSILON);
}

#[test]
fn unknown_slider_is_an_error() {
    let result = evaluate(anelastic(), &[set("Q", 1.0)]);
    assert!(matches!(result, Err(CliError::UnknownSlider(ref name)) if name == "Q"));
}

#[test]
fn inconsistent_scales_blank_the_table() {
    // U = 100 m/s with R̄ = 10^0.5 puts ΔP = R̄U² above P̄ = 1e4.
    let report = evaluate(anelastic(), &[set("U", 2.0), set("P_bar", 4.0), set("R_bar", 0.5)]).unwrap();
    assert!(report.rows.iter().flatten().all(|cell| cell.value.is_none() && cell.text.is_empty()));
    assert!(report.inferred.iter().all(|cell| cell.value.is_none()));
}

#[test]
fn plain_text_report() {
    let report = evaluate(calculators::by_name("buoyancy").unwrap(), &[]).unwrap();
    let text = format_report(&report);
    assert!(text.starts_with("Buoyancy decomposition\n"));
    assert!(text.contains("scales-del_p-slider"));
    assert!(text.contains("row 1"));
    assert!(!text.contains("inferred:"));
}
