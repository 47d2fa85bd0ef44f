use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1e-12)
}

/// L = 1 km, U = W = 10 m/s, P̄ = 1e5 Pa, R̄ = 1 kg/m³.
fn reference() -> Vec<f64> {
    vec![1e3, 10.0, 10.0, 1e5, 1.0]
}

// =============================================================
// Inferred scales
// =============================================================

#[test]
fn time_and_height_follow_from_velocities() {
    let scales = inferred_scales(&reference());
    assert_eq!(scales.len(), INFERRED_LABELS.len());
    assert!(close(scales[0].unwrap(), 100.0));
    assert!(close(scales[1].unwrap(), 1000.0));
}

#[test]
fn pressure_scale_takes_the_larger_balance() {
    // Advection dominates Coriolis at these scales: ΔP = R̄U².
    let scales = inferred_scales(&reference());
    assert!(close(scales[2].unwrap(), 100.0));

    // At 1000 km Coriolis wins: ΔP = R̄fUL.
    let scales = inferred_scales(&[1e6, 10.0, 0.01, 1e5, 1.0]);
    assert!(close(scales[2].unwrap(), CORIOLIS * 10.0 * 1e6));
}

#[test]
fn density_and_buoyancy_scales() {
    let scales = inferred_scales(&reference());
    let del_rho = 100.0 / (GRAVITY * 1000.0);
    assert!(close(scales[3].unwrap(), del_rho));
    let del_phi = (1.0 / GAMMA) * (1.0 + 100.0 / 1e5_f64).ln() - (1.0 + del_rho).ln();
    assert!(close(scales[4].unwrap(), del_phi));
    assert!(del_phi < 0.0);
}

#[test]
fn perturbation_larger_than_base_state_is_null() {
    let scales = inferred_scales(&[1e3, 100.0, 10.0, 1e3, 1.0]);
    assert_eq!(scales, vec![None; 5]);
}

#[test]
fn wrong_arity_is_null() {
    assert_eq!(inferred_scales(&[1.0, 2.0]), vec![None; 5]);
    assert!(Scales::from_inputs(&[]).is_none());
}

// =============================================================
// Table values
// =============================================================

#[test]
fn table_has_three_rows_of_four() {
    let grid = table_values(&reference());
    assert_eq!(grid.len(), ROWS);
    assert!(grid.iter().all(|row| row.len() == TERMS));
    assert!(grid.iter().flatten().all(Option::is_some));
}

#[test]
fn momentum_terms() {
    let grid = table_values(&reference());
    // U/T and the horizontal pressure gradient balance.
    assert!(close(grid[0][0].unwrap(), 0.1));
    assert!(close(grid[0][1].unwrap(), CORIOLIS * 10.0));
    assert!(close(grid[0][2].unwrap(), 0.1));
    // W/T and the vertical pressure gradient.
    assert!(close(grid[1][0].unwrap(), 0.1));
    assert!(close(grid[1][2].unwrap(), 0.1));
}

#[test]
fn continuity_terms() {
    let grid = table_values(&reference());
    let del_rho = 100.0 / (GRAVITY * 1000.0);
    assert!(close(grid[2][0].unwrap(), del_rho / 100.0));
    assert!(close(grid[2][1].unwrap(), 0.01));
    assert_eq!(grid[2][1], grid[2][2]);
    assert_eq!(grid[2][0], grid[2][3]);
}

#[test]
fn residual_is_small_and_negative() {
    let grid = table_values(&reference());
    let r_3_term = grid[0][3].unwrap();
    assert!(r_3_term < 0.0);
    assert!(r_3_term.abs() < grid[0][2].unwrap());
}

#[test]
fn inconsistent_scales_null_the_whole_grid() {
    let grid = table_values(&[1e3, 100.0, 10.0, 1e3, 1.0]);
    assert_eq!(grid, vec![vec![None; TERMS]; ROWS]);
    assert_eq!(table_values(&[1.0]), vec![vec![None; TERMS]; ROWS]);
}
