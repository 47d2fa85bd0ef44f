//! Thermodynamic and planetary constants.

use std::f64::consts::PI;

/// Specific heat at constant pressure (J kg⁻¹ K⁻¹).
pub const C_P: f64 = 1005.0;
/// Specific heat at constant volume (J kg⁻¹ K⁻¹).
pub const C_V: f64 = 718.0;
pub const GAMMA: f64 = C_P / C_V;
/// Gas constant for dry air (J kg⁻¹ K⁻¹).
pub const R_DRY: f64 = C_P - C_V;
/// Gravitational acceleration (m s⁻²).
pub const GRAVITY: f64 = 9.81;
/// Earth's rotation rate (rad s⁻¹).
pub const OMEGA: f64 = 2.0 * PI / (24.0 * 3600.0);
/// Coriolis parameter used by the calculators.
pub const CORIOLIS: f64 = OMEGA;

/// Default step of every page slider, in decades.
pub const EXPONENT_STEP: f64 = 0.1;
