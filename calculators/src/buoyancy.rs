//! Buoyancy decomposition.
//!
//! The anelastic buoyancy `δφ = (1/γ) ln(1 + δp/p̄) - ln(1 + δρ/ρ̄)` splits
//! into a pressure part, a density part and the residual left by
//! linearising both logarithms. The table shows the size of each.

#[cfg(test)]
#[path = "buoyancy_test.rs"]
mod buoyancy_test;

use controls::ValueGrid;

use crate::consts::GAMMA;

/// Number of slider inputs: `δp, p̄, δρ, ρ̄`.
pub const ARITY: usize = 4;

/// The buoyancy and its linearised parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decomposition {
    pub del_phi: f64,
    /// `(1/γ) δp/p̄`
    pub pressure: f64,
    /// `-δρ/ρ̄`
    pub density: f64,
    /// `R₁ + R₂`
    pub residual: f64,
}

impl Decomposition {
    #[must_use]
    pub fn new(del_p: f64, p_bar: f64, del_rho: f64, rho_bar: f64) -> Self {
        let log_p = (1.0 / GAMMA) * ((p_bar + del_p) / p_bar).ln();
        let log_rho = -((rho_bar + del_rho) / rho_bar).ln();
        let pressure = (1.0 / GAMMA) * (del_p / p_bar);
        let density = -(del_rho / rho_bar);
        Self {
            del_phi: log_p + log_rho,
            pressure,
            density,
            residual: (log_p - pressure) + (log_rho - density),
        }
    }
}

/// One row: `[δφ, pressure part, density part, residual]`.
#[must_use]
pub fn table_values(inputs: &[f64]) -> ValueGrid {
    let [del_p, p_bar, del_rho, rho_bar] = *inputs else {
        log::warn!("buoyancy calculator expects {ARITY} inputs, got {}", inputs.len());
        return vec![vec![None; 4]];
    };
    let d = Decomposition::new(del_p, p_bar, del_rho, rho_bar);
    vec![vec![Some(d.del_phi), Some(d.pressure), Some(d.density), Some(d.residual)]]
}
