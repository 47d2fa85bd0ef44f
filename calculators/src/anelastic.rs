//! Anelastic scale analysis.
//!
//! From a horizontal length `L`, horizontal and vertical velocities `U` and
//! `W`, and base-state pressure and density `P̄` and `R̄`, infer the time,
//! height, pressure, density and buoyancy scales, then size every term of
//! the horizontal momentum, vertical momentum and continuity equations.

#[cfg(test)]
#[path = "anelastic_test.rs"]
mod anelastic_test;

use controls::ValueGrid;

use crate::consts::{CORIOLIS, GAMMA, GRAVITY};

/// Number of slider inputs: `L, U, W, P̄, R̄`.
pub const ARITY: usize = 5;
/// Number of terms per table row.
pub const TERMS: usize = 4;
/// Number of table rows.
pub const ROWS: usize = 3;

/// Input scales in argument order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scales {
    pub length: f64,
    pub velocity: f64,
    pub vertical_velocity: f64,
    pub pressure: f64,
    pub density: f64,
}

impl Scales {
    /// Unpack `[L, U, W, P̄, R̄]`; `None` for any other arity.
    #[must_use]
    pub fn from_inputs(inputs: &[f64]) -> Option<Self> {
        match *inputs {
            [length, velocity, vertical_velocity, pressure, density] => Some(Self {
                length,
                velocity,
                vertical_velocity,
                pressure,
                density,
            }),
            _ => {
                log::warn!("anelastic calculator expects {ARITY} inputs, got {}", inputs.len());
                None
            }
        }
    }
}

/// Scales implied by the inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inferred {
    pub time: f64,
    pub height: f64,
    pub del_p: f64,
    pub del_rho: f64,
    pub del_phi: f64,
}

impl Inferred {
    /// Infer `T, H, ΔP, ΔR, ΔΦ`.
    ///
    /// `ΔP` balances the larger of advection and Coriolis in the horizontal
    /// momentum equation; `ΔR` the larger of the vertical acceleration and the
    /// vertical pressure gradient. Returns `None` when either perturbation
    /// exceeds its base state.
    #[must_use]
    pub fn from_scales(s: &Scales) -> Option<Self> {
        let time = s.length / s.velocity;
        let height = s.vertical_velocity * time;
        let del_p = (s.density * s.velocity.powi(2)).max(s.density * CORIOLIS * s.velocity * s.length);
        let del_rho = (s.vertical_velocity * s.density / (GRAVITY * time)).max(del_p / (GRAVITY * height));

        if del_p > s.pressure || del_rho > s.density {
            return None;
        }

        let del_phi = (1.0 / GAMMA) * ((s.pressure + del_p) / s.pressure).ln() - ((s.density + del_rho) / s.density).ln();
        Some(Self { time, height, del_p, del_rho, del_phi })
    }

    fn to_vec(self) -> Vec<Option<f64>> {
        vec![Some(self.time), Some(self.height), Some(self.del_p), Some(self.del_rho), Some(self.del_phi)]
    }
}

/// Labels of the inferred-scale strip, in [`inferred_scales`] order.
pub const INFERRED_LABELS: [&str; 5] = ["T", "H", "\\Delta P", "\\Delta R", "\\Delta \\Phi"];

/// `[T, H, ΔP, ΔR, ΔΦ]`, all `None` when the scales are inconsistent or the
/// arity is wrong.
#[must_use]
pub fn inferred_scales(inputs: &[f64]) -> Vec<Option<f64>> {
    Scales::from_inputs(inputs)
        .as_ref()
        .and_then(Inferred::from_scales)
        .map_or_else(|| vec![None; INFERRED_LABELS.len()], Inferred::to_vec)
}

/// Term magnitudes for the u-momentum, w-momentum and continuity rows.
///
/// Every cell is `None` when [`inferred_scales`] would be.
#[must_use]
pub fn table_values(inputs: &[f64]) -> ValueGrid {
    let Some(scales) = Scales::from_inputs(inputs) else {
        return empty_grid();
    };
    let Some(inferred) = Inferred::from_scales(&scales) else {
        return empty_grid();
    };
    terms(&scales, &inferred)
}

fn terms(s: &Scales, i: &Inferred) -> ValueGrid {
    let (p_bar, r_bar) = (s.pressure, s.density);

    // Residuals of linearising the log pressure and density perturbations.
    let del_phi_1 = (1.0 / GAMMA) * (i.del_p / p_bar);
    let del_phi_2 = -(i.del_rho / r_bar);
    let r_1 = (1.0 / GAMMA) * ((p_bar + i.del_p) / p_bar).ln() - del_phi_1;
    let r_2 = -((r_bar + i.del_rho) / r_bar).ln() - del_phi_2;
    let r_3 = 1.0 / (r_bar + i.del_rho) - 1.0 / r_bar;
    let r_4 = -GRAVITY * r_1 - GRAVITY * r_2 + r_3 * (-i.del_p / i.height - GRAVITY * i.del_rho);

    let u_momentum = [
        s.velocity / i.time,
        CORIOLIS * s.velocity,
        (1.0 / r_bar) * (i.del_p / s.length),
        r_3 * i.del_p / s.length,
    ];
    let w_momentum = [
        s.vertical_velocity / i.time,
        GRAVITY * i.del_phi,
        i.del_p / r_bar / i.height,
        r_4,
    ];
    let continuity = [i.del_rho / i.time, r_bar / i.time, r_bar / i.time, i.del_rho / i.time];

    [u_momentum, w_momentum, continuity]
        .into_iter()
        .map(|row| row.into_iter().map(Some).collect())
        .collect()
}

fn empty_grid() -> ValueGrid {
    vec![vec![None; TERMS]; ROWS]
}
