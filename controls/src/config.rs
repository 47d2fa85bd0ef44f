//! Physical scale configuration shared by the slider presets of one panel.
//!
//! Dimensional and non-dimensional slider pairs must agree numerically: the
//! non-dimensional `f / omega` slider spans exactly the dimensional `f` range
//! divided by `omega`, and both step through the same fraction of their range.
//! That relationship is captured here as an immutable value passed into each
//! panel build, so two panels on one page can use different scales.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DEPTH_M, DEFAULT_STEP_RATIO, SECONDS_PER_DAY};

/// Reference scales for a panel's slider presets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalScaleConfig {
    /// Reference angular frequency in s⁻¹ (diurnal by default).
    pub omega: f64,
    /// Slider step as a fraction of the slider's range.
    pub step_ratio: f64,
    /// Reference vertical scale in metres.
    pub depth: f64,
}

impl Default for PhysicalScaleConfig {
    fn default() -> Self {
        Self {
            omega: 2.0 * PI / SECONDS_PER_DAY,
            step_ratio: DEFAULT_STEP_RATIO,
            depth: DEFAULT_DEPTH_M,
        }
    }
}

/// Bounds, initial value and step for one slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub value: f64,
    pub step: f64,
}

impl SliderRange {
    fn new(min: f64, max: f64, value: f64, step_ratio: f64) -> Self {
        Self { min, max, value, step: (max - min) * step_ratio }
    }

    /// The same range expressed in units of `scale`.
    #[must_use]
    pub fn divided_by(self, scale: f64) -> Self {
        Self {
            min: self.min / scale,
            max: self.max / scale,
            value: self.value / scale,
            step: self.step / scale,
        }
    }
}

impl PhysicalScaleConfig {
    /// Dimensional time in seconds: two reference periods.
    #[must_use]
    pub fn time(&self) -> SliderRange {
        SliderRange::new(0.0, 4.0 * PI / self.omega, 0.0, self.step_ratio)
    }

    /// Coriolis parameter `f` in s⁻¹.
    #[must_use]
    pub fn coriolis(&self) -> SliderRange {
        SliderRange::new(0.0, 2.0 * self.omega, 0.5 * self.omega, self.step_ratio)
    }

    /// Damping rate `alpha` in s⁻¹.
    #[must_use]
    pub fn damping(&self) -> SliderRange {
        SliderRange::new(1e-2 * self.omega, 2.0 * self.omega, 0.2 * self.omega, self.step_ratio)
    }

    /// Buoyancy frequency `N` in s⁻¹.
    #[must_use]
    pub fn buoyancy_frequency(&self) -> SliderRange {
        SliderRange::new(1e-1 * self.omega, 0.1, 1e-2, self.step_ratio)
    }

    /// Heating depth `H` in metres.
    #[must_use]
    pub fn depth(&self) -> SliderRange {
        SliderRange { min: 100.0, max: 5e3, value: self.depth, step: 100.0 }
    }

    /// Heating amplitude `Q_0` in m s⁻³.
    #[must_use]
    pub fn heating(&self) -> SliderRange {
        SliderRange { min: 1e-6, max: 1e-4, value: 1.2e-5, step: 1e-6 }
    }

    /// Non-dimensional time `t * omega`.
    #[must_use]
    pub fn time_non_dim(&self) -> SliderRange {
        let t = self.time();
        SliderRange::new(0.0, t.max * self.omega, 0.0, self.step_ratio)
    }
}
