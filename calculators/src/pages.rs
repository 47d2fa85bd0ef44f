//! Calculator pages: sliders, table layout and calculation, as one unit.

#[cfg(test)]
#[path = "pages_test.rs"]
mod pages_test;

use controls::presets::prefixed;
use controls::{CalcFn, ControlDescriptor, InferFn, SliderSpec, TableSpec, ValueGrid};

use crate::consts::EXPONENT_STEP;
use crate::{anelastic, buoyancy};

/// One log-scale slider. Bounds and the starting value are decimal exponents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSlider {
    pub key: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub exponent: f64,
    pub unit: &'static str,
}

impl ScaleSlider {
    fn descriptor(&self, prefix: &str) -> ControlDescriptor {
        SliderSpec::new(&slider_id(prefix, self.key), self.label, self.min, self.max, self.exponent, EXPONENT_STEP)
            .with_unit(self.unit)
            .log_scale()
            .into()
    }
}

/// A calculator page.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub name: &'static str,
    pub title: &'static str,
    /// Sliders in calculation argument order.
    pub sliders: &'static [ScaleSlider],
    pub labels: &'static [&'static [&'static str]],
    pub units: &'static [&'static [&'static str]],
    pub inferred_labels: &'static [&'static str],
    pub calc: fn(&[f64]) -> ValueGrid,
    pub infer: Option<fn(&[f64]) -> Vec<Option<f64>>>,
}

// Slider outputs are plain text; table cells take markup.
const MOMENTUM_UNIT: &str = "m s<sup>-2</sup>";
const DENSITY_UNIT: &str = "kg m⁻³";
const VELOCITY_UNIT: &str = "m s⁻¹";

pub static ANELASTIC: Page = Page {
    name: "anelastic",
    title: "Anelastic scale analysis",
    sliders: &[
        ScaleSlider { key: "L", label: "\\(L:\\)", min: -3.0, max: 6.0, exponent: 3.0, unit: "m" },
        ScaleSlider { key: "U", label: "\\(U:\\)", min: -3.0, max: 2.0, exponent: 1.0, unit: VELOCITY_UNIT },
        ScaleSlider { key: "W", label: "\\(W:\\)", min: -3.0, max: 2.0, exponent: 1.0, unit: VELOCITY_UNIT },
        ScaleSlider { key: "P_bar", label: "\\(\\overline{P}:\\)", min: 4.0, max: 6.0, exponent: 5.0, unit: "Pa" },
        ScaleSlider { key: "R_bar", label: "\\(\\overline{R}:\\)", min: -3.0, max: 0.5, exponent: 0.0, unit: DENSITY_UNIT },
    ],
    labels: &[
        &[
            "\\frac{D \\mathbf{u}}{D t}",
            "f\\mathbf{k}\\times \\mathbf{u}",
            "-\\frac{1}{\\overline{\\rho}} \\nabla_h \\delta p",
            "R_3 \\nabla_h \\delta p",
        ],
        &[
            "\\frac{D w}{D t}",
            "g\\delta \\phi",
            "-\\frac{\\partial }{\\partial z}\\left(\\frac{\\delta p}{\\overline{\\rho}}\\right)",
            "R_4",
        ],
        &[
            "\\frac{\\partial \\delta \\rho}{\\partial t}",
            "\\nabla_h \\cdot (\\overline{\\rho} \\mathbf{u})",
            "\\frac{\\partial }{\\partial z}(\\overline{\\rho} w)",
            "\\nabla \\cdot (\\delta \\rho \\mathbf{v})",
        ],
    ],
    units: &[&[MOMENTUM_UNIT], &[MOMENTUM_UNIT], &["kg m<sup>-3</sup> s<sup>-1</sup>"]],
    inferred_labels: &anelastic::INFERRED_LABELS,
    calc: anelastic::table_values,
    infer: Some(anelastic::inferred_scales),
};

pub static BUOYANCY: Page = Page {
    name: "buoyancy",
    title: "Buoyancy decomposition",
    sliders: &[
        ScaleSlider { key: "del_p", label: "\\(\\delta p:\\)", min: 0.0, max: 6.0, exponent: 4.0, unit: "Pa" },
        ScaleSlider { key: "p_bar", label: "\\(\\overline{p}:\\)", min: 0.0, max: 6.0, exponent: 5.0, unit: "Pa" },
        ScaleSlider { key: "del_rho", label: "\\(\\delta \\rho:\\)", min: -3.0, max: 0.5, exponent: -1.0, unit: DENSITY_UNIT },
        ScaleSlider { key: "rho_bar", label: "\\(\\overline{\\rho}:\\)", min: -3.0, max: 0.5, exponent: 0.0, unit: DENSITY_UNIT },
    ],
    labels: &[&[
        "\\delta \\phi",
        "\\frac{1}{\\gamma}\\frac{\\delta p}{\\overline{p}}",
        "-\\frac{\\delta \\rho}{\\overline{\\rho}}",
        "R_1 + R_2",
    ]],
    units: &[],
    inferred_labels: &[],
    calc: buoyancy::table_values,
    infer: None,
};

/// Every page, in listing order.
pub static PAGES: [&Page; 2] = [&ANELASTIC, &BUOYANCY];

/// Look a page up by name.
#[must_use]
pub fn by_name(name: &str) -> Option<&'static Page> {
    PAGES.iter().copied().find(|page| page.name == name)
}

/// `{prefix}-{key}-slider`, or `{key}-slider` without a prefix.
#[must_use]
pub fn slider_id(prefix: &str, key: &str) -> String {
    prefixed(prefix, &format!("{key}-slider"))
}

impl Page {
    /// Slider descriptors for a page rendered inside `prefix`.
    #[must_use]
    pub fn descriptors(&self, prefix: &str) -> Vec<ControlDescriptor> {
        self.sliders.iter().map(|s| s.descriptor(prefix)).collect()
    }

    /// Slider ids in calculation argument order.
    #[must_use]
    pub fn slider_ids(&self, prefix: &str) -> Vec<String> {
        self.sliders.iter().map(|s| slider_id(prefix, s.key)).collect()
    }

    /// Physical values at the sliders' starting positions.
    #[must_use]
    pub fn initial_inputs(&self) -> Vec<f64> {
        self.sliders.iter().map(|s| 10f64.powf(s.exponent)).collect()
    }

    #[must_use]
    pub fn table_id(&self, prefix: &str) -> String {
        prefixed(prefix, "scale-table")
    }

    /// Table construction data, with values computed at the starting positions.
    #[must_use]
    pub fn table_spec(&self, prefix: &str) -> TableSpec {
        let inputs = self.initial_inputs();
        TableSpec {
            table_id: self.table_id(prefix),
            labels: owned(self.labels),
            values: (self.calc)(&inputs),
            units: owned(self.units),
            inferred_labels: self.inferred_labels.iter().map(|s| (*s).to_owned()).collect(),
            inferred_values: self.infer.map(|infer| infer(&inputs)).unwrap_or_default(),
        }
    }

    /// The table calculation, boxed for the binder.
    #[must_use]
    pub fn calc_fn(&self) -> CalcFn {
        Box::new(self.calc)
    }

    /// The inferred-scale calculation, boxed for the binder.
    #[must_use]
    pub fn infer_fn(&self) -> Option<InferFn> {
        self.infer.map(|infer| Box::new(infer) as InferFn)
    }
}

fn owned(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter().map(|row| row.iter().map(|s| (*s).to_owned()).collect()).collect()
}
