//! Recompute binder: wires slider values to a calculation and a scale table.
//!
//! Every recompute reads the live value of every bound slider, not just the
//! one that changed, so rapid or reordered input events always settle on a
//! render consistent with the final slider state. Log-scale sliders are
//! converted to physical values (`10^v`) before the calculation sees them.

#[cfg(test)]
#[path = "binder_test.rs"]
mod binder_test;

use crate::error::{ConfigurationError, Error, ShapeMismatchError};
use crate::factory::RenderedControl;
use crate::panel::Panel;
use crate::table::{ScaleTable, ValueGrid};
use crate::tree::UiTree;

/// Pure calculation producing the table grid from physical slider values.
pub type CalcFn = Box<dyn Fn(&[f64]) -> ValueGrid>;

/// Pure calculation producing the inferred-scale strip.
pub type InferFn = Box<dyn Fn(&[f64]) -> Vec<Option<f64>>>;

/// A table bound to an ordered list of sliders.
pub struct Binding<N> {
    sliders: Vec<RenderedControl<N>>,
    calc: CalcFn,
    infer: Option<InferFn>,
    table: ScaleTable<N>,
}

/// Bind `slider_ids` (in calculation argument order) to `calc` and `table`.
///
/// # Errors
///
/// Returns [`ConfigurationError::UnknownSlider`] if an id is not a slider in
/// `panel`.
pub fn bind<N: Clone>(
    panel: &Panel<N>,
    slider_ids: &[&str],
    calc: CalcFn,
    table: ScaleTable<N>,
) -> Result<Binding<N>, ConfigurationError> {
    let sliders = slider_ids
        .iter()
        .map(|id| {
            panel
                .control(id)
                .filter(|c| c.is_slider())
                .cloned()
                .ok_or_else(|| ConfigurationError::UnknownSlider((*id).to_owned()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!("bound {} sliders to table `{}`", sliders.len(), table.table_id());
    Ok(Binding { sliders, calc, infer: None, table })
}

impl<N: Clone> Binding<N> {
    /// Also drive the table's inferred-scale strip from `infer`.
    #[must_use]
    pub fn with_inferred(mut self, infer: InferFn) -> Self {
        self.infer = Some(infer);
        self
    }

    /// Bound slider ids in argument order.
    #[must_use]
    pub fn slider_ids(&self) -> Vec<&str> {
        self.sliders.iter().map(|s| s.id.as_str()).collect()
    }

    /// Whether `id` is one of the bound sliders.
    #[must_use]
    pub fn is_bound(&self, id: &str) -> bool {
        self.sliders.iter().any(|s| s.id == id)
    }

    #[must_use]
    pub fn table(&self) -> &ScaleTable<N> {
        &self.table
    }

    /// Physical values of every bound slider, read live.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonNumeric`] if an input holds unparsable text.
    pub fn read_inputs<T: UiTree<Node = N>>(&self, tree: &T) -> Result<Vec<f64>, Error> {
        self.sliders.iter().map(|s| s.physical_value(tree)).collect()
    }

    /// Full recompute: read every slider, run the calculations, update the table.
    ///
    /// Both result shapes are checked before anything is written, so a failed
    /// cycle leaves the previous render in place. Returns the number of
    /// cells and slots rewritten.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] for mis-shaped results, plus read and
    /// tree errors.
    pub fn recompute<T: UiTree<Node = N>>(&mut self, tree: &mut T) -> Result<usize, Error> {
        let inputs = self.read_inputs(tree)?;
        let values = (self.calc)(&inputs);
        let inferred = self.infer.as_ref().map(|infer| infer(&inputs));

        if let Some(inferred) = &inferred {
            let expected = self.table.registry().inferred_len();
            if inferred.len() != expected {
                return Err(ShapeMismatchError {
                    table_id: self.table.table_id().to_owned(),
                    expected: format!("{expected} inferred scales"),
                    actual: format!("{} inferred scales", inferred.len()),
                }
                .into());
            }
        }

        let mut written = self.table.update(tree, values)?;
        if let Some(inferred) = inferred {
            written += self.table.update_inferred(tree, inferred)?;
        }
        Ok(written)
    }

    /// Handle an `input` event on `changed_id`: refresh its output, then recompute.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownSlider`] if `changed_id` is not
    /// bound, plus everything [`Self::recompute`] returns.
    pub fn on_input<T: UiTree<Node = N>>(&mut self, tree: &mut T, changed_id: &str) -> Result<usize, Error> {
        let slider = self
            .sliders
            .iter()
            .find(|s| s.id == changed_id)
            .ok_or_else(|| ConfigurationError::UnknownSlider(changed_id.to_owned()))?;
        slider.refresh_output(tree)?;
        self.recompute(tree)
    }
}
