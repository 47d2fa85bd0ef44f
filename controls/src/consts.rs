//! Shared constants for the controls crate.

// ── Physical defaults ───────────────────────────────────────────

/// Length of a day in seconds.
pub const SECONDS_PER_DAY: f64 = 24.0 * 3600.0;

/// Default slider step as a fraction of the slider's range.
pub const DEFAULT_STEP_RATIO: f64 = 5e-3;

/// Default reference depth in metres.
pub const DEFAULT_DEPTH_M: f64 = 1e3;

// ── Class names ─────────────────────────────────────────────────

/// Class on every control row.
pub const ROW_CLASS: &str = "control-row";

/// Class on the container of checkbox options.
pub const CHECKBOX_GROUP_CLASS: &str = "checkbox-group";

/// Class on each checkbox wrapper.
pub const CHECKBOX_BUTTON_CLASS: &str = "checkbox-button";

/// Class on the container of radio options.
pub const RADIO_GROUP_CLASS: &str = "radio-group";

/// Class on each radio wrapper.
pub const RADIO_BUTTON_CLASS: &str = "radio-button";

/// Display class for dimensional controls.
pub const DIMENSIONAL_CLASS: &str = "dimensional";

/// Display class for non-dimensional controls.
pub const NON_DIMENSIONAL_CLASS: &str = "non-dimensional";

/// Container tag while the panel shows dimensional controls.
pub const DIMENSIONAL_MODE_TAG: &str = "dimensional-mode";

/// Container tag while the panel shows non-dimensional controls.
pub const NON_DIMENSIONAL_MODE_TAG: &str = "non-dimensional-mode";

/// Class on the scale table element.
pub const SCALE_TABLE_CLASS: &str = "scale-table";

/// Class on label spans inside scale-table cells.
pub const SCALE_LABEL_CLASS: &str = "scale-label";

/// Class on value spans inside scale-table cells.
pub const SCALE_VALUE_CLASS: &str = "scale-value";

/// Class on the inferred-scale strip.
pub const INFERRED_STRIP_CLASS: &str = "inferred-scales";

/// Class on separators between inferred-scale slots.
pub const INFERRED_SEPARATOR_CLASS: &str = "inferred-separator";

// ── Ids ─────────────────────────────────────────────────────────

/// Suffix of slider input ids; replaced by [`OUTPUT_SUFFIX`] for the output.
pub const SLIDER_SUFFIX: &str = "-slider";

/// Suffix of slider output ids.
pub const OUTPUT_SUFFIX: &str = "-out";

/// Shared name of the coordinate toggle radios (prefixed by container id).
pub const COORDINATES_GROUP: &str = "coordinates";
