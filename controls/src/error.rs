//! Error taxonomy for panel construction and scale-table recompute.
//!
//! Construction-time problems surface as [`ConfigurationError`] and are fatal
//! to a single control. Recompute problems surface as [`ShapeMismatchError`]
//! and are fatal to a single recompute cycle; the table keeps its last good
//! render. [`Error`] is the umbrella type returned by fallible entry points.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// A malformed or incomplete control descriptor, or an id collision.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// A descriptor (or one of its options) has an empty id.
    #[error("{kind} descriptor is missing an id")]
    MissingId { kind: &'static str },
    /// A radio group has no shared group name.
    #[error("radio group `{id}` is missing a group name")]
    MissingGroupName { id: String },
    /// A checkbox or radio group has no options.
    #[error("{kind} group `{id}` has no options")]
    EmptyGroup { kind: &'static str, id: String },
    /// A slider bound or value is NaN or infinite.
    #[error("slider `{id}` has a non-finite {field}")]
    NonFinite { id: String, field: &'static str },
    /// Slider bounds are inverted.
    #[error("slider `{id}` has min {min} greater than max {max}")]
    InvertedBounds { id: String, min: f64, max: f64 },
    /// Slider step is zero or negative.
    #[error("slider `{id}` has non-positive step {step}")]
    NonPositiveStep { id: String, step: f64 },
    /// Slider value lies outside `[min, max]`.
    #[error("slider `{id}` value {value} is outside [{min}, {max}]")]
    ValueOutOfRange { id: String, value: f64, min: f64, max: f64 },
    /// More than one radio option is marked checked.
    #[error("radio group `{id}` has {count} checked options")]
    MultipleChecked { id: String, count: usize },
    /// Two controls (or options) in one panel share an id.
    #[error("duplicate control id `{0}`")]
    DuplicateId(String),
    /// No element with the container id exists in the document.
    #[error("container `{0}` not found")]
    MissingContainer(String),
    /// A binder names an id that is not a slider in the panel.
    #[error("`{0}` is not a slider in this panel")]
    UnknownSlider(String),
    /// A table was constructed with inconsistent label/value shapes.
    #[error("table `{table_id}`: {detail}")]
    TableShape { table_id: String, detail: String },
}

/// A calculation result whose shape differs from the constructed table grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("table `{table_id}` expected {expected}, got {actual}")]
pub struct ShapeMismatchError {
    pub table_id: String,
    /// Human-readable expected shape, e.g. `rows [4, 4, 4]`.
    pub expected: String,
    /// Human-readable actual shape.
    pub actual: String,
}

/// A host UI-tree operation failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The node handle does not refer to a live element.
    #[error("unknown node {0}")]
    UnknownNode(String),
    /// The host rejected the operation.
    #[error("host error: {0}")]
    Host(String),
}

/// Umbrella error for fallible entry points.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    ShapeMismatch(#[from] ShapeMismatchError),
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// A slider input holds text that does not parse as a number.
    #[error("control `{id}` holds non-numeric value `{raw}`")]
    NonNumeric { id: String, raw: String },
    /// A JSON payload (descriptors, overrides, matrices) failed to parse.
    #[error("invalid JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
