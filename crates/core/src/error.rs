//! Error types for wake combination.

use thiserror::Error;

/// Errors produced by field construction, parameter assignment and combination.
#[derive(Debug, Error)]
pub enum CombinationError {
    /// The shape was empty, had a zero extent, or its element count overflowed.
    #[error("invalid shape: every extent must be non-zero")]
    InvalidShape,

    /// Two fields (or a shape and its data) had incompatible sizes.
    #[error("shape mismatch: {lhs:?} vs {rhs:?}")]
    ShapeMismatch { lhs: Vec<usize>, rhs: Vec<usize> },

    /// A requested parameter name was not found in the params object.
    #[error("parameter not found: {0}")]
    ParamNotFound(String),

    /// A parameter existed but had the wrong JSON type.
    #[error("invalid parameter type for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// A parameter had the right type but an unusable value.
    #[error("invalid value for '{name}': {reason}")]
    InvalidParamValue { name: String, reason: String },

    /// A per-turbine parameter has no entry for the requested turbine.
    #[error("no per-turbine value configured for turbine {index}")]
    TurbineIndexMissing { index: usize },

    /// A per-turbine parameter was queried without a turbine index.
    #[error("a turbine index is required for per-turbine parameters")]
    TurbineIndexRequired,

    /// The requested combination model string is not registered.
    #[error("unknown combination model: {0}")]
    UnknownModel(String),

    /// Reading or writing a field file failed.
    #[error("i/o error: {0}")]
    Io(String),

    /// A field file did not contain a valid field.
    #[error("parse error: {0}")]
    Parse(String),

    /// A field could not be written as JSON.
    #[error("serialization error: {0}")]
    Serialize(String),
}
