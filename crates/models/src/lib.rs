#![deny(unsafe_code)]
//! Combination registry: maps model strings to strategies, plus JSON field I/O.
//!
//! This crate sits between `wake-combine-core` (which defines the
//! `Combination` trait) and the individual strategy crates
//! (`wake-combine-fractional-norm`, etc.). The CLI and any owning solver
//! select strategies through [`CombinationKind`] instead of matching on
//! model strings themselves.

pub mod field_io;

use serde_json::Value;
use wake_combine_core::error::CombinationError;
use wake_combine_core::field::FlowField;
use wake_combine_core::Combination;
use wake_combine_fractional_norm::FractionalNorm;

/// All registered model strings.
const MODEL_NAMES: &[&str] = &[wake_combine_fractional_norm::MODEL_STRING];

/// Enumeration of all available combination strategies.
///
/// Wraps each strategy and delegates `Combination` trait methods.
/// Use [`CombinationKind::from_name`] for string-based construction.
#[derive(Debug, Clone)]
pub enum CombinationKind {
    /// Fractional norm of variable order.
    FractionalNorm(FractionalNorm),
}

impl CombinationKind {
    /// Constructs a strategy by model string from a JSON configuration.
    ///
    /// Returns `CombinationError::UnknownModel` if the name is not recognized,
    /// or the strategy's own validation error if the configuration is rejected.
    pub fn from_name(name: &str, config: &Value) -> Result<Self, CombinationError> {
        match name {
            wake_combine_fractional_norm::MODEL_STRING => Ok(CombinationKind::FractionalNorm(
                FractionalNorm::from_json(config)?,
            )),
            _ => Err(CombinationError::UnknownModel(name.to_string())),
        }
    }

    /// Returns a slice of all recognized model strings.
    pub fn list_models() -> &'static [&'static str] {
        MODEL_NAMES
    }
}

impl Combination for CombinationKind {
    fn model_string(&self) -> &'static str {
        match self {
            CombinationKind::FractionalNorm(c) => c.model_string(),
        }
    }

    fn combine(
        &self,
        base: &FlowField,
        wake: &FlowField,
        turbine: Option<usize>,
    ) -> Result<FlowField, CombinationError> {
        match self {
            CombinationKind::FractionalNorm(c) => c.combine(base, wake, turbine),
        }
    }

    fn params(&self) -> Value {
        match self {
            CombinationKind::FractionalNorm(c) => c.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            CombinationKind::FractionalNorm(c) => c.param_schema(),
        }
    }
}
