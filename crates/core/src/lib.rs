#![deny(unsafe_code)]
//! Core types and traits for wake combination.
//!
//! Provides the `Combination` trait, the `FlowField` array type, parameter
//! resolution against strategy defaults, and the advisory diagnostics channel
//! used when parameters depart from their tuned values.

pub mod combination;
pub mod diagnostics;
pub mod error;
pub mod field;
pub mod params;

pub use combination::Combination;
pub use diagnostics::{DiagnosticSink, LogSink, ParamDeviation};
pub use error::CombinationError;
pub use field::FlowField;
pub use params::resolve_params;
