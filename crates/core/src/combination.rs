//! The `Combination` trait that every wake combination strategy implements.
//!
//! The trait is object-safe so strategies can be selected at runtime from a
//! model string and used as `dyn Combination`.

use crate::error::CombinationError;
use crate::field::FlowField;
use serde_json::Value;

/// Merges a turbine's wake into a base flow field.
///
/// Implementations are pure transforms once constructed: `combine` reads
/// both fields and returns a new one of the same shape.
///
/// This trait is **object-safe**: you can use `Box<dyn Combination>` or
/// `&dyn Combination` for runtime polymorphism.
pub trait Combination {
    /// Identifier used by the owning solver to select and log the strategy.
    fn model_string(&self) -> &'static str;

    /// Combines `wake` into `base` for the turbine at `turbine`.
    ///
    /// Shapes must match; otherwise `CombinationError::ShapeMismatch` is
    /// returned. Per-turbine parameters may also fail the lookup for
    /// `turbine`.
    fn combine(
        &self,
        base: &FlowField,
        wake: &FlowField,
        turbine: Option<usize>,
    ) -> Result<FlowField, CombinationError>;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types and defaults.
    fn param_schema(&self) -> Value;
}
