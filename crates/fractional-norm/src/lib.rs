#![deny(unsafe_code)]
//! Fractional-norm wake combination.
//!
//! Combines a base flow field with a turbine's wake through a variable norm
//! of order `p`:
//!
//! ```text
//! combined = (wake^p + base^p)^(1/p)
//! ```
//!
//! `p = 1` is linear superposition; larger `p` damps the overestimation of
//! overlapping wakes and tends to `max(base, wake)` as `p` grows. The tuned
//! default `p = 1.5` sits between the two. Fields are expected to be
//! non-negative; a negative value with a non-integer `p` yields NaN.

pub mod norm_order;

pub use norm_order::NormOrder;

use serde_json::{json, Value};
use wake_combine_core::diagnostics::{DiagnosticSink, LogSink, ParamDeviation};
use wake_combine_core::error::CombinationError;
use wake_combine_core::field::FlowField;
use wake_combine_core::params::{expect_float, require, resolve_params};
use wake_combine_core::Combination;

/// Identifier reported to the owning solver.
pub const MODEL_STRING: &str = "fracnorm";
/// Tuned root and power of the norm.
pub const DEFAULT_NORM_ORDER: f64 = 1.5;
/// Tuned exponent applied to the number of wakes influencing a turbine.
pub const DEFAULT_WAKE_WEIGHT: f64 = 1.0;

/// Tuned defaults as a JSON object, the base for [`resolve_params`].
pub fn default_parameters() -> Value {
    json!({
        "norm_order": DEFAULT_NORM_ORDER,
        "wake_weight": DEFAULT_WAKE_WEIGHT,
    })
}

/// Typed parameters for [`FractionalNorm`].
#[derive(Debug, Clone, PartialEq)]
pub struct FractionalNormParams {
    /// Root and power of the norm, global or per turbine.
    pub norm_order: NormOrder,
    /// Exponent applied to the count of wakes influencing a turbine.
    pub wake_weight: f64,
}

impl Default for FractionalNormParams {
    fn default() -> Self {
        Self {
            norm_order: NormOrder::Uniform(DEFAULT_NORM_ORDER),
            wake_weight: DEFAULT_WAKE_WEIGHT,
        }
    }
}

/// Fractional-norm combination strategy.
///
/// Parameters are fixed after construction except through the `set_*` and
/// `assign_*` methods, which validate the value and report a
/// [`ParamDeviation`] whenever it differs from the tuned default.
#[derive(Debug, Clone)]
pub struct FractionalNorm {
    norm_order: NormOrder,
    wake_weight: f64,
}

impl FractionalNorm {
    /// Creates the strategy from typed parameters, logging deviations.
    pub fn new(params: FractionalNormParams) -> Result<Self, CombinationError> {
        Self::with_sink(params, &mut LogSink)
    }

    /// Creates the strategy from typed parameters, reporting deviations to `sink`.
    pub fn with_sink(
        params: FractionalNormParams,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Self, CombinationError> {
        let mut strategy = Self::tuned();
        strategy.assign_norm_order(params.norm_order, sink)?;
        strategy.assign_wake_weight(params.wake_weight, sink)?;
        strategy.log_constructed();
        Ok(strategy)
    }

    /// Creates the strategy from a JSON configuration, logging deviations.
    ///
    /// Missing keys fall back to [`default_parameters`]; unrecognized keys
    /// are ignored.
    pub fn from_json(config: &Value) -> Result<Self, CombinationError> {
        Self::from_json_with_sink(config, &mut LogSink)
    }

    /// Creates the strategy from a JSON configuration, reporting deviations to `sink`.
    pub fn from_json_with_sink(
        config: &Value,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Self, CombinationError> {
        let resolved = resolve_params(&default_parameters(), Some(config));
        let mut strategy = Self::tuned();
        strategy.set_norm_order(require(&resolved, "norm_order")?, sink)?;
        strategy.set_wake_weight(require(&resolved, "wake_weight")?, sink)?;
        strategy.log_constructed();
        Ok(strategy)
    }

    fn tuned() -> Self {
        let defaults = FractionalNormParams::default();
        Self {
            norm_order: defaults.norm_order,
            wake_weight: defaults.wake_weight,
        }
    }

    fn log_constructed(&self) {
        log::debug!(
            "{MODEL_STRING} combination: norm_order={}, wake_weight={:?}",
            self.norm_order,
            self.wake_weight
        );
    }

    /// Current root and power of the norm.
    pub fn norm_order(&self) -> &NormOrder {
        &self.norm_order
    }

    /// Current wake-count exponent.
    pub fn wake_weight(&self) -> f64 {
        self.wake_weight
    }

    /// Parses and stores `norm_order` from JSON. See [`NormOrder::from_value`].
    pub fn set_norm_order(
        &mut self,
        value: &Value,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<(), CombinationError> {
        self.assign_norm_order(NormOrder::from_value(value)?, sink)
    }

    /// Stores a validated `norm_order`, reporting a deviation from the tuned value.
    pub fn assign_norm_order(
        &mut self,
        norm_order: NormOrder,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<(), CombinationError> {
        norm_order.validate()?;
        if !norm_order.is_tuned(DEFAULT_NORM_ORDER) {
            sink.advisory(ParamDeviation {
                param: "norm_order",
                value: norm_order.to_string(),
                tuned: format!("{DEFAULT_NORM_ORDER:?}"),
            });
        }
        self.norm_order = norm_order;
        Ok(())
    }

    /// Stores `wake_weight` from JSON, rejecting anything that is not a float.
    ///
    /// Integers are rejected too: `2` is a type error, `2.0` is accepted.
    pub fn set_wake_weight(
        &mut self,
        value: &Value,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<(), CombinationError> {
        self.assign_wake_weight(expect_float("wake_weight", value)?, sink)
    }

    /// Stores `wake_weight`, reporting a deviation from the tuned value.
    pub fn assign_wake_weight(
        &mut self,
        wake_weight: f64,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<(), CombinationError> {
        if !wake_weight.is_finite() {
            return Err(CombinationError::InvalidParamValue {
                name: "wake_weight".to_owned(),
                reason: format!("must be finite, got {wake_weight:?}"),
            });
        }
        if wake_weight != DEFAULT_WAKE_WEIGHT {
            sink.advisory(ParamDeviation {
                param: "wake_weight",
                value: format!("{wake_weight:?}"),
                tuned: format!("{DEFAULT_WAKE_WEIGHT:?}"),
            });
        }
        self.wake_weight = wake_weight;
        Ok(())
    }

    /// Effective wake count `n_wakes^wake_weight` for a turbine influenced by
    /// `n_wakes` upstream wakes.
    pub fn weighted_wake_count(&self, n_wakes: usize) -> f64 {
        (n_wakes as f64).powf(self.wake_weight)
    }
}

impl Combination for FractionalNorm {
    fn model_string(&self) -> &'static str {
        MODEL_STRING
    }

    fn combine(
        &self,
        base: &FlowField,
        wake: &FlowField,
        turbine: Option<usize>,
    ) -> Result<FlowField, CombinationError> {
        let p = self.norm_order.for_turbine(turbine)?;
        let root = p.recip();
        base.zip_map(wake, |b, w| (w.powf(p) + b.powf(p)).powf(root))
    }

    fn params(&self) -> Value {
        json!({
            "norm_order": self.norm_order.to_value(),
            "wake_weight": self.wake_weight,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "norm_order": {
                "type": ["number", "array", "object"],
                "default": DEFAULT_NORM_ORDER,
                "exclusive_min": 0.0,
                "description": "Root and power of the fractional norm; a number for all turbines, or per-turbine values keyed by turbine index"
            },
            "wake_weight": {
                "type": "number",
                "default": DEFAULT_WAKE_WEIGHT,
                "description": "Exponent applied to the number of wakes influencing a turbine"
            }
        })
    }
}
