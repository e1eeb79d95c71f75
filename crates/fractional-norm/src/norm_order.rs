//! Global or per-turbine exponent of the fractional norm.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};
use wake_combine_core::error::CombinationError;
use wake_combine_core::params::{expect_f64, json_type_name};

const PARAM: &str = "norm_order";

/// Root and power used by the fractional norm.
///
/// A uniform order broadcasts to every turbine. A per-turbine order must have
/// an entry for each turbine it is queried with.
#[derive(Debug, Clone, PartialEq)]
pub enum NormOrder {
    /// One order shared by all turbines.
    Uniform(f64),
    /// Orders keyed by turbine index.
    PerTurbine(BTreeMap<usize, f64>),
}

impl NormOrder {
    /// Parses a JSON number, array or object into a validated order.
    ///
    /// - a number is a uniform order;
    /// - an array assigns element `i` to turbine `i`;
    /// - an object maps decimal turbine-index keys to orders.
    ///
    /// Every order must be finite and strictly positive.
    pub fn from_value(value: &Value) -> Result<Self, CombinationError> {
        let order = match value {
            Value::Number(_) => NormOrder::Uniform(expect_f64(PARAM, value)?),
            Value::Array(items) => NormOrder::PerTurbine(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| expect_f64(&format!("{PARAM}[{i}]"), v).map(|p| (i, p)))
                    .collect::<Result<_, CombinationError>>()?,
            ),
            Value::Object(entries) => NormOrder::PerTurbine(
                entries
                    .iter()
                    .map(|(key, v)| {
                        key.parse::<usize>()
                            .map_err(|_| CombinationError::InvalidParamValue {
                                name: PARAM.to_owned(),
                                reason: format!("key '{key}' is not a turbine index"),
                            })
                            .and_then(|index| {
                                expect_f64(&format!("{PARAM}[{key}]"), v).map(|p| (index, p))
                            })
                    })
                    .collect::<Result<_, CombinationError>>()?,
            ),
            other => {
                return Err(CombinationError::ParamTypeMismatch {
                    name: PARAM.to_owned(),
                    expected: "number, array or object".to_owned(),
                    got: json_type_name(other).to_owned(),
                })
            }
        };
        order.validate()?;
        Ok(order)
    }

    /// Checks that the order set is non-empty and every order is finite and positive.
    pub fn validate(&self) -> Result<(), CombinationError> {
        let check = |p: f64| {
            if p.is_finite() && p > 0.0 {
                Ok(())
            } else {
                Err(CombinationError::InvalidParamValue {
                    name: PARAM.to_owned(),
                    reason: format!("order must be finite and positive, got {p:?}"),
                })
            }
        };
        match self {
            NormOrder::Uniform(p) => check(*p),
            NormOrder::PerTurbine(orders) if orders.is_empty() => {
                Err(CombinationError::InvalidParamValue {
                    name: PARAM.to_owned(),
                    reason: "per-turbine orders must not be empty".to_owned(),
                })
            }
            NormOrder::PerTurbine(orders) => orders.values().try_for_each(|&p| check(p)),
        }
    }

    /// The order to use for `turbine`.
    ///
    /// A uniform order answers for any turbine, including none. A per-turbine
    /// order needs an index that is present in its map.
    pub fn for_turbine(&self, turbine: Option<usize>) -> Result<f64, CombinationError> {
        match (self, turbine) {
            (NormOrder::Uniform(p), _) => Ok(*p),
            (NormOrder::PerTurbine(_), None) => Err(CombinationError::TurbineIndexRequired),
            (NormOrder::PerTurbine(orders), Some(index)) => orders
                .get(&index)
                .copied()
                .ok_or(CombinationError::TurbineIndexMissing { index }),
        }
    }

    /// True only for a uniform order equal to `tuned`.
    pub fn is_tuned(&self, tuned: f64) -> bool {
        matches!(self, NormOrder::Uniform(p) if *p == tuned)
    }

    /// JSON form: a number, or an object keyed by turbine index.
    pub fn to_value(&self) -> Value {
        match self {
            NormOrder::Uniform(p) => Value::from(*p),
            NormOrder::PerTurbine(orders) => Value::Object(
                orders
                    .iter()
                    .map(|(i, p)| (i.to_string(), Value::from(*p)))
                    .collect::<Map<_, _>>(),
            ),
        }
    }
}

impl fmt::Display for NormOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormOrder::Uniform(p) => write!(f, "{p:?}"),
            NormOrder::PerTurbine(orders) => {
                write!(f, "{{")?;
                for (n, (i, p)) in orders.iter().enumerate() {
                    if n > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{i}: {p:?}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn number_parses_as_uniform() {
        assert_eq!(
            NormOrder::from_value(&json!(2.0)).unwrap(),
            NormOrder::Uniform(2.0)
        );
        assert_eq!(
            NormOrder::from_value(&json!(3)).unwrap(),
            NormOrder::Uniform(3.0)
        );
    }

    #[test]
    fn array_parses_as_per_turbine_by_position() {
        let order = NormOrder::from_value(&json!([1.5, 2.0, 3.0])).unwrap();
        assert_eq!(order.for_turbine(Some(0)).unwrap(), 1.5);
        assert_eq!(order.for_turbine(Some(2)).unwrap(), 3.0);
    }

    #[test]
    fn object_parses_turbine_index_keys() {
        let order = NormOrder::from_value(&json!({"0": 1.0, "4": 2.5})).unwrap();
        assert_eq!(order.for_turbine(Some(4)).unwrap(), 2.5);
        assert!(matches!(
            order.for_turbine(Some(1)),
            Err(CombinationError::TurbineIndexMissing { index: 1 })
        ));
    }

    #[test]
    fn object_with_non_index_key_is_rejected() {
        assert!(matches!(
            NormOrder::from_value(&json!({"first": 1.0})),
            Err(CombinationError::InvalidParamValue { .. })
        ));
    }

    #[test]
    fn string_is_rejected_with_type_mismatch() {
        match NormOrder::from_value(&json!("steep")) {
            Err(CombinationError::ParamTypeMismatch { name, got, .. }) => {
                assert_eq!(name, "norm_order");
                assert_eq!(got, "string");
            }
            other => panic!("expected type mismatch, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_element_names_its_position() {
        match NormOrder::from_value(&json!([1.0, true])) {
            Err(CombinationError::ParamTypeMismatch { name, .. }) => {
                assert_eq!(name, "norm_order[1]");
            }
            other => panic!("expected type mismatch, got {other:?}"),
        }
    }

    #[test]
    fn non_positive_orders_are_rejected() {
        assert!(NormOrder::from_value(&json!(0.0)).is_err());
        assert!(NormOrder::from_value(&json!(-1.5)).is_err());
        assert!(NormOrder::from_value(&json!([2.0, 0.0])).is_err());
        assert!(NormOrder::Uniform(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn empty_per_turbine_is_rejected() {
        assert!(NormOrder::from_value(&json!([])).is_err());
        assert!(NormOrder::from_value(&json!({})).is_err());
    }

    #[test]
    fn uniform_broadcasts_to_any_turbine() {
        let order = NormOrder::Uniform(1.5);
        assert_eq!(order.for_turbine(None).unwrap(), 1.5);
        assert_eq!(order.for_turbine(Some(99)).unwrap(), 1.5);
    }

    #[test]
    fn per_turbine_requires_an_index() {
        let order = NormOrder::from_value(&json!([2.0])).unwrap();
        assert!(matches!(
            order.for_turbine(None),
            Err(CombinationError::TurbineIndexRequired)
        ));
    }

    #[test]
    fn is_tuned_only_for_matching_uniform() {
        assert!(NormOrder::Uniform(1.5).is_tuned(1.5));
        assert!(!NormOrder::Uniform(2.0).is_tuned(1.5));
        let all_tuned = NormOrder::PerTurbine(BTreeMap::from([(0, 1.5)]));
        assert!(!all_tuned.is_tuned(1.5));
    }

    #[test]
    fn display_formats_floats_with_decimal_point() {
        assert_eq!(NormOrder::Uniform(2.0).to_string(), "2.0");
        let order = NormOrder::PerTurbine(BTreeMap::from([(0, 1.5), (3, 2.0)]));
        assert_eq!(order.to_string(), "{0: 1.5, 3: 2.0}");
    }

    #[test]
    fn to_value_keys_per_turbine_by_index() {
        let order = NormOrder::PerTurbine(BTreeMap::from([(1, 2.0)]));
        assert_eq!(order.to_value(), json!({"1": 2.0}));
        assert_eq!(NormOrder::Uniform(1.5).to_value(), json!(1.5));
    }
}
