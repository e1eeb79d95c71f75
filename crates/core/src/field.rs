//! Multi-dimensional flow field of velocity values.
//!
//! A `FlowField` stores `product(shape)` f64 values in row-major layout.
//! Values are velocities and are never clamped. Every transform returns a
//! new field; inputs are left untouched.

use crate::error::CombinationError;
use serde::{Deserialize, Serialize};

/// A row-major array of velocity values over a spatial grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFlowField")]
pub struct FlowField {
    shape: Vec<usize>,
    data: Vec<f64>,
}

/// Unvalidated wire form, checked on the way into [`FlowField`].
#[derive(Deserialize)]
struct RawFlowField {
    shape: Vec<usize>,
    data: Vec<f64>,
}

impl TryFrom<RawFlowField> for FlowField {
    type Error = CombinationError;

    fn try_from(raw: RawFlowField) -> Result<Self, Self::Error> {
        FlowField::from_data(raw.shape, raw.data)
    }
}

/// Element count of `shape`, rejecting empty shapes, zero extents and overflow.
fn element_count(shape: &[usize]) -> Result<usize, CombinationError> {
    if shape.is_empty() || shape.contains(&0) {
        return Err(CombinationError::InvalidShape);
    }
    shape
        .iter()
        .try_fold(1_usize, |acc, &n| acc.checked_mul(n))
        .ok_or(CombinationError::InvalidShape)
}

impl FlowField {
    /// Creates a zero-filled field of the given shape.
    ///
    /// Returns `CombinationError::InvalidShape` if the shape is empty, has a
    /// zero extent, or its element count overflows `usize`.
    pub fn new(shape: &[usize]) -> Result<Self, CombinationError> {
        Self::filled(shape, 0.0)
    }

    /// Creates a field with every cell set to `value`.
    pub fn filled(shape: &[usize], value: f64) -> Result<Self, CombinationError> {
        let len = element_count(shape)?;
        Ok(Self {
            shape: shape.to_vec(),
            data: vec![value; len],
        })
    }

    /// Creates a field from a pre-built data vector, validating that
    /// `data.len()` equals the element count of `shape`.
    pub fn from_data(shape: Vec<usize>, data: Vec<f64>) -> Result<Self, CombinationError> {
        let expected = element_count(&shape)?;
        if data.len() != expected {
            return Err(CombinationError::ShapeMismatch {
                lhs: shape,
                rhs: vec![data.len()],
            });
        }
        Ok(Self { shape, data })
    }

    /// Extent of each dimension.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; a field has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read-only access to the underlying row-major data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Gets the value at a multi-index, or `None` if the index has the wrong
    /// rank or lies outside the field.
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut flat = 0;
        for (&i, &extent) in index.iter().zip(self.shape.iter()) {
            if i >= extent {
                return None;
            }
            flat = flat * extent + i;
        }
        self.data.get(flat).copied()
    }

    /// Applies `f` to every cell, returning a new field of the same shape.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> FlowField {
        FlowField {
            shape: self.shape.clone(),
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Combines two fields cell by cell, returning a new field.
    ///
    /// Returns `CombinationError::ShapeMismatch` if the shapes differ.
    pub fn zip_map(
        &self,
        other: &FlowField,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<FlowField, CombinationError> {
        if self.shape != other.shape {
            return Err(CombinationError::ShapeMismatch {
                lhs: self.shape.clone(),
                rhs: other.shape.clone(),
            });
        }
        Ok(FlowField {
            shape: self.shape.clone(),
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Constructor tests --

    #[test]
    fn new_creates_zero_filled_field() {
        let field = FlowField::new(&[4, 3]).unwrap();
        assert_eq!(field.shape(), &[4, 3]);
        assert_eq!(field.len(), 12);
        assert!(field.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn new_supports_three_dimensions() {
        let field = FlowField::new(&[2, 3, 4]).unwrap();
        assert_eq!(field.len(), 24);
    }

    #[test]
    fn new_with_zero_extent_returns_error() {
        assert!(matches!(
            FlowField::new(&[0, 5]),
            Err(CombinationError::InvalidShape)
        ));
        assert!(matches!(
            FlowField::new(&[5, 0, 2]),
            Err(CombinationError::InvalidShape)
        ));
    }

    #[test]
    fn new_with_empty_shape_returns_error() {
        assert!(matches!(
            FlowField::new(&[]),
            Err(CombinationError::InvalidShape)
        ));
    }

    #[test]
    fn new_with_overflow_shape_returns_error() {
        assert!(FlowField::new(&[usize::MAX, 2]).is_err());
    }

    #[test]
    fn filled_keeps_values_outside_unit_range() {
        let field = FlowField::filled(&[2, 2], 8.5).unwrap();
        assert!(field.data().iter().all(|&v| (v - 8.5).abs() < f64::EPSILON));
    }

    #[test]
    fn from_data_rejects_wrong_length() {
        let result = FlowField::from_data(vec![2, 2], vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            result,
            Err(CombinationError::ShapeMismatch { .. })
        ));
    }

    // -- Indexing --

    #[test]
    fn get_uses_row_major_order() {
        let field = FlowField::from_data(vec![2, 3], vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(field.get(&[0, 0]), Some(0.0));
        assert_eq!(field.get(&[0, 2]), Some(2.0));
        assert_eq!(field.get(&[1, 0]), Some(3.0));
        assert_eq!(field.get(&[1, 2]), Some(5.0));
    }

    #[test]
    fn get_out_of_bounds_or_wrong_rank_is_none() {
        let field = FlowField::new(&[2, 2]).unwrap();
        assert_eq!(field.get(&[2, 0]), None);
        assert_eq!(field.get(&[0]), None);
        assert_eq!(field.get(&[0, 0, 0]), None);
    }

    // -- Transforms --

    #[test]
    fn map_does_not_mutate_original() {
        let field = FlowField::filled(&[2, 2], 3.0).unwrap();
        let doubled = field.map(|v| v * 2.0);
        assert!(doubled.data().iter().all(|&v| (v - 6.0).abs() < f64::EPSILON));
        assert!(field.data().iter().all(|&v| (v - 3.0).abs() < f64::EPSILON));
    }

    #[test]
    fn zip_map_combines_element_wise() {
        let a = FlowField::from_data(vec![3], vec![1.0, 2.0, 3.0]).unwrap();
        let b = FlowField::from_data(vec![3], vec![10.0, 20.0, 30.0]).unwrap();
        let c = a.zip_map(&b, |x, y| x + y).unwrap();
        assert_eq!(c.data(), &[11.0, 22.0, 33.0]);
        assert_eq!(c.shape(), &[3]);
    }

    #[test]
    fn zip_map_returns_error_on_shape_mismatch() {
        let a = FlowField::new(&[2, 3]).unwrap();
        let b = FlowField::new(&[3, 2]).unwrap();
        assert!(matches!(
            a.zip_map(&b, |x, y| x + y),
            Err(CombinationError::ShapeMismatch { .. })
        ));
    }

    // -- Serde --

    #[test]
    fn deserialize_validates_shape() {
        let bad = r#"{"shape": [2, 2], "data": [1.0]}"#;
        assert!(serde_json::from_str::<FlowField>(bad).is_err());

        let good = r#"{"shape": [1, 2], "data": [1.0, 2.5]}"#;
        let field: FlowField = serde_json::from_str(good).unwrap();
        assert_eq!(field.get(&[0, 1]), Some(2.5));
    }

    #[test]
    fn serialize_writes_shape_and_data() {
        let field = FlowField::filled(&[1, 2], 4.0).unwrap();
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["shape"], serde_json::json!([1, 2]));
        assert_eq!(value["data"], serde_json::json!([4.0, 4.0]));
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn shape() -> impl Strategy<Value = Vec<usize>> {
            prop::collection::vec(1_usize..=8, 1..=3)
        }

        proptest! {
            #[test]
            fn filled_len_matches_shape_product(s in shape(), v in -100.0_f64..100.0) {
                let field = FlowField::filled(&s, v).unwrap();
                prop_assert_eq!(field.len(), s.iter().product::<usize>());
                prop_assert_eq!(field.shape(), s.as_slice());
            }

            #[test]
            fn zip_map_preserves_shape(s in shape()) {
                let a = FlowField::filled(&s, 1.0).unwrap();
                let b = FlowField::filled(&s, 2.0).unwrap();
                let c = a.zip_map(&b, |x, y| x * y).unwrap();
                prop_assert_eq!(c.shape(), s.as_slice());
            }
        }
    }
}
