//! Reading and writing a [`FlowField`] as JSON.
//!
//! The on-disk form is `{"shape": [..], "data": [..]}` with row-major data.

use std::fs;
use std::path::Path;

use wake_combine_core::error::CombinationError;
use wake_combine_core::field::FlowField;

/// Reads a field from a JSON file.
///
/// Returns `CombinationError::Io` if the file cannot be read and
/// `CombinationError::Parse` if it does not hold a valid field.
pub fn read_field(path: &Path) -> Result<FlowField, CombinationError> {
    let text = fs::read_to_string(path)
        .map_err(|e| CombinationError::Io(format!("{}: {e}", path.display())))?;
    parse_field(&text)
}

/// Parses a field from JSON text, validating shape against data length.
pub fn parse_field(text: &str) -> Result<FlowField, CombinationError> {
    serde_json::from_str(text).map_err(|e| CombinationError::Parse(e.to_string()))
}

/// Serializes a field to JSON text.
///
/// JSON has no NaN or infinity, so a field holding a non-finite cell is
/// rejected with `CombinationError::Serialize` instead of being written as
/// `null`.
pub fn field_to_json(field: &FlowField) -> Result<String, CombinationError> {
    if let Some((i, v)) = field
        .data()
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite())
    {
        return Err(CombinationError::Serialize(format!(
            "cell {i} is {v:?}, which JSON cannot represent"
        )));
    }
    serde_json::to_string(field).map_err(|e| CombinationError::Serialize(e.to_string()))
}

/// Writes a field as JSON, replacing any existing file.
///
/// Nothing is written when the field cannot be serialized.
pub fn write_field(field: &FlowField, path: &Path) -> Result<(), CombinationError> {
    let text = field_to_json(field)?;
    fs::write(path, text).map_err(|e| CombinationError::Io(format!("{}: {e}", path.display())))
}
