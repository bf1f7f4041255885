// Validation utilities
// Author: Gabriel Demetrios Lafis

use crate::data::RecordSet;
use crate::processing::ProcessingError;

/// Check that a field selected by the caller exists in the record set.
///
/// An empty record set has no catalog to check against and accepts any field.
pub fn validate_field(dataset: &RecordSet, name: &str) -> Result<(), ProcessingError> {
    if dataset.is_empty() || dataset.has_field(name) {
        Ok(())
    } else {
        Err(ProcessingError::UnknownField(name.to_string()))
    }
}

/// Validate that a new field name is not blank
pub fn validate_field_name(name: &str) -> Result<(), ProcessingError> {
    if name.trim().is_empty() {
        Err(ProcessingError::InvalidArgument(
            "Field name cannot be empty".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate that a numeric setting is in range
pub fn validate_range<T: PartialOrd + std::fmt::Display>(
    value: T,
    min: T,
    max: T,
    name: &str,
) -> Result<(), String> {
    if value < min || value > max {
        Err(format!(
            "'{}' must be between {} and {}",
            name, min, max
        ))
    } else {
        Ok(())
    }
}
