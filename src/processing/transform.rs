// Field management transforms
// Author: Gabriel Demetrios Lafis

use log::debug;

use crate::data::{Record, RecordSet, Value};
use crate::utils::validate_field_name;
use super::{DataProcessor, ProcessingError, ProcessorType};

/// Add a field holding `default` to every record.
///
/// Fails if the name is blank or already part of the field catalog.
pub fn add_field(
    input: &RecordSet,
    name: &str,
    default: Value,
) -> Result<RecordSet, ProcessingError> {
    validate_field_name(name)?;
    if input.has_field(name) {
        return Err(ProcessingError::FieldExists(name.to_string()));
    }

    let records: Vec<Record> = input
        .records
        .iter()
        .map(|record| {
            let mut record = record.clone();
            record.insert(name, default.clone());
            record
        })
        .collect();

    debug!("added field '{}' to {} record(s)", name, records.len());
    Ok(input.derive(records))
}

/// Remove a field from every record, keeping the order of the others
pub fn remove_field(input: &RecordSet, name: &str) -> Result<RecordSet, ProcessingError> {
    if !input.has_field(name) {
        return Err(ProcessingError::UnknownField(name.to_string()));
    }

    let records: Vec<Record> = input
        .records
        .iter()
        .map(|record| {
            let mut record = record.clone();
            record.remove(name);
            record
        })
        .collect();

    debug!("removed field '{}' from {} record(s)", name, records.len());
    Ok(input.derive(records))
}

/// Add a new field to a record set
pub struct AddFieldTransform {
    name: String,
    default: Value,
}

impl AddFieldTransform {
    /// Create a transform adding `name` with an absent value
    pub fn new(name: &str) -> Self {
        Self::with_default(name, Value::Absent)
    }

    /// Create a transform adding `name` with a constant value
    pub fn with_default(name: &str, default: Value) -> Self {
        AddFieldTransform {
            name: name.to_string(),
            default,
        }
    }
}

impl DataProcessor for AddFieldTransform {
    fn process(&self, input: &RecordSet) -> Result<RecordSet, ProcessingError> {
        add_field(input, &self.name, self.default.clone())
    }

    fn name(&self) -> &str {
        "add_field"
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Transform
    }
}

/// Remove a field from a record set
pub struct RemoveFieldTransform {
    name: String,
}

impl RemoveFieldTransform {
    pub fn new(name: &str) -> Self {
        RemoveFieldTransform {
            name: name.to_string(),
        }
    }
}

impl DataProcessor for RemoveFieldTransform {
    fn process(&self, input: &RecordSet) -> Result<RecordSet, ProcessingError> {
        remove_field(input, &self.name)
    }

    fn name(&self) -> &str {
        "remove_field"
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Transform
    }
}
