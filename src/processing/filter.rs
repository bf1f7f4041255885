// Filter operations for record sets
// Author: Gabriel Demetrios Lafis

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use log::debug;
use serde_json::Value as JsonValue;

use crate::data::{coerce, RawValue, Record, RecordSet, Value};
use crate::utils::validate_field;
use super::{compare_numeric, DataProcessor, ProcessingError, ProcessorType};

/// Comparison operator of a filter predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
    Contains,
    StartsWith,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Ne => "ne",
            FilterOperator::Gt => "gt",
            FilterOperator::Lt => "lt",
            FilterOperator::Ge => "ge",
            FilterOperator::Le => "le",
            FilterOperator::Contains => "contains",
            FilterOperator::StartsWith => "starts_with",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "eq" | "=" | "==" => Ok(FilterOperator::Eq),
            "ne" | "!=" | "<>" => Ok(FilterOperator::Ne),
            "gt" | ">" => Ok(FilterOperator::Gt),
            "lt" | "<" => Ok(FilterOperator::Lt),
            "ge" | ">=" => Ok(FilterOperator::Ge),
            "le" | "<=" => Ok(FilterOperator::Le),
            "contains" => Ok(FilterOperator::Contains),
            "starts_with" | "startswith" => Ok(FilterOperator::StartsWith),
            other => Err(ProcessingError::InvalidArgument(format!(
                "Unknown filter operator '{}'",
                other
            ))),
        }
    }
}

/// A (field, operator, target) predicate.
///
/// The target is coerced like any field value; text operators match
/// against the raw target text instead, ignoring case.
#[derive(Debug, Clone)]
pub struct FilterPredicate {
    field: String,
    operator: FilterOperator,
    target: Value,
    needle: String,
}

impl FilterPredicate {
    pub fn new<T: Into<RawValue>>(field: &str, operator: FilterOperator, target: T) -> Self {
        let raw = target.into();
        let needle = match &raw {
            JsonValue::String(text) => text.to_lowercase(),
            other => other.to_string().to_lowercase(),
        };

        FilterPredicate {
            field: field.to_string(),
            operator,
            target: coerce(&raw),
            needle,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    /// The coerced target value
    pub fn target(&self) -> &Value {
        &self.target
    }

    /// Evaluate against one record; values that cannot be compared never match
    pub fn matches(&self, record: &Record) -> bool {
        let value = record.value_or_absent(&self.field);
        let ordering = || compare_numeric(value, &self.target);

        match self.operator {
            FilterOperator::Eq => *value == self.target,
            FilterOperator::Ne => *value != self.target,
            FilterOperator::Gt => ordering() == Some(Ordering::Greater),
            FilterOperator::Lt => ordering() == Some(Ordering::Less),
            FilterOperator::Ge => matches!(ordering(), Some(Ordering::Greater | Ordering::Equal)),
            FilterOperator::Le => matches!(ordering(), Some(Ordering::Less | Ordering::Equal)),
            FilterOperator::Contains => value
                .as_text()
                .map_or(false, |text| text.to_lowercase().contains(&self.needle)),
            FilterOperator::StartsWith => value
                .as_text()
                .map_or(false, |text| text.to_lowercase().starts_with(&self.needle)),
        }
    }
}

impl fmt::Display for FilterPredicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.target)
    }
}

/// Keep the records matching `predicate`, in their original order.
///
/// An empty result is a valid outcome, not an error.
pub fn filter(
    input: &RecordSet,
    predicate: &FilterPredicate,
) -> Result<RecordSet, ProcessingError> {
    validate_field(input, predicate.field())?;

    let records: Vec<Record> = input
        .records
        .iter()
        .filter(|record| predicate.matches(record))
        .cloned()
        .collect();

    debug!(
        "filter '{}' kept {} of {} record(s)",
        predicate,
        records.len(),
        input.len()
    );
    Ok(input.derive(records))
}

/// Filter rows based on a predicate
pub struct FilterProcessor {
    name: String,
    predicate: FilterPredicate,
}

impl FilterProcessor {
    /// Create a new filter processor from a predicate
    pub fn new(predicate: FilterPredicate) -> Self {
        FilterProcessor {
            name: format!("{}_{}", predicate.operator(), predicate.field()),
            predicate,
        }
    }

    /// Keep rows where a field equals a value
    pub fn equals<T: Into<RawValue>>(field: &str, target: T) -> Self {
        Self::new(FilterPredicate::new(field, FilterOperator::Eq, target))
    }

    /// Keep rows where a field is greater than a value
    pub fn greater_than<T: Into<RawValue>>(field: &str, target: T) -> Self {
        Self::new(FilterPredicate::new(field, FilterOperator::Gt, target))
    }

    /// Keep rows where a field is less than a value
    pub fn less_than<T: Into<RawValue>>(field: &str, target: T) -> Self {
        Self::new(FilterPredicate::new(field, FilterOperator::Lt, target))
    }

    /// Keep rows where a text field contains a substring, ignoring case
    pub fn contains(field: &str, substring: &str) -> Self {
        Self::new(FilterPredicate::new(field, FilterOperator::Contains, substring))
    }

    pub fn predicate(&self) -> &FilterPredicate {
        &self.predicate
    }
}

impl DataProcessor for FilterProcessor {
    fn process(&self, input: &RecordSet) -> Result<RecordSet, ProcessingError> {
        filter(input, &self.predicate)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Filter
    }
}
