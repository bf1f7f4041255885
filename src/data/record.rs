// Records, record sets and normalization
// Author: Gabriel Demetrios Lafis

use std::collections::{BTreeSet, HashMap, HashSet};

use indexmap::IndexMap;
use serde::Serialize;

use super::{coerce, RawValue, Value};

static ABSENT: Value = Value::Absent;

/// An ordered mapping from field name to value.
///
/// Field order is the order in which fields were first inserted. Equality
/// takes the order into account, like [`Value::Map`]: two records with the
/// same fields in a different order are not equal.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len()
            && self.fields.iter().zip(other.fields.iter()).all(|(a, b)| a == b)
    }
}

impl Eq for Record {}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Record {
            fields: IndexMap::new(),
        }
    }

    /// Build a record by coercing every raw field, keeping field order
    pub fn from_raw(raw: IndexMap<String, RawValue>) -> Self {
        raw.into_iter()
            .map(|(name, value)| {
                let value = coerce(&value);
                (name, value)
            })
            .collect()
    }

    /// Builder-style insert
    pub fn with<V: Into<Value>>(mut self, name: &str, value: V) -> Self {
        self.insert(name, value.into());
        self
    }

    /// Set a field. An existing field keeps its position.
    pub fn insert(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_string(), value);
    }

    /// Remove a field, keeping the order of the others
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Value of a field, a missing field reads as [`Value::Absent`]
    pub fn value_or_absent(&self, name: &str) -> &Value {
        self.fields.get(name).unwrap_or(&ABSENT)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Metadata attached to a record set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub properties: HashMap<String, String>,
}

impl Metadata {
    /// Create new empty metadata
    pub fn new() -> Self {
        Metadata {
            properties: HashMap::new(),
        }
    }

    /// Add a property to the metadata
    pub fn add(&mut self, key: &str, value: &str) {
        self.properties.insert(key.to_string(), value.to_string());
    }

    /// Get a property from the metadata
    pub fn get(&self, key: &str) -> Option<&String> {
        self.properties.get(key)
    }
}

/// An ordered collection of records.
///
/// Order is significant: load order after reading, sort order after a sort.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub records: Vec<Record>,
    pub metadata: Metadata,
}

impl RecordSet {
    /// Create a new empty record set
    pub fn new() -> Self {
        RecordSet::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        RecordSet {
            records,
            metadata: Metadata::new(),
        }
    }

    /// A new set holding `records` and a copy of this set's metadata
    pub fn derive(&self, records: Vec<Record>) -> Self {
        RecordSet {
            records,
            metadata: self.metadata.clone(),
        }
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Values of one field across all records, missing fields as absent
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.records.iter().map(move |record| record.value_or_absent(name))
    }

    /// Ordered union of field names.
    ///
    /// The first record's fields come first, in their own order; names only
    /// seen in later records follow in lexicographic order. Computed on each
    /// call so it always reflects the current records.
    pub fn field_catalog(&self) -> Vec<String> {
        let mut records = self.records.iter();
        let first = match records.next() {
            Some(first) => first,
            None => return Vec::new(),
        };

        let known: HashSet<&str> = first.field_names().collect();
        let mut extra: BTreeSet<&str> = BTreeSet::new();
        for record in records {
            for name in record.field_names() {
                if !known.contains(name) {
                    extra.insert(name);
                }
            }
        }

        first
            .field_names()
            .chain(extra)
            .map(String::from)
            .collect()
    }

    /// True if any record carries the field
    pub fn has_field(&self, name: &str) -> bool {
        self.records.iter().any(|record| record.contains(name))
    }

    /// Render the catalog header and the first `limit` records as a text table
    pub fn preview(&self, limit: usize) -> String {
        if self.is_empty() {
            return "No records loaded.".to_string();
        }

        let catalog = self.field_catalog();
        let rule = "-".repeat(50);
        let mut lines = vec![
            format!("{} record(s)", self.len()),
            rule.clone(),
            catalog.join(" | "),
            rule,
        ];

        for record in self.records.iter().take(limit) {
            let cells: Vec<String> = catalog
                .iter()
                .map(|name| record.value_or_absent(name).to_string())
                .collect();
            lines.push(cells.join(" | "));
        }

        if self.len() > limit {
            lines.push(format!("... ({} more records)", self.len() - limit));
        }

        lines.join("\n")
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        RecordSet::from_records(iter.into_iter().collect())
    }
}

/// Coerce every field of every decoded record into a record set
pub fn normalize(raw_records: Vec<IndexMap<String, RawValue>>) -> RecordSet {
    raw_records.into_iter().map(Record::from_raw).collect()
}
