// JSON data source and sink implementation
// Author: Gabriel Demetrios Lafis

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use serde_json::Value as JsonValue;

use super::{normalize, DataError, DataSink, DataSource, RecordSet};

/// JSON data source
pub struct JsonSource {
    path: String,
    array_path: Option<String>,
}

impl JsonSource {
    /// Create a new JSON data source
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        JsonSource {
            path: path.as_ref().to_string_lossy().to_string(),
            array_path: None,
        }
    }

    /// Create a new JSON data source with a dotted path to the array
    pub fn with_array_path<P: AsRef<Path>, S: Into<String>>(path: P, array_path: S) -> Self {
        JsonSource {
            path: path.as_ref().to_string_lossy().to_string(),
            array_path: Some(array_path.into()),
        }
    }

    /// Parse a JSON document from any reader
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<RecordSet, DataError> {
        let json: JsonValue = serde_json::from_reader(reader)?;

        let root = match self.array_path {
            Some(ref array_path) => {
                let mut current = &json;
                for part in array_path.split('.') {
                    current = current.get(part).ok_or_else(|| {
                        DataError::Parse(format!("Path '{}' not found in JSON", array_path))
                    })?;
                }
                current
            }
            None => &json,
        };

        let mut dataset = records_from_document(root)?;
        debug!("{}: decoded {} JSON records", self.path, dataset.len());

        dataset.metadata.add("source", "json");
        dataset.metadata.add("path", &self.path);
        Ok(dataset)
    }
}

impl DataSource for JsonSource {
    fn read(&self) -> Result<RecordSet, DataError> {
        let file = File::open(&self.path).map_err(|e| DataError::io(&self.path, e))?;
        self.parse_reader(BufReader::new(file))
    }

    fn name(&self) -> &str {
        &self.path
    }
}

/// Normalize a decoded document that must be an array of objects
pub(crate) fn records_from_document(document: &JsonValue) -> Result<RecordSet, DataError> {
    let array = document
        .as_array()
        .ok_or_else(|| DataError::Parse("Document root is not an array of records".to_string()))?;

    let raw_records = array
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            JsonValue::Object(obj) => Ok(obj
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect::<IndexMap<String, JsonValue>>()),
            _ => Err(DataError::Parse(format!("Element {} is not an object", i))),
        })
        .collect::<Result<Vec<_>, DataError>>()?;

    Ok(normalize(raw_records))
}

/// JSON data sink
pub struct JsonSink {
    path: String,
    pretty: bool,
}

impl JsonSink {
    /// Create a new JSON data sink
    pub fn new<P: AsRef<Path>>(path: P, pretty: bool) -> Self {
        JsonSink {
            path: path.as_ref().to_string_lossy().to_string(),
            pretty,
        }
    }

    /// Write the records as an array of objects; absent values become null
    pub fn write_to<W: Write>(&self, writer: W, data: &RecordSet) -> Result<(), DataError> {
        if self.pretty {
            serde_json::to_writer_pretty(writer, &data.records)?;
        } else {
            serde_json::to_writer(writer, &data.records)?;
        }

        Ok(())
    }
}

impl DataSink for JsonSink {
    fn write(&self, data: &RecordSet) -> Result<(), DataError> {
        let file = File::create(&self.path).map_err(|e| DataError::io(&self.path, e))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer, data)?;
        writer.flush().map_err(|e| DataError::io(&self.path, e))
    }

    fn name(&self) -> &str {
        &self.path
    }
}
