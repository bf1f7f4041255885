// YAML data source and sink implementation
// Author: Gabriel Demetrios Lafis

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;
use serde_json::Value as JsonValue;

use super::json::records_from_document;
use super::{DataError, DataSink, DataSource, RecordSet};

/// YAML data source; the document must be a sequence of mappings
pub struct YamlSource {
    path: String,
}

impl YamlSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        YamlSource {
            path: path.as_ref().to_string_lossy().to_string(),
        }
    }

    /// Parse a YAML document from any reader
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<RecordSet, DataError> {
        let document: JsonValue = serde_yaml::from_reader(reader)?;

        let mut dataset = records_from_document(&document)?;
        debug!("{}: decoded {} YAML records", self.path, dataset.len());

        dataset.metadata.add("source", "yaml");
        dataset.metadata.add("path", &self.path);
        Ok(dataset)
    }
}

impl DataSource for YamlSource {
    fn read(&self) -> Result<RecordSet, DataError> {
        let file = File::open(&self.path).map_err(|e| DataError::io(&self.path, e))?;
        self.parse_reader(BufReader::new(file))
    }

    fn name(&self) -> &str {
        &self.path
    }
}

/// YAML data sink
pub struct YamlSink {
    path: String,
}

impl YamlSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        YamlSink {
            path: path.as_ref().to_string_lossy().to_string(),
        }
    }

    pub fn write_to<W: Write>(&self, writer: W, data: &RecordSet) -> Result<(), DataError> {
        serde_yaml::to_writer(writer, &data.records)?;
        Ok(())
    }
}

impl DataSink for YamlSink {
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
