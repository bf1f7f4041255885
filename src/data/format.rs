// File format detection and dispatch
// Author: Gabriel Demetrios Lafis

use std::path::Path;

use log::info;

use super::{
    CsvSink, CsvSource, DataError, DataSink, DataSource, JsonSink, JsonSource, RecordSet,
    XmlSink, XmlSource, YamlSink, YamlSource,
};

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
    Yaml,
    Xml,
}

impl FileFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Json => "json",
            FileFormat::Yaml => "yaml",
            FileFormat::Xml => "xml",
        }
    }

    /// Parse a file format from a file extension
    pub fn from_extension(ext: &str) -> Result<Self, DataError> {
        match ext.to_lowercase().as_str() {
            "csv" => Ok(FileFormat::Csv),
            "json" => Ok(FileFormat::Json),
            "yaml" | "yml" => Ok(FileFormat::Yaml),
            "xml" => Ok(FileFormat::Xml),
            _ => Err(DataError::UnsupportedFormat(format!(
                "Unknown file format: {}",
                ext
            ))),
        }
    }

    /// Detect the format of a path from its extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|ext| ext.to_str()).ok_or_else(|| {
            DataError::UnsupportedFormat(format!("No file extension on '{}'", path.display()))
        })?;
        Self::from_extension(ext)
    }
}

/// Load and normalize a file, choosing the reader from its extension
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<RecordSet, DataError> {
    let path = path.as_ref();
    let dataset = match FileFormat::from_path(path)? {
        FileFormat::Csv => CsvSource::new(path, true, b',').read()?,
        FileFormat::Json => JsonSource::new(path).read()?,
        FileFormat::Yaml => YamlSource::new(path).read()?,
        FileFormat::Xml => XmlSource::new(path).read()?,
    };

    info!("Loaded {} record(s) from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Save a record set, choosing the writer from the extension
pub fn save_file<P: AsRef<Path>>(path: P, data: &RecordSet) -> Result<(), DataError> {
    let path = path.as_ref();
    match FileFormat::from_path(path)? {
        FileFormat::Csv => CsvSink::new(path, b',').write(data)?,
        FileFormat::Json => JsonSink::new(path, true).write(data)?,
        FileFormat::Yaml => YamlSink::new(path).write(data)?,
        FileFormat::Xml => XmlSink::new(path).write(data)?,
    }

    info!("Saved {} record(s) to {}", data.len(), path.display());
    Ok(())
}
