// Data module for records, values and file formats
// Author: Gabriel Demetrios Lafis

mod coerce;
mod csv;
mod format;
mod json;
mod record;
mod value;
mod xml;
mod yaml;

pub use self::coerce::*;
pub use self::csv::*;
pub use self::format::*;
pub use self::json::*;
pub use self::record::*;
pub use self::value::*;
pub use self::xml::*;
pub use self::yaml::*;

use std::path::PathBuf;

use thiserror::Error;

/// Represents a source of records
pub trait DataSource {
    /// Read and normalize the records
    fn read(&self) -> Result<RecordSet, DataError>;

    /// Get the source name
    fn name(&self) -> &str;
}

/// Represents a destination for records
pub trait DataSink {
    /// Write the records
    fn write(&self, data: &RecordSet) -> Result<(), DataError>;

    /// Get the sink name
    fn name(&self) -> &str;
}

/// Represents an error in the data module
#[derive(Debug, Error)]
pub enum DataError {
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl DataError {
    pub(crate) fn io(path: &str, source: std::io::Error) -> Self {
        DataError::Io {
            path: PathBuf::from(path),
            source,
        }
    }
}
