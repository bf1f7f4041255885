// Processing module for sorting, filtering and analysis of record sets
// Author: Gabriel Demetrios Lafis

mod collation;
mod compare;
mod filter;
mod sort;
mod stats;
mod transform;

pub use self::collation::*;
pub use self::compare::*;
pub use self::filter::*;
pub use self::sort::*;
pub use self::stats::*;
pub use self::transform::*;

use thiserror::Error;

use crate::data::RecordSet;

/// Represents a processor that maps a record set to a new record set
pub trait DataProcessor {
    /// Process a record set and return a new one; the input is left untouched
    fn process(&self, input: &RecordSet) -> Result<RecordSet, ProcessingError>;

    /// Get the processor name
    fn name(&self) -> &str;

    /// Get the processor type
    fn processor_type(&self) -> ProcessorType;
}

/// Represents a processor type
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessorType {
    Filter,
    Sort,
    Transform,
    Custom(String),
}

/// Represents an error in the processing module
#[derive(Debug, Error, PartialEq)]
pub enum ProcessingError {
    #[error("Field '{0}' not found")]
    UnknownField(String),

    #[error("Field '{0}' already exists")]
    FieldExists(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Pipeline for chaining multiple processors
pub struct Pipeline {
    name: String,
    processors: Vec<Box<dyn DataProcessor>>,
}

impl Pipeline {
    /// Create a new pipeline with the given name
    pub fn new(name: &str) -> Self {
        Pipeline {
            name: name.to_string(),
            processors: Vec::new(),
        }
    }

    /// Add a processor to the pipeline
    pub fn add<P: DataProcessor + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Execute the pipeline on a record set
    pub fn execute(&self, input: &RecordSet) -> Result<RecordSet, ProcessingError> {
        let mut current = input.clone();

        for processor in &self.processors {
            current = processor.process(&current)?;
            log::debug!(
                "pipeline '{}': {} -> {} record(s)",
                self.name,
                processor.name(),
                current.len()
            );
        }

        Ok(current)
    }
}

impl DataProcessor for Pipeline {
    fn process(&self, input: &RecordSet) -> Result<RecordSet, ProcessingError> {
        self.execute(input)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Custom("Pipeline".to_string())
    }
}
