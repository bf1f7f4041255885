// Rust Data Filter Engine
// Author: Gabriel Demetrios Lafis

//! # Rust Data Filter Engine
//!
//! A record-oriented engine that normalizes heterogeneous records and
//! filters, sorts and summarizes them.
//!
//! ## Features
//!
//! - Loading and saving records as CSV, JSON, YAML and XML
//! - Type coercion of raw values (numbers, booleans, missing markers)
//! - Stable single-key and multi-key sorting over mixed types
//! - Locale-aware text collation with raw fallback
//! - Single-predicate filtering
//! - Per-field statistics: numeric summary, type distribution and mode
//!
//! ## Example
//!
//! ```rust
//! use indexmap::IndexMap;
//! use serde_json::json;
//! use rust_data_filter_engine::{
//!     data::{normalize, Value},
//!     processing::{
//!         compute_statistics, DataProcessor, FilterProcessor, Pipeline, SortCriterion,
//!         SortOptions, SortProcessor,
//!     },
//! };
//!
//! let row = |name: &str, age: &str| -> IndexMap<String, serde_json::Value> {
//!     [("name".to_string(), json!(name)), ("age".to_string(), json!(age))]
//!         .into_iter()
//!         .collect()
//! };
//! let raw = vec![row("Alice", "20"), row("Bob", "n/a"), row("Chloé", "22")];
//! let records = normalize(raw);
//!
//! let pipeline = Pipeline::new("example")
//!     .add(FilterProcessor::greater_than("age", "19"))
//!     .add(SortProcessor::new(vec![SortCriterion::descending("age")], &SortOptions::default()));
//!
//! let result = pipeline.process(&records).unwrap();
//! assert_eq!(result.records[0].get("age"), Some(&Value::Integer(22)));
//!
//! let report = compute_statistics(&records);
//! assert_eq!(report.field("age").unwrap().numeric.as_ref().unwrap().count, 2);
//! ```

pub mod data;
pub mod processing;
pub mod utils;

// Re-export main types
pub use data::{coerce, load_file, normalize, save_file, Record, RecordSet, Value};
pub use processing::{
    compute_statistics, filter, sort_multi, sort_single, FilterPredicate, Pipeline,
    SortCriterion, Sorter, StatisticsReport,
};
pub use utils::Config;
