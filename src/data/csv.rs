// CSV data source and sink implementation
// Author: Gabriel Demetrios Lafis

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use indexmap::IndexMap;
use log::{debug, warn};

use super::{normalize, DataError, DataSink, DataSource, RawValue, RecordSet};

/// CSV data source
pub struct CsvSource {
    path: String,
    has_header: bool,
    delimiter: u8,
}

impl CsvSource {
    /// Create a new CSV data source
    pub fn new<P: AsRef<Path>>(path: P, has_header: bool, delimiter: u8) -> Self {
        CsvSource {
            path: path.as_ref().to_string_lossy().to_string(),
            has_header,
            delimiter,
        }
    }

    /// Parse CSV text from any reader. Every cell is decoded as text.
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<RecordSet, DataError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(self.has_header)
            .flexible(true)
            .from_reader(reader);

        let headers: Option<Vec<String>> = if self.has_header {
            let names: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
            Some(self.dedupe_headers(names))
        } else {
            None
        };

        let mut raw_records = Vec::new();
        for (line, result) in csv_reader.records().enumerate() {
            let row = result?;
            let names: Vec<String> = match &headers {
                Some(headers) => headers.clone(),
                None => (0..row.len()).map(|i| format!("column_{}", i)).collect(),
            };

            if row.len() > names.len() {
                warn!(
                    "{}: row {} has {} cells for {} columns, extra cells ignored",
                    self.path,
                    line + 1,
                    row.len(),
                    names.len()
                );
            }

            // Short rows read the missing cells as null
            let raw: IndexMap<String, RawValue> = names
                .into_iter()
                .enumerate()
                .map(|(i, name)| {
                    let cell = row
                        .get(i)
                        .map_or(RawValue::Null, |cell| RawValue::String(cell.to_string()));
                    (name, cell)
                })
                .collect();
            raw_records.push(raw);
        }

        debug!("{}: decoded {} CSV rows", self.path, raw_records.len());

        let mut dataset = normalize(raw_records);
        dataset.metadata.add("source", "csv");
        dataset.metadata.add("path", &self.path);
        Ok(dataset)
    }
}

impl CsvSource {
    /// Rename repeated header names to `name_1`, `name_2`, ... so that no
    /// column is lost
    fn dedupe_headers(&self, names: Vec<String>) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::with_capacity(names.len());
        let mut unique = Vec::with_capacity(names.len());

        for name in names {
            let mut candidate = name.clone();
            let mut suffix = 1;
            while seen.contains(&candidate) {
                candidate = format!("{}_{}", name, suffix);
                suffix += 1;
            }

            if candidate != name {
                warn!(
                    "{}: duplicate column '{}' renamed to '{}'",
                    self.path, name, candidate
                );
            }
            seen.insert(candidate.clone());
            unique.push(candidate);
        }

        unique
    }
}

impl DataSource for CsvSource {
    fn read(&self) -> Result<RecordSet, DataError> {
        let file = File::open(&self.path).map_err(|e| DataError::io(&self.path, e))?;
        self.parse_reader(BufReader::new(file))
    }

    fn name(&self) -> &str {
        &self.path
    }
}

/// CSV data sink
pub struct CsvSink {
    path: String,
    delimiter: u8,
}

impl CsvSink {
    /// Create a new CSV data sink
    pub fn new<P: AsRef<Path>>(path: P, delimiter: u8) -> Self {
        CsvSink {
            path: path.as_ref().to_string_lossy().to_string(),
            delimiter,
        }
    }

    /// Write the records to any writer.
    ///
    /// The header is the field catalog; absent values become empty cells.
    pub fn write_to<W: Write>(&self, writer: W, data: &RecordSet) -> Result<(), DataError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        let headers = data.field_catalog();
        if !headers.is_empty() {
            csv_writer.write_record(&headers)?;
        }

        for record in &data.records {
            let cells: Vec<String> = headers
                .iter()
                .map(|name| record.value_or_absent(name).to_string())
                .collect();
            csv_writer.write_record(&cells)?;
        }

        csv_writer
            .flush()
            .map_err(|e| DataError::io(&self.path, e))?;

        Ok(())
    }
}

impl DataSink for CsvSink {
    fn write(&self, data: &RecordSet) -> Result<(), DataError> {
        let file = File::create(&self.path).map_err(|e| DataError::io(&self.path, e))?;
        self.write_to(BufWriter::new(file), data)
    }

    fn name(&self) -> &str {
        &self.path
    }
}
