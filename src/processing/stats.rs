// Statistical summaries of record sets
// Author: Gabriel Demetrios Lafis

use std::fmt;

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use crate::data::{RecordSet, TypeTag, Value};

/// Summary of the numeric values of one field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; `None` with fewer than two values
    pub std_dev: Option<f64>,
}

impl NumericSummary {
    /// Summarize a list of numbers, `None` when it is empty
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let count = values.len();
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mean = sorted.iter().sum::<f64>() / count as f64;
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        let std_dev = if count < 2 {
            None
        } else {
            let squares: f64 = sorted.iter().map(|x| (x - mean).powi(2)).sum();
            Some((squares / (count - 1) as f64).sqrt())
        };

        Some(NumericSummary {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean,
            median,
            std_dev,
        })
    }
}

/// Most frequent value of a field and how often it occurs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mode {
    pub value: Value,
    pub count: usize,
}

/// Statistics of one field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldStatistics {
    pub name: String,
    pub total: usize,
    pub type_counts: IndexMap<TypeTag, usize>,
    pub mode: Option<Mode>,
    pub numeric: Option<NumericSummary>,
}

/// Running state for one field.
///
/// Accumulators merge associatively; counts are commutative and the mode
/// tie-break follows merge order.
#[derive(Debug, Clone, Default)]
pub struct FieldAccumulator {
    total: usize,
    type_counts: IndexMap<TypeTag, usize>,
    frequencies: IndexMap<Value, usize>,
    numbers: Vec<f64>,
}

impl FieldAccumulator {
    pub fn new() -> Self {
        FieldAccumulator::default()
    }

    pub fn push(&mut self, value: &Value) {
        self.total += 1;
        *self.type_counts.entry(value.type_tag()).or_insert(0) += 1;
        *self.frequencies.entry(value.clone()).or_insert(0) += 1;
        if let Some(number) = value.as_f64() {
            self.numbers.push(number);
        }
    }

    pub fn merge(&mut self, other: FieldAccumulator) {
        self.total += other.total;
        for (tag, count) in other.type_counts {
            *self.type_counts.entry(tag).or_insert(0) += count;
        }
        for (value, count) in other.frequencies {
            *self.frequencies.entry(value).or_insert(0) += count;
        }
        self.numbers.extend(other.numbers);
    }

    /// Most frequent value, first encountered wins ties
    fn mode(&self) -> Option<Mode> {
        let mut best: Option<(&Value, usize)> = None;
        for (value, &count) in &self.frequencies {
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((value, count));
            }
        }

        best.map(|(value, count)| Mode {
            value: value.clone(),
            count,
        })
    }

    pub fn finish(self, name: &str) -> FieldStatistics {
        FieldStatistics {
            name: name.to_string(),
            total: self.total,
            mode: self.mode(),
            numeric: NumericSummary::from_values(&self.numbers),
            type_counts: self.type_counts,
        }
    }
}

/// Per-field statistics of a record set, in field catalog order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatisticsReport {
    pub record_count: usize,
    pub fields: Vec<FieldStatistics>,
}

impl StatisticsReport {
    /// Compute the statistics of every catalog field in one pass
    pub fn compute(input: &RecordSet) -> Self {
        let catalog = input.field_catalog();
        let mut accumulators: Vec<FieldAccumulator> = vec![FieldAccumulator::new(); catalog.len()];

        for record in &input.records {
            for (name, accumulator) in catalog.iter().zip(accumulators.iter_mut()) {
                accumulator.push(record.value_or_absent(name));
            }
        }

        let fields: Vec<FieldStatistics> = catalog
            .iter()
            .zip(accumulators)
            .map(|(name, accumulator)| accumulator.finish(name))
            .collect();

        debug!(
            "computed statistics for {} field(s) over {} record(s)",
            fields.len(),
            input.len()
        );

        StatisticsReport {
            record_count: input.len(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldStatistics> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Fields holding at least one numeric value
    pub fn numeric_fields(&self) -> impl Iterator<Item = (&str, &NumericSummary)> {
        self.fields.iter().filter_map(|field| {
            field
                .numeric
                .as_ref()
                .map(|summary| (field.name.as_str(), summary))
        })
    }
}

/// Compute per-field statistics of a record set
pub fn compute_statistics(input: &RecordSet) -> StatisticsReport {
    StatisticsReport::compute(input)
}

impl fmt::Display for StatisticsReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} record(s), {} field(s)", self.record_count, self.fields.len())?;

        writeln!(f)?;
        writeln!(
            f,
            "{:<20} {:>6} {:>12} {:>12} {:>12} {:>12} {:>12}",
            "Field", "Count", "Min", "Max", "Mean", "Median", "Std dev"
        )?;
        for (name, summary) in self.numeric_fields() {
            let std_dev = summary
                .std_dev
                .map_or_else(|| "undefined".to_string(), |s| format!("{:.2}", s));
            writeln!(
                f,
                "{:<20} {:>6} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12}",
                name, summary.count, summary.min, summary.max, summary.mean, summary.median, std_dev
            )?;
        }

        writeln!(f)?;
        writeln!(f, "{:<20} {:<40} {}", "Field", "Types", "Mode")?;
        for field in &self.fields {
            let types = field
                .type_counts
                .iter()
                .map(|(tag, count)| format!("{}: {}", tag, count))
                .collect::<Vec<_>>()
                .join(", ");
            let mode = match &field.mode {
                Some(mode) if mode.value.is_absent() => format!("(absent) x{}", mode.count),
                Some(mode) => format!("{} x{}", mode.value, mode.count),
                None => "-".to_string(),
            };
            writeln!(f, "{:<20} {:<40} {}", field.name, types, mode)?;
        }

        Ok(())
    }
}
