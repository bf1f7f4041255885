// Stable single-key and multi-key sorting of record sets
// Author: Gabriel Demetrios Lafis

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::data::{Record, RecordSet};
use crate::utils::validate_field;
use super::{
    compare_key, Collation, DataProcessor, ProcessingError, ProcessorType, ResolvedCollation,
    SortKey,
};

/// How a descending sort treats the type-rank partition.
///
/// `Reversible` flips the whole order, so absent values come first when
/// descending. `Fixed` keeps numbers before booleans before text before
/// absent values in both directions and only flips the order inside a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankOrder {
    /// Descending compares keys in reverse, including the rank partition.
    ///
    /// Records with equal keys keep their input order in both directions;
    /// this is not the reverse of the ascending result, whose ties would
    /// come out backwards. Multi-key sorting relies on every pass being
    /// stable in this way.
    #[default]
    Reversible,
    /// Descending keeps the rank partition ascending and reverses only the
    /// order inside each rank
    Fixed,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn is_descending(&self) -> bool {
        *self == SortDirection::Descending
    }
}

impl FromStr for SortDirection {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(ProcessingError::InvalidArgument(format!(
                "Unknown sort direction '{}'",
                other
            ))),
        }
    }
}

/// One key of a sort specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortCriterion {
    pub field: String,
    pub direction: SortDirection,
}

impl SortCriterion {
    pub fn ascending(field: &str) -> Self {
        SortCriterion {
            field: field.to_string(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: &str) -> Self {
        SortCriterion {
            field: field.to_string(),
            direction: SortDirection::Descending,
        }
    }
}

/// Parses `field`, `field:asc` or `field:desc`
impl FromStr for SortCriterion {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // A suffix that is not a direction stays part of the field name
        let (field, direction) = match s.rsplit_once(':') {
            Some((field, suffix)) => match suffix.parse::<SortDirection>() {
                Ok(direction) => (field, direction),
                Err(_) => (s, SortDirection::Ascending),
            },
            None => (s, SortDirection::Ascending),
        };

        if field.trim().is_empty() {
            return Err(ProcessingError::InvalidArgument(format!(
                "Missing field name in sort criterion '{}'",
                s
            )));
        }

        Ok(SortCriterion {
            field: field.to_string(),
            direction,
        })
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let direction = match self.direction {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        };
        write!(f, "{}:{}", self.field, direction)
    }
}

/// Caller-selected sort behaviour
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortOptions {
    pub collation: Collation,
    pub rank_order: RankOrder,
}

#[derive(Debug, PartialEq, Eq)]
struct DirectedKey {
    key: SortKey,
    descending: bool,
    rank_order: RankOrder,
}

impl Ord for DirectedKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.descending, self.rank_order) {
            (false, _) => self.key.cmp(&other.key),
            (true, RankOrder::Reversible) => other.key.cmp(&self.key),
            (true, RankOrder::Fixed) => self
                .key
                .rank()
                .cmp(&other.key.rank())
                .then_with(|| other.key.cmp(&self.key)),
        }
    }
}

impl PartialOrd for DirectedKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sorts record sets with a resolved collation
#[derive(Debug)]
pub struct Sorter {
    collation: ResolvedCollation,
    rank_order: RankOrder,
}

impl Sorter {
    /// Resolve the options. An unavailable locale falls back to raw
    /// ordering; the reason is kept in [`Sorter::collation_fallback`].
    pub fn new(options: &SortOptions) -> Self {
        let collation = options.collation.resolve();
        if let Some(reason) = collation.fallback() {
            warn!("{}", reason);
        }

        Sorter {
            collation,
            rank_order: options.rank_order,
        }
    }

    /// Raw collation, reversible rank order
    pub fn raw() -> Self {
        Self::new(&SortOptions::default())
    }

    pub fn collation_fallback(&self) -> Option<&str> {
        self.collation.fallback()
    }

    /// Stable sort on one field; a missing field sorts as absent
    pub fn sort_single(
        &self,
        input: &RecordSet,
        field: &str,
        descending: bool,
    ) -> Result<RecordSet, ProcessingError> {
        validate_field(input, field)?;

        let mut records = input.records.clone();
        self.sort_pass(&mut records, field, descending);
        Ok(input.derive(records))
    }

    /// Lexicographic sort over several criteria, first criterion primary.
    ///
    /// Runs one stable pass per criterion from the last to the first, so
    /// every pass only reorders the ties left by the passes before it.
    pub fn sort_multi(
        &self,
        input: &RecordSet,
        criteria: &[SortCriterion],
    ) -> Result<RecordSet, ProcessingError> {
        if criteria.is_empty() {
            return Err(ProcessingError::InvalidArgument(
                "At least one sort criterion is required".to_string(),
            ));
        }
        for criterion in criteria {
            validate_field(input, &criterion.field)?;
        }

        let mut records = input.records.clone();
        for criterion in criteria.iter().rev() {
            self.sort_pass(&mut records, &criterion.field, criterion.direction.is_descending());
        }

        debug!(
            "sorted {} record(s) by {} criteria using {} collation",
            records.len(),
            criteria.len(),
            self.collation.collator().name()
        );
        Ok(input.derive(records))
    }

    fn sort_pass(&self, records: &mut [Record], field: &str, descending: bool) {
        let collator = self.collation.collator();
        // sort_by_cached_key is stable
        records.sort_by_cached_key(|record| DirectedKey {
            key: compare_key(record.value_or_absent(field), collator),
            descending,
            rank_order: self.rank_order,
        });
    }
}

impl Default for Sorter {
    fn default() -> Self {
        Self::raw()
    }
}

/// Stable single-key sort with raw collation
pub fn sort_single(
    input: &RecordSet,
    field: &str,
    descending: bool,
) -> Result<RecordSet, ProcessingError> {
    Sorter::raw().sort_single(input, field, descending)
}

/// Multi-key sort with raw collation
pub fn sort_multi(
    input: &RecordSet,
    criteria: &[SortCriterion],
) -> Result<RecordSet, ProcessingError> {
    Sorter::raw().sort_multi(input, criteria)
}

/// Sort step for pipelines
pub struct SortProcessor {
    name: String,
    sorter: Sorter,
    criteria: Vec<SortCriterion>,
}

impl SortProcessor {
    pub fn new(criteria: Vec<SortCriterion>, options: &SortOptions) -> Self {
        let name = criteria
            .iter()
            .map(SortCriterion::to_string)
            .collect::<Vec<_>>()
            .join(",");

        SortProcessor {
            name: format!("sort_{}", name),
            sorter: Sorter::new(options),
            criteria,
        }
    }

    /// Sort on a single field ascending with raw collation
    pub fn by(field: &str) -> Self {
        Self::new(vec![SortCriterion::ascending(field)], &SortOptions::default())
    }

    pub fn collation_fallback(&self) -> Option<&str> {
        self.sorter.collation_fallback()
    }
}

impl DataProcessor for SortProcessor {
    fn process(&self, input: &RecordSet) -> Result<RecordSet, ProcessingError> {
        self.sorter.sort_multi(input, &self.criteria)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn processor_type(&self) -> ProcessorType {
        ProcessorType::Sort
    }
}
