// Rank-based total order over heterogeneous values
// Author: Gabriel Demetrios Lafis

use std::cmp::Ordering;

use crate::data::Value;
use super::{Collator, RawCollator};

/// Type rank: numeric < boolean < text < absent < list/map
pub fn rank(value: &Value) -> u8 {
    match value {
        Value::Integer(_) | Value::Float(_) => 0,
        Value::Boolean(_) => 1,
        Value::Text(_) => 2,
        Value::Absent => 3,
        Value::List(_) | Value::Map(_) => 4,
    }
}

/// Numeric payload of a sort key, compared exactly across integers and floats
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn of(value: &Value) -> Option<Number> {
        match value {
            Value::Integer(i) => Some(Number::Int(*i)),
            Value::Float(f) => Some(Number::Float(*f)),
            _ => None,
        }
    }
}

// NaN sorts after every other number; -0.0 and 0.0 are equal.
fn cmp_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

fn cmp_int_float(i: i64, f: f64) -> Ordering {
    if f.is_nan() || f >= i64::MAX as f64 {
        return Ordering::Less;
    }
    if f < i64::MIN as f64 {
        return Ordering::Greater;
    }

    let floor = f.floor();
    match i.cmp(&(floor as i64)) {
        Ordering::Equal if f > floor => Ordering::Less,
        other => other,
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => a.cmp(&b),
            (Number::Float(a), Number::Float(b)) => cmp_floats(a, b),
            (Number::Int(a), Number::Float(b)) => cmp_int_float(a, b),
            (Number::Float(a), Number::Int(b)) => cmp_int_float(b, a).reverse(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

/// Comparison key of a value: its rank and a rank-specific secondary key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    Numeric(Number),
    Boolean(bool),
    Text(String),
    Absent,
    Complex(String),
}

impl SortKey {
    pub fn rank(&self) -> u8 {
        match self {
            SortKey::Numeric(_) => 0,
            SortKey::Boolean(_) => 1,
            SortKey::Text(_) => 2,
            SortKey::Absent => 3,
            SortKey::Complex(_) => 4,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Numeric(a), SortKey::Numeric(b)) => a.cmp(b),
            (SortKey::Boolean(a), SortKey::Boolean(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Absent, SortKey::Absent) => Ordering::Equal,
            (SortKey::Complex(a), SortKey::Complex(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Build the comparison key of a value, collating text with `collator`
pub fn compare_key(value: &Value, collator: &dyn Collator) -> SortKey {
    match value {
        Value::Integer(i) => SortKey::Numeric(Number::Int(*i)),
        Value::Float(f) => SortKey::Numeric(Number::Float(*f)),
        Value::Boolean(b) => SortKey::Boolean(*b),
        Value::Text(s) => SortKey::Text(collator.sort_key(s).into_owned()),
        Value::Absent => SortKey::Absent,
        Value::List(_) | Value::Map(_) => SortKey::Complex(value.to_string()),
    }
}

/// Compare two values under the rank order; any two values are comparable
pub fn compare_values(a: &Value, b: &Value, collator: &dyn Collator) -> Ordering {
    compare_key(a, collator).cmp(&compare_key(b, collator))
}

/// Compare two values in raw collation
pub fn compare_raw(a: &Value, b: &Value) -> Ordering {
    compare_values(a, b, &RawCollator)
}

/// Numeric comparison, `None` unless both values are numbers
pub fn compare_numeric(a: &Value, b: &Value) -> Option<Ordering> {
    Some(Number::of(a)?.cmp(&Number::of(b)?))
}
