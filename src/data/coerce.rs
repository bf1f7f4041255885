// Type coercion of raw decoded values
// Author: Gabriel Demetrios Lafis

use serde_json::Value as JsonValue;

use super::{RawValue, Value};

/// Placeholder tokens treated as missing data (compared lower-cased and trimmed)
pub const ABSENT_TOKENS: [&str; 6] = ["", "n/a", "na", "n.a.", "nan", "null"];

/// Tokens read as boolean true
pub const TRUE_TOKENS: [&str; 4] = ["true", "vrai", "t", "1"];

/// Tokens read as boolean false
pub const FALSE_TOKENS: [&str; 4] = ["false", "faux", "f", "0"];

/// Coerce a raw decoded value into its canonical typed form.
///
/// Non-text scalars and lists are kept as they are, null becomes
/// [`Value::Absent`] and text is classified by [`coerce_str`]. Nested
/// objects are kept unchanged as [`Value::Map`]. Every input maps to
/// exactly one value.
pub fn coerce(raw: &RawValue) -> Value {
    match raw {
        JsonValue::String(text) => coerce_str(text),
        JsonValue::Null
        | JsonValue::Bool(_)
        | JsonValue::Number(_)
        | JsonValue::Array(_)
        | JsonValue::Object(_) => Value::from_raw(raw),
    }
}

/// Classify a piece of text.
///
/// Classification works on a trimmed, lower-cased copy; text that is not
/// recognised as missing, numeric or boolean is returned untouched.
pub fn coerce_str(text: &str) -> Value {
    let trimmed = text.trim();
    let folded = trimmed.to_lowercase();

    if ABSENT_TOKENS.contains(&folded.as_str()) {
        return Value::Absent;
    }

    if let Some(number) = parse_number(trimmed) {
        return number;
    }

    if TRUE_TOKENS.contains(&folded.as_str()) {
        Value::Boolean(true)
    } else if FALSE_TOKENS.contains(&folded.as_str()) {
        Value::Boolean(false)
    } else {
        Value::Text(text.to_string())
    }
}

/// Integer when the text has no decimal point and fits an `i64`, otherwise
/// a finite float. "inf" and friends stay text.
fn parse_number(text: &str) -> Option<Value> {
    if !text.contains('.') {
        if let Ok(i) = text.parse::<i64>() {
            return Some(Value::Integer(i));
        }
    }

    text.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Value::Float)
}
