// Statistics engine tests
// Author: Gabriel Demetrios Lafis

use rust_data_filter_engine::{
    data::{Record, RecordSet, TypeTag, Value},
    processing::{compute_statistics, FieldAccumulator, NumericSummary},
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.01
}

fn sample() -> RecordSet {
    RecordSet::from_records(vec![
        Record::new().with("name", "Alice").with("price", 99.99).with("age", 20),
        Record::new().with("name", "Bob").with("price", 450.0).with("age", Value::Absent),
        Record::new().with("name", "Charlie").with("price", 15.0).with("age", "twenty"),
    ])
}

#[test]
fn test_price_summary() {
    let report = compute_statistics(&sample());
    let price = report.field("price").unwrap().numeric.clone().unwrap();

    assert_eq!(price.count, 3);
    assert!(approx(price.min, 15.0));
    assert!(approx(price.max, 450.0));
    assert!(approx(price.mean, 188.33));
    assert!(approx(price.median, 99.99));
    assert!(approx(price.std_dev.unwrap(), 230.56));
}

#[test]
fn test_single_value_has_undefined_std_dev() {
    let report = compute_statistics(&sample());
    let age = report.field("age").unwrap();
    let summary = age.numeric.as_ref().unwrap();

    assert_eq!(summary.count, 1);
    assert_eq!(summary.median, 20.0);
    assert_eq!(summary.std_dev, None);
}

#[test]
fn test_even_count_median() {
    let summary = NumericSummary::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();
    assert_eq!(summary.median, 2.5);
    assert!(NumericSummary::from_values(&[]).is_none());
}

#[test]
fn test_text_only_field_has_no_numeric_summary() {
    let report = compute_statistics(&sample());
    assert!(report.field("name").unwrap().numeric.is_none());

    let numeric: Vec<&str> = report.numeric_fields().map(|(name, _)| name).collect();
    assert_eq!(numeric, vec!["price", "age"]);
}

#[test]
fn test_type_distribution() {
    let report = compute_statistics(&sample());
    let age = report.field("age").unwrap();

    assert_eq!(age.total, 3);
    assert_eq!(age.type_counts.get(&TypeTag::Integer), Some(&1));
    assert_eq!(age.type_counts.get(&TypeTag::Absent), Some(&1));
    assert_eq!(age.type_counts.get(&TypeTag::Text), Some(&1));
    assert_eq!(age.type_counts.get(&TypeTag::Float), None);
}

#[test]
fn test_missing_fields_count_as_absent() {
    let records = RecordSet::from_records(vec![
        Record::new().with("a", 1).with("b", 2),
        Record::new().with("a", 3),
    ]);

    let report = compute_statistics(&records);
    let b = report.field("b").unwrap();
    assert_eq!(b.type_counts.get(&TypeTag::Absent), Some(&1));
    assert_eq!(b.numeric.as_ref().unwrap().count, 1);
}

#[test]
fn test_mode_counts_across_types_and_breaks_ties_by_first_seen() {
    let records = RecordSet::from_records(vec![
        Record::new().with("v", "x"),
        Record::new().with("v", 2),
        Record::new().with("v", 2.0),
        Record::new().with("v", "x"),
        Record::new().with("v", Value::Absent),
    ]);

    let report = compute_statistics(&records);
    let mode = report.field("v").unwrap().mode.clone().unwrap();
    // "x" and 2 both occur twice, "x" was seen first
    assert_eq!(mode.value, Value::Text("x".to_string()));
    assert_eq!(mode.count, 2);
}

#[test]
fn test_accumulators_merge() {
    let values = vec![
        Value::Integer(1),
        Value::Float(2.5),
        Value::Text("a".to_string()),
        Value::Integer(1),
        Value::Absent,
        Value::Integer(7),
    ];

    let mut whole = FieldAccumulator::new();
    values.iter().for_each(|value| whole.push(value));

    let mut left = FieldAccumulator::new();
    let mut right = FieldAccumulator::new();
    values[..3].iter().for_each(|value| left.push(value));
    values[3..].iter().for_each(|value| right.push(value));
    left.merge(right);

    assert_eq!(left.finish("v"), whole.finish("v"));
}

#[test]
fn test_empty_record_set() {
    let report = compute_statistics(&RecordSet::new());
    assert_eq!(report.record_count, 0);
    assert!(report.fields.is_empty());
}

#[test]
fn test_report_rendering() {
    let rendered = compute_statistics(&sample()).to_string();
    assert!(rendered.contains("price"));
    assert!(rendered.contains("188.33"));
    assert!(rendered.contains("undefined"));

    let json = serde_json::to_value(compute_statistics(&sample())).unwrap();
    assert_eq!(json["fields"][1]["name"], "price");
    assert_eq!(json["fields"][1]["numeric"]["count"], 3);
}
