// Sort engine tests
// Author: Gabriel Demetrios Lafis

use std::cmp::Ordering;

use rust_data_filter_engine::{
    data::{Record, RecordSet, Value},
    processing::{
        compare_raw, rank, sort_multi, sort_single, Collation, ProcessingError, RankOrder,
        SortCriterion, SortDirection, SortOptions, Sorter,
    },
};

fn names(records: &RecordSet) -> Vec<String> {
    records
        .iter()
        .map(|record| record.value_or_absent("name").to_string())
        .collect()
}

fn mixed_set() -> RecordSet {
    RecordSet::from_records(vec![
        Record::new().with("name", "text").with("key", "beta"),
        Record::new().with("name", "absent").with("key", Value::Absent),
        Record::new().with("name", "int").with("key", 3),
        Record::new().with("name", "bool").with("key", true),
        Record::new().with("name", "list").with("key", Value::List(vec![Value::Integer(1)])),
        Record::new().with("name", "float").with("key", 1.5),
        Record::new().with("name", "missing"),
    ])
}

#[test]
fn test_rank_partition() {
    assert_eq!(rank(&Value::Integer(1)), 0);
    assert_eq!(rank(&Value::Float(1.0)), 0);
    assert_eq!(rank(&Value::Boolean(false)), 1);
    assert_eq!(rank(&Value::Text("a".to_string())), 2);
    assert_eq!(rank(&Value::Absent), 3);
    assert_eq!(rank(&Value::List(Vec::new())), 4);
}

#[test]
fn test_every_pair_of_values_is_comparable() {
    let values = vec![
        Value::Integer(-3),
        Value::Float(2.5),
        Value::Boolean(true),
        Value::Boolean(false),
        Value::Text("b".to_string()),
        Value::Text("a".to_string()),
        Value::Absent,
        Value::List(vec![Value::Absent]),
        Value::Float(f64::NAN),
    ];

    for a in &values {
        for b in &values {
            let forward = compare_raw(a, b);
            let backward = compare_raw(b, a);
            assert_eq!(forward, backward.reverse(), "{:?} vs {:?}", a, b);
        }
    }

    assert_eq!(compare_raw(&Value::Integer(2), &Value::Float(2.5)), Ordering::Less);
    assert_eq!(compare_raw(&Value::Integer(3), &Value::Float(2.5)), Ordering::Greater);
    assert_eq!(compare_raw(&Value::Integer(2), &Value::Float(2.0)), Ordering::Equal);
    assert_eq!(compare_raw(&Value::Boolean(false), &Value::Boolean(true)), Ordering::Less);
}

#[test]
fn test_absent_sorts_last_ascending() {
    let records = RecordSet::from_records(vec![
        Record::new().with("age", 20),
        Record::new().with("age", Value::Absent),
        Record::new().with("age", 22),
    ]);

    let sorted = sort_single(&records, "age", false).unwrap();
    let ages: Vec<&Value> = sorted.column("age").collect();
    assert_eq!(ages, vec![&Value::Integer(20), &Value::Integer(22), &Value::Absent]);
}

#[test]
fn test_mixed_types_ascending() {
    let sorted = sort_single(&mixed_set(), "key", false).unwrap();
    assert_eq!(
        names(&sorted),
        vec!["float", "int", "bool", "text", "absent", "missing", "list"]
    );
}

#[test]
fn test_descending_reverses_the_rank_partition() {
    let records = mixed_set();
    let ascending = sort_single(&records, "key", false).unwrap();
    let descending = sort_single(&records, "key", true).unwrap();

    // "absent" and "missing" tie; they keep their input order in both directions
    assert_eq!(
        names(&descending),
        vec!["list", "absent", "missing", "text", "bool", "int", "float"]
    );

    let mut reversed = names(&ascending);
    reversed.reverse();
    assert_eq!(reversed, vec!["list", "missing", "absent", "text", "bool", "int", "float"]);
}

#[test]
fn test_descending_is_the_reverse_for_distinct_keys() {
    let records = RecordSet::from_records(vec![
        Record::new().with("name", "a").with("key", 5),
        Record::new().with("name", "b").with("key", "x"),
        Record::new().with("name", "c").with("key", Value::Absent),
        Record::new().with("name", "d").with("key", 1),
        Record::new().with("name", "e").with("key", false),
    ]);

    let mut ascending = names(&sort_single(&records, "key", false).unwrap());
    ascending.reverse();
    assert_eq!(ascending, names(&sort_single(&records, "key", true).unwrap()));
}

#[test]
fn test_fixed_rank_keeps_absent_last() {
    let records = mixed_set();
    let sorter = Sorter::new(&SortOptions {
        collation: Collation::Raw,
        rank_order: RankOrder::Fixed,
    });

    let descending = sorter.sort_single(&records, "key", true).unwrap();
    assert_eq!(
        names(&descending),
        vec!["int", "float", "bool", "text", "absent", "missing", "list"]
    );
}

#[test]
fn test_sort_is_stable() {
    let records = RecordSet::from_records(vec![
        Record::new().with("name", "first").with("group", 1),
        Record::new().with("name", "second").with("group", 2),
        Record::new().with("name", "third").with("group", 1),
        Record::new().with("name", "fourth").with("group", 2),
    ]);

    let ascending = sort_single(&records, "group", false).unwrap();
    assert_eq!(names(&ascending), vec!["first", "third", "second", "fourth"]);

    let descending = sort_single(&records, "group", true).unwrap();
    assert_eq!(names(&descending), vec!["second", "fourth", "first", "third"]);
}

#[test]
fn test_sort_does_not_mutate_input() {
    let records = mixed_set();
    let before = records.clone();
    let _ = sort_single(&records, "key", false).unwrap();
    assert_eq!(records, before);
}

#[test]
fn test_multi_key_sort() {
    let records = RecordSet::from_records(vec![
        Record::new().with("name", "Alice").with("city", "Paris").with("age", 30),
        Record::new().with("name", "Bob").with("city", "Lyon").with("age", 25),
        Record::new().with("name", "Chloe").with("city", "Paris").with("age", 35),
        Record::new().with("name", "David").with("city", "Lyon").with("age", 40),
        Record::new().with("name", "Emma").with("city", "Nice").with("age", 25),
    ]);

    let criteria = vec![SortCriterion::ascending("city"), SortCriterion::descending("age")];
    let sorted = sort_multi(&records, &criteria).unwrap();
    assert_eq!(names(&sorted), vec!["David", "Bob", "Emma", "Chloe", "Alice"]);

    let criteria = vec![SortCriterion::descending("age"), SortCriterion::ascending("name")];
    let sorted = sort_multi(&records, &criteria).unwrap();
    assert_eq!(names(&sorted), vec!["David", "Chloe", "Alice", "Bob", "Emma"]);
}

#[test]
fn test_multi_key_equals_single_key_for_one_criterion() {
    let records = mixed_set();
    let single = sort_single(&records, "key", true).unwrap();
    let multi = sort_multi(&records, &[SortCriterion::descending("key")]).unwrap();
    assert_eq!(single, multi);
}

#[test]
fn test_unknown_field_is_rejected() {
    let records = mixed_set();
    assert_eq!(
        sort_single(&records, "nope", false),
        Err(ProcessingError::UnknownField("nope".to_string()))
    );
    assert!(matches!(
        sort_multi(&records, &[]),
        Err(ProcessingError::InvalidArgument(_))
    ));
}

#[test]
fn test_criterion_parsing() {
    let criterion: SortCriterion = "age:desc".parse().unwrap();
    assert_eq!(criterion.field, "age");
    assert_eq!(criterion.direction, SortDirection::Descending);

    let criterion: SortCriterion = "name".parse().unwrap();
    assert_eq!(criterion, SortCriterion::ascending("name"));

    let criterion: SortCriterion = "time:12".parse().unwrap();
    assert_eq!(criterion.field, "time:12");

    assert!(":desc".parse::<SortCriterion>().is_err());
}

#[test]
fn test_locale_collation_ignores_accents_and_case() {
    let records = RecordSet::from_records(vec![
        Record::new().with("name", "zoé"),
        Record::new().with("name", "Émile"),
        Record::new().with("name", "eric"),
        Record::new().with("name", "Zachary"),
        Record::new().with("name", "édith"),
    ]);

    let raw = sort_single(&records, "name", false).unwrap();
    assert_eq!(names(&raw), vec!["Zachary", "eric", "zoé", "Émile", "édith"]);

    let sorter = Sorter::new(&SortOptions {
        collation: Collation::locale("fr_FR.UTF-8"),
        rank_order: RankOrder::Reversible,
    });
    assert!(sorter.collation_fallback().is_none());

    let collated = sorter.sort_single(&records, "name", false).unwrap();
    assert_eq!(names(&collated), vec!["édith", "Émile", "eric", "Zachary", "zoé"]);
}

#[test]
fn test_unavailable_locale_falls_back_to_raw() {
    let records = RecordSet::from_records(vec![
        Record::new().with("name", "b"),
        Record::new().with("name", "B"),
        Record::new().with("name", "a"),
    ]);

    let sorter = Sorter::new(&SortOptions {
        collation: Collation::locale("ja_JP"),
        rank_order: RankOrder::Reversible,
    });
    assert!(sorter.collation_fallback().unwrap().contains("ja_JP"));

    let sorted = sorter.sort_single(&records, "name", false).unwrap();
    assert_eq!(names(&sorted), vec!["B", "a", "b"]);
}
