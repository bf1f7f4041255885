// Simple pipeline example
// Author: Gabriel Demetrios Lafis

use rust_data_filter_engine::{
    data::{Record, RecordSet, Value},
    processing::{
        compute_statistics, AddFieldTransform, DataProcessor, FilterProcessor, Pipeline,
        SortCriterion, SortOptions, SortProcessor,
    },
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Records as they would come out of a loader
    let dataset = RecordSet::from_records(vec![
        employee(1, "Alice", Value::Integer(30), 75000.0),
        employee(2, "Bob", Value::Integer(25), 65000.0),
        employee(3, "Charlie", Value::Absent, 85000.0),
        employee(4, "Diana", Value::Integer(28), 70000.0),
    ]);

    println!("Original dataset:");
    println!("{}", dataset.preview(10));

    let pipeline = Pipeline::new("example")
        // Filter for age > 25, records without an age are dropped
        .add(FilterProcessor::greater_than("age", "25"))
        // Highest salary first
        .add(SortProcessor::new(
            vec![SortCriterion::descending("salary")],
            &SortOptions::default(),
        ))
        .add(AddFieldTransform::with_default("bonus", Value::Float(5000.0)));

    let result = pipeline.process(&dataset)?;

    println!("\nProcessed dataset:");
    println!("{}", result.preview(10));

    println!("\nStatistics:");
    println!("{}", compute_statistics(&dataset));

    Ok(())
}

fn employee(id: i64, name: &str, age: Value, salary: f64) -> Record {
    Record::new()
        .with("id", id)
        .with("name", name)
        .with("age", age)
        .with("salary", salary)
}
