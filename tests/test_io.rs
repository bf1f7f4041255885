// File format tests
// Author: Gabriel Demetrios Lafis

use std::fs;
use std::io::Cursor;

use rust_data_filter_engine::{
    data::{
        load_file, save_file, CsvSink, CsvSource, DataError, DataSource, FileFormat, JsonSource,
        Record, RecordSet, Value, XmlSink, XmlSource, YamlSource,
    },
    processing::{Collation, RankOrder},
    utils::{parse_level, Config},
};
use tempfile::tempdir;

fn sample() -> RecordSet {
    RecordSet::from_records(vec![
        Record::new()
            .with("name", "Alice")
            .with("age", 20)
            .with("price", 99.99)
            .with("apprentice", true),
        Record::new()
            .with("name", "Bob")
            .with("age", Value::Absent)
            .with("price", 450.5)
            .with("apprentice", false),
    ])
}

#[test]
fn test_csv_cells_are_coerced() {
    let text = "name,age,active,note\nAlice, 20 ,vrai,N/A\nBob,22.5,F,hello\n";
    let source = CsvSource::new("inline.csv", true, b',');
    let records = source.parse_reader(Cursor::new(text)).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records.records[0].get("age"), Some(&Value::Integer(20)));
    assert_eq!(records.records[0].get("active"), Some(&Value::Boolean(true)));
    assert_eq!(records.records[0].get("note"), Some(&Value::Absent));
    assert_eq!(records.records[1].get("age"), Some(&Value::Float(22.5)));
    assert_eq!(records.records[1].get("active"), Some(&Value::Boolean(false)));
    assert_eq!(records.records[1].get("note"), Some(&Value::Text("hello".to_string())));
    assert_eq!(records.metadata.get("source"), Some(&"csv".to_string()));
}

#[test]
fn test_csv_without_header_and_short_rows() {
    let text = "1;a\n2\n";
    let source = CsvSource::new("inline.csv", false, b';');
    let records = source.parse_reader(Cursor::new(text)).unwrap();

    assert_eq!(records.field_catalog(), vec!["column_0", "column_1"]);
    assert_eq!(records.records[1].get("column_0"), Some(&Value::Integer(2)));
    assert_eq!(records.records[1].get("column_1"), None);
}

#[test]
fn test_csv_short_row_with_header_reads_absent() {
    let text = "a,b\n1\n";
    let source = CsvSource::new("inline.csv", true, b',');
    let records = source.parse_reader(Cursor::new(text)).unwrap();

    assert_eq!(records.records[0].get("b"), Some(&Value::Absent));
}

#[test]
fn test_csv_duplicate_headers_are_renamed() {
    let text = "name,score,score,score\nAlice,10,20,30\n";
    let source = CsvSource::new("inline.csv", true, b',');
    let records = source.parse_reader(Cursor::new(text)).unwrap();

    assert_eq!(
        records.field_catalog(),
        vec!["name", "score", "score_1", "score_2"]
    );
    assert_eq!(records.records[0].get("score"), Some(&Value::Integer(10)));
    assert_eq!(records.records[0].get("score_1"), Some(&Value::Integer(20)));
    assert_eq!(records.records[0].get("score_2"), Some(&Value::Integer(30)));
}

#[test]
fn test_csv_writer_output() {
    let mut buffer = Vec::new();
    CsvSink::new("out.csv", b',')
        .write_to(&mut buffer, &sample())
        .unwrap();

    let text = String::from_utf8(buffer).unwrap();
    assert_eq!(
        text,
        "name,age,price,apprentice\nAlice,20,99.99,true\nBob,,450.5,false\n"
    );
}

#[test]
fn test_file_round_trips() {
    let dir = tempdir().unwrap();

    for file_name in ["data.csv", "data.json", "data.yaml", "data.xml"] {
        let path = dir.path().join(file_name);
        save_file(&path, &sample()).unwrap();

        let loaded = load_file(&path).unwrap();
        assert_eq!(loaded.records, sample().records, "{}", file_name);
    }
}

#[test]
fn test_json_absent_is_written_as_null() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    save_file(&path, &sample()).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert!(json[1]["age"].is_null());
    assert_eq!(json[0]["name"], "Alice");
}

#[test]
fn test_json_text_is_coerced_but_nested_values_are_kept() {
    let text = r#"[{"id": "7", "score": 1.5, "tags": ["1", "x"],
        "extra": {"k": "true"}, "gone": null}]"#;
    let records = JsonSource::new("inline.json")
        .parse_reader(Cursor::new(text))
        .unwrap();
    let record = &records.records[0];

    assert_eq!(record.get("id"), Some(&Value::Integer(7)));
    assert_eq!(record.get("score"), Some(&Value::Float(1.5)));
    assert_eq!(
        record.get("tags"),
        Some(&Value::List(vec![
            Value::Text("1".to_string()),
            Value::Text("x".to_string())
        ]))
    );
    assert_eq!(record.value_or_absent("extra").type_tag().as_str(), "map");
    assert_eq!(record.get("gone"), Some(&Value::Absent));
}

#[test]
fn test_json_array_path() {
    let text = r#"{"data": {"items": [{"a": 1}, {"a": 2}]}}"#;
    let records = JsonSource::with_array_path("inline.json", "data.items")
        .parse_reader(Cursor::new(text))
        .unwrap();
    assert_eq!(records.len(), 2);

    let missing = JsonSource::with_array_path("inline.json", "data.rows")
        .parse_reader(Cursor::new(text));
    assert!(matches!(missing, Err(DataError::Parse(_))));
}

#[test]
fn test_non_record_documents_are_rejected() {
    let source = JsonSource::new("inline.json");
    assert!(matches!(
        source.parse_reader(Cursor::new(r#"{"a": 1}"#)),
        Err(DataError::Parse(_))
    ));
    assert!(matches!(
        source.parse_reader(Cursor::new(r#"[{"a": 1}, 2]"#)),
        Err(DataError::Parse(_))
    ));
    assert!(matches!(
        source.parse_reader(Cursor::new("[{")),
        Err(DataError::Json(_))
    ));
}

#[test]
fn test_yaml_source() {
    let text = "- name: Alice\n  age: '20'\n- name: Bob\n  age: n/a\n";
    let records = YamlSource::new("inline.yaml")
        .parse_reader(Cursor::new(text))
        .unwrap();

    assert_eq!(records.records[0].get("age"), Some(&Value::Integer(20)));
    assert_eq!(records.records[1].get("age"), Some(&Value::Absent));
}

#[test]
fn test_xml_source() {
    let text = r#"<?xml version="1.0"?>
<people>
  <person>
    <name>Alice &amp; Co</name>
    <age> 20 </age>
    <field name="unit price">99.99</field>
    <note/>
  </person>
  <person>
    <name><![CDATA[<Bob>]]></name>
    <age>n/a</age>
  </person>
</people>"#;
    let records = XmlSource::new("inline.xml")
        .parse_reader(Cursor::new(text))
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records.field_catalog(), vec!["name", "age", "unit price", "note"]);

    let first = &records.records[0];
    assert_eq!(first.get("name"), Some(&Value::Text("Alice & Co".to_string())));
    assert_eq!(first.get("age"), Some(&Value::Integer(20)));
    assert_eq!(first.get("unit price"), Some(&Value::Float(99.99)));
    assert_eq!(first.get("note"), Some(&Value::Absent));

    let second = &records.records[1];
    assert_eq!(second.get("name"), Some(&Value::Text("<Bob>".to_string())));
    assert_eq!(second.get("age"), Some(&Value::Absent));
    assert_eq!(records.metadata.get("source"), Some(&"xml".to_string()));
}

#[test]
fn test_xml_writer_output() {
    let records = RecordSet::from_records(vec![Record::new()
        .with("name", "A<B")
        .with("age", Value::Absent)
        .with("unit price", 2.5)]);

    let mut buffer = Vec::new();
    XmlSink::new("out.xml")
        .write_to(&mut buffer, &records)
        .unwrap();
    let text = String::from_utf8(buffer).unwrap();

    assert!(text.contains("<name>A&lt;B</name>"));
    assert!(text.contains("<age/>"));
    assert!(text.contains(r#"<field name="unit price">2.5</field>"#));

    let reloaded = XmlSource::new("out.xml")
        .parse_reader(Cursor::new(text))
        .unwrap();
    assert_eq!(reloaded.records, records.records);
}

#[test]
fn test_malformed_xml_is_rejected() {
    let source = XmlSource::new("inline.xml");
    assert!(matches!(
        source.parse_reader(Cursor::new("<records><record><a>1</b></record></records>")),
        Err(DataError::Xml(_))
    ));
    assert!(matches!(
        source.parse_reader(Cursor::new("<records><record><a>1</a>")),
        Err(DataError::Xml(_))
    ));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let result = CsvSource::new(dir.path().join("nope.csv"), true, b',').read();
    assert!(matches!(result, Err(DataError::Io { .. })));
}

#[test]
fn test_format_detection() {
    assert_eq!(FileFormat::from_path("a/b.CSV").unwrap(), FileFormat::Csv);
    assert_eq!(FileFormat::from_path("b.yml").unwrap(), FileFormat::Yaml);
    assert_eq!(FileFormat::from_path("people.XML").unwrap(), FileFormat::Xml);
    assert_eq!(FileFormat::Json.extension(), "json");
    assert!(matches!(
        FileFormat::from_path("b.parquet"),
        Err(DataError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        load_file("no_extension"),
        Err(DataError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_config_files() {
    let dir = tempdir().unwrap();

    let json_path = dir.path().join("config.json");
    fs::write(
        &json_path,
        r#"{"logging": {"level": "debug"}, "sort": {"locale": "fr_FR", "fixed_rank": true}}"#,
    )
    .unwrap();
    let config = Config::from_file(&json_path).unwrap();
    assert_eq!(config.log_level_filter(), log::LevelFilter::Debug);
    assert_eq!(config.display.preview_rows, 5);

    let options = config.sort_options();
    assert_eq!(options.collation, Collation::locale("fr_FR"));
    assert_eq!(options.rank_order, RankOrder::Fixed);

    let yaml_path = dir.path().join("config.yaml");
    fs::write(&yaml_path, "display:\n  preview_rows: 12\n").unwrap();
    let config = Config::from_file(&yaml_path).unwrap();
    assert_eq!(config.display.preview_rows, 12);
    assert_eq!(config.sort_options().collation, Collation::Raw);
    assert_eq!(config.sort_options().rank_order, RankOrder::Reversible);

    fs::write(&yaml_path, "display:\n  preview_rows: 0\n").unwrap();
    assert!(Config::from_file(&yaml_path).is_err());

    fs::write(&yaml_path, "logging:\n  level: loud\n").unwrap();
    assert!(Config::from_file(&yaml_path).is_err());
}

#[test]
fn test_level_names() {
    assert_eq!(parse_level(" WARNING "), Some(log::LevelFilter::Warn));
    assert_eq!(parse_level("trace"), Some(log::LevelFilter::Trace));
    assert_eq!(parse_level("loud"), None);
}
