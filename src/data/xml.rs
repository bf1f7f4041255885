// XML data source and sink implementation
// Author: Gabriel Demetrios Lafis

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use indexmap::IndexMap;
use log::{debug, warn};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::{normalize, DataError, DataSink, DataSource, RawValue, RecordSet};

const ROOT_ELEMENT: &str = "records";
const RECORD_ELEMENT: &str = "record";
/// Fallback element for names that are not valid XML names: `<field name="unit price">`
const FIELD_ELEMENT: &str = "field";

fn xml_error<E: fmt::Display>(e: E) -> DataError {
    DataError::Xml(e.to_string())
}

/// XML data source.
///
/// The root element holds one element per record; each child of a record is
/// a field named after its element (or its `name` attribute for `<field>`).
/// Field content is read as text, like CSV cells, and an empty element
/// reads as a missing value.
pub struct XmlSource {
    path: String,
}

impl XmlSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        XmlSource {
            path: path.as_ref().to_string_lossy().to_string(),
        }
    }

    /// Parse an XML document from any reader
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<RecordSet, DataError> {
        let raw_records = read_records(BufReader::new(reader))?;
        debug!("{}: decoded {} XML records", self.path, raw_records.len());

        let mut dataset = normalize(raw_records);
        dataset.metadata.add("source", "xml");
        dataset.metadata.add("path", &self.path);
        Ok(dataset)
    }
}

impl DataSource for XmlSource {
    fn read(&self) -> Result<RecordSet, DataError> {
        let file = File::open(&self.path).map_err(|e| DataError::io(&self.path, e))?;
        self.parse_reader(file)
    }

    fn name(&self) -> &str {
        &self.path
    }
}

fn field_name(element: &BytesStart) -> Result<String, DataError> {
    let name = std::str::from_utf8(element.name().as_ref())
        .map_err(xml_error)?
        .to_string();

    if name == FIELD_ELEMENT {
        if let Some(attribute) = element.try_get_attribute("name").map_err(xml_error)? {
            return Ok(attribute.unescape_value().map_err(xml_error)?.into_owned());
        }
    }
    Ok(name)
}

// Depth 1 is the root, 2 a record, 3 a field; deeper content is
// flattened into the field text.
fn read_records<R: BufRead>(input: R) -> Result<Vec<IndexMap<String, RawValue>>, DataError> {
    let mut reader = Reader::from_reader(input);
    let mut buf = Vec::new();

    let mut depth = 0usize;
    let mut records = Vec::new();
    let mut record: IndexMap<String, RawValue> = IndexMap::new();
    let mut field: Option<(String, String)> = None;

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_error)? {
            Event::Start(element) => {
                depth += 1;
                match depth {
                    2 => record = IndexMap::new(),
                    3 => field = Some((field_name(&element)?, String::new())),
                    _ => {}
                }
            }
            Event::Empty(element) => match depth {
                1 => records.push(IndexMap::new()),
                2 => {
                    record.insert(field_name(&element)?, RawValue::String(String::new()));
                }
                _ => {}
            },
            Event::Text(text) => {
                if let Some((_, content)) = field.as_mut() {
                    content.push_str(&text.unescape().map_err(xml_error)?);
                }
            }
            Event::CData(data) => {
                if let Some((_, content)) = field.as_mut() {
                    content.push_str(std::str::from_utf8(&data.into_inner()).map_err(xml_error)?);
                }
            }
            Event::End(_) => {
                match depth {
                    2 => records.push(std::mem::take(&mut record)),
                    3 => {
                        if let Some((name, content)) = field.take() {
                            record.insert(name, RawValue::String(content));
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if depth != 0 {
        return Err(DataError::Xml("unexpected end of document".to_string()));
    }
    Ok(records)
}

/// XML data sink; absent values become empty elements
pub struct XmlSink {
    path: String,
}

impl XmlSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        XmlSink {
            path: path.as_ref().to_string_lossy().to_string(),
        }
    }

    pub fn write_to<W: Write>(&self, writer: W, data: &RecordSet) -> Result<(), DataError> {
        let mut xml = Writer::new(writer);
        let catalog = data.field_catalog();

        let invalid: Vec<&String> = catalog.iter().filter(|name| !is_xml_name(name)).collect();
        if !invalid.is_empty() {
            warn!(
                "{}: fields {:?} are not valid XML names, writing them as <field name=...>",
                self.path, invalid
            );
        }

        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_error)?;
        newline(&mut xml, 0)?;
        xml.write_event(Event::Start(BytesStart::new(ROOT_ELEMENT)))
            .map_err(xml_error)?;

        for record in &data.records {
            newline(&mut xml, 1)?;
            xml.write_event(Event::Start(BytesStart::new(RECORD_ELEMENT)))
                .map_err(xml_error)?;

            for (name, value) in record.iter() {
                newline(&mut xml, 2)?;
                let (element, tag) = if is_xml_name(name) {
                    (BytesStart::new(name), name)
                } else {
                    let mut element = BytesStart::new(FIELD_ELEMENT);
                    element.push_attribute(("name", name));
                    (element, FIELD_ELEMENT)
                };

                if value.is_absent() {
                    xml.write_event(Event::Empty(element)).map_err(xml_error)?;
                } else {
                    let text = value.to_string();
                    xml.write_event(Event::Start(element)).map_err(xml_error)?;
                    xml.write_event(Event::Text(BytesText::new(&text)))
                        .map_err(xml_error)?;
                    xml.write_event(Event::End(BytesEnd::new(tag)))
                        .map_err(xml_error)?;
                }
            }

            newline(&mut xml, 1)?;
            xml.write_event(Event::End(BytesEnd::new(RECORD_ELEMENT)))
                .map_err(xml_error)?;
        }

        newline(&mut xml, 0)?;
        xml.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))
            .map_err(xml_error)?;
        newline(&mut xml, 0)?;

        xml.into_inner().flush().map_err(|e| DataError::io(&self.path, e))
    }
}

fn newline<W: Write>(xml: &mut Writer<W>, level: usize) -> Result<(), DataError> {
    let indent = format!("\n{}", "  ".repeat(level));
    xml.write_event(Event::Text(BytesText::new(&indent)))
        .map_err(xml_error)
}

/// Conservative check for names usable as element names
fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_well = chars
        .next()
        .map_or(false, |c| c.is_alphabetic() || c == '_');

    starts_well
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
        && !name.to_lowercase().starts_with("xml")
}

impl DataSink for XmlSink {
    fn write(&self, data: &RecordSet) -> Result<(), DataError> {
        let file = File::create(&self.path).map_err(|e| DataError::io(&self.path, e))?;
        self.write_to(BufWriter::new(file), data)
    }

    fn name(&self) -> &str {
        &self.path
    }
}
