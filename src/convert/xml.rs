use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use quick_xml::{
    escape::partial_escape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use regex::Regex;
use std::{fs, path::Path};
use tracing::trace;

use crate::table::Table;

pub const ROOT_TAG: &str = "data";
pub const RECORD_TAG: &str = "record";

/// XML 1.0 `Name` production.
static XML_NAME: Lazy<Regex> = Lazy::new(|| {
    let start = r":A-Z_a-z\x{C0}-\x{D6}\x{D8}-\x{F6}\x{F8}-\x{2FF}\x{370}-\x{37D}\x{37F}-\x{1FFF}\x{200C}-\x{200D}\x{2070}-\x{218F}\x{2C00}-\x{2FEF}\x{3001}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFFD}\x{10000}-\x{EFFFF}";
    let rest = r"\-.0-9\x{B7}\x{300}-\x{36F}\x{203F}-\x{2040}";
    Regex::new(&format!("^[{start}][{start}{rest}]*$")).expect("static XML name pattern")
});

/// A leaf element: `<tag>text</tag>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub tag: String,
    pub text: String,
}

/// `<data>` with one entry per `<record>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub records: Vec<Vec<Field>>,
}

/// Header → element name. Only spaces are rewritten.
pub fn sanitize_tag(header: &str) -> String {
    header.replace(' ', "_")
}

pub fn is_valid_tag(tag: &str) -> bool {
    XML_NAME.is_match(tag)
}

/// Build the record tree for `table`. Each row contributes the first
/// `min(headers, cells)` columns; missing cells produce no element.
pub fn build_document(table: &Table) -> Result<Document> {
    let tags: Vec<String> = table.headers.iter().map(|h| sanitize_tag(h)).collect();

    let mut records = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let mut fields = Vec::with_capacity(tags.len().min(row.len()));
        for (i, (tag, cell)) in tags.iter().zip(row).enumerate() {
            if !is_valid_tag(tag) {
                bail!(
                    "header {:?} (column {}) is not a valid XML element name as {:?}",
                    table.headers[i],
                    i,
                    tag
                );
            }
            fields.push(Field {
                tag: tag.clone(),
                text: cell.clone(),
            });
        }
        trace!(fields = fields.len(), "built record");
        records.push(fields);
    }
    Ok(Document { records })
}

/// Serialize with a UTF-8 prolog and 2-space indentation.
pub fn to_xml_string(doc: &Document) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    if doc.records.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(ROOT_TAG)))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new(ROOT_TAG)))?;
        for fields in &doc.records {
            if fields.is_empty() {
                writer.write_event(Event::Empty(BytesStart::new(RECORD_TAG)))?;
                continue;
            }
            writer.write_event(Event::Start(BytesStart::new(RECORD_TAG)))?;
            for field in fields {
                writer.write_event(Event::Start(BytesStart::new(field.tag.as_str())))?;
                writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(
                    &field.text,
                ))))?;
                writer.write_event(Event::End(BytesEnd::new(field.tag.as_str())))?;
            }
            writer.write_event(Event::End(BytesEnd::new(RECORD_TAG)))?;
        }
        writer.write_event(Event::End(BytesEnd::new(ROOT_TAG)))?;
    }

    let mut buf = writer.into_inner();
    buf.push(b'\n');
    String::from_utf8(buf).context("XML output was not UTF-8")
}

/// Write `doc` to `path`, replacing any existing file.
pub fn write_document<P: AsRef<Path>>(doc: &Document, path: P) -> Result<()> {
    let path = path.as_ref();
    let out = to_xml_string(doc)?;
    fs::write(path, out).with_context(|| format!("writing XML file {}", path.display()))
}
