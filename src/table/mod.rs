// src/table/mod.rs
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::{fs, path::Path};
use tracing::{debug, instrument, trace};

/// One CSV file as read from disk: the header row plus every data row,
/// cells kept exactly as parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Column names from the first row of the file, in file order.
    pub headers: Vec<String>,
    /// Each data row as a Vec of Strings. Rows may be shorter or longer than `headers`.
    pub rows: Vec<Vec<String>>,
}

/// A single data row keyed by header, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl Table {
    /// Pair every row with the header. Missing trailing cells become `""`,
    /// cells past the last header are dropped. A repeated header keeps its
    /// first position and the value of its last column.
    pub fn into_records(self) -> Vec<Record> {
        let Table { headers, rows } = self;
        rows.into_iter()
            .map(|row| {
                let mut cells = row.into_iter();
                let mut fields: Vec<(String, String)> = Vec::with_capacity(headers.len());
                for h in &headers {
                    let cell = cells.next().unwrap_or_default();
                    match fields.iter_mut().find(|(k, _)| k == h) {
                        Some((_, v)) => *v = cell,
                        None => fields.push((h.clone(), cell)),
                    }
                }
                Record { fields }
            })
            .collect()
    }

    /// Parse CSV text. The first non-blank row is the header; an empty input
    /// gives an empty table.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // short and long rows are both legal
            .from_reader(text.as_bytes());

        let mut table = Table::default();
        for (idx, result) in rdr.records().enumerate() {
            let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
            let cells: Vec<String> = record.iter().map(str::to_owned).collect();
            if idx == 0 {
                table.headers = cells;
            } else {
                trace!(record = idx, cells = cells.len(), "parsed row");
                table.rows.push(cells);
            }
        }
        Ok(table)
    }
}

/// Read `path` as UTF-8 and split it into header and raw rows.
#[instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading CSV file {}", path.display()))?;
    let table = Table::parse(&text).with_context(|| format!("parsing {}", path.display()))?;
    debug!(
        columns = table.headers.len(),
        rows = table.rows.len(),
        "loaded table"
    );
    Ok(table)
}

/// Read `path` as a sequence of header-keyed records.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    Ok(read_table(path)?.into_records())
}
