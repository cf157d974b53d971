use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::{fs, path::Path};

use crate::table::Record;

const INDENT: &[u8] = b"    ";

/// Render `records` as a 4-space indented JSON array with a trailing newline.
pub fn to_json_string(records: &[Record]) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    records
        .serialize(&mut ser)
        .context("serializing records to JSON")?;
    buf.push(b'\n');
    String::from_utf8(buf).context("JSON output was not UTF-8")
}

/// Write `records` to `path`, replacing any existing file.
pub fn write_records<P: AsRef<Path>>(records: &[Record], path: P) -> Result<()> {
    let path = path.as_ref();
    let out = to_json_string(records)?;
    fs::write(path, out).with_context(|| format!("writing JSON file {}", path.display()))
}
