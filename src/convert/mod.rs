// src/convert/mod.rs
pub mod json;
pub mod xml;

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, instrument};

use crate::table;

/// CSV file → JSON array of header-keyed objects. Returns the record count.
#[instrument(level = "info", skip(csv_path, json_path), fields(csv = %csv_path.as_ref().display()))]
pub fn csv_to_json<P: AsRef<Path>, Q: AsRef<Path>>(csv_path: P, json_path: Q) -> Result<usize> {
    let records = table::read_records(&csv_path)?;
    json::write_records(&records, &json_path)?;
    debug!(records = records.len(), out = %json_path.as_ref().display(), "wrote JSON");
    Ok(records.len())
}

/// CSV file → `<data><record>…</record></data>`. Returns the record count.
#[instrument(level = "info", skip(csv_path, xml_path), fields(csv = %csv_path.as_ref().display()))]
pub fn csv_to_xml<P: AsRef<Path>, Q: AsRef<Path>>(csv_path: P, xml_path: Q) -> Result<usize> {
    let csv_path = csv_path.as_ref();
    let table = table::read_table(csv_path)?;
    let doc = xml::build_document(&table)
        .with_context(|| format!("building XML for {}", csv_path.display()))?;
    xml::write_document(&doc, &xml_path)?;
    debug!(records = doc.records.len(), out = %xml_path.as_ref().display(), "wrote XML");
    Ok(doc.records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_row_counts_match_between_formats() -> Result<()> {
        let tmp = tempdir()?;
        let csv = tmp.path().join("people.csv");
        fs::write(&csv, "First Name,Age,City\nAnn,30,Oslo\nBob,41\nCy,22,Rome\n")?;

        let json_path = tmp.path().join("people.json");
        let xml_path = tmp.path().join("people.xml");
        assert_eq!(csv_to_json(&csv, &json_path)?, 3);
        assert_eq!(csv_to_xml(&csv, &xml_path)?, 3);

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path)?)?;
        let objects = value.as_array().unwrap();
        assert_eq!(objects.len(), 3);
        for obj in objects {
            assert_eq!(obj.as_object().unwrap().len(), 3);
        }
        assert_eq!(objects[1]["City"], "");

        let xml_out = fs::read_to_string(&xml_path)?;
        assert_eq!(xml_out.matches("<record>").count(), 3);
        assert_eq!(xml_out.matches("<First_Name>").count(), 3);
        assert_eq!(xml_out.matches("<City>").count(), 2);
        Ok(())
    }

    #[test]
    fn test_invalid_header_aborts_xml_only() -> Result<()> {
        let tmp = tempdir()?;
        let csv = tmp.path().join("bad.csv");
        fs::write(&csv, "1st,2nd\na,b\n")?;

        assert_eq!(csv_to_json(&csv, tmp.path().join("bad.json"))?, 1);
        let err = csv_to_xml(&csv, tmp.path().join("bad.xml")).unwrap_err();
        assert!(format!("{:#}", err).contains("bad.csv"));
        assert!(!tmp.path().join("bad.xml").exists());
        Ok(())
    }
}
