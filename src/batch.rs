// src/batch.rs
use anyhow::{Context, Result};
use glob::{glob_with, MatchOptions, Pattern};
use std::{fs, path::PathBuf, time::Instant};
use tracing::{info, instrument, warn};

use crate::{config::Config, convert};

/// Totals for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub files: usize,
    pub records: usize,
}

/// All `*.csv` regular files directly inside `cfg.input_dir`, sorted by name.
pub fn discover_csv_files(cfg: &Config) -> Result<Vec<PathBuf>> {
    let dir = Pattern::escape(&cfg.input_dir.to_string_lossy());
    let pattern = if dir.is_empty() {
        "*.csv".to_string()
    } else {
        format!("{}/*.csv", dir)
    };
    let opts = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let mut files = Vec::new();
    for entry in glob_with(&pattern, opts)
        .with_context(|| format!("Failed to read glob pattern '{}'", pattern))?
    {
        let path = entry.context("listing input directory")?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Convert every CSV in `cfg.input_dir` to JSON and XML. Stops at the first error.
#[instrument(level = "info", skip(cfg), fields(input = %cfg.input_dir.display()))]
pub fn run(cfg: &Config) -> Result<Summary> {
    let start = Instant::now();

    for d in [&cfg.json_dir, &cfg.xml_dir] {
        fs::create_dir_all(d)
            .with_context(|| format!("creating output directory {}", d.display()))?;
    }
    if !cfg.input_dir.is_dir() {
        warn!("input directory {} does not exist", cfg.input_dir.display());
    }

    let files = discover_csv_files(cfg)?;
    info!("{} CSV files to convert", files.len());

    let mut summary = Summary::default();
    for csv_path in files {
        let stem = csv_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .with_context(|| format!("no file stem for {}", csv_path.display()))?;

        let json_path = cfg.json_dir.join(format!("{}.json", stem));
        println!("Converting {} to {}", csv_path.display(), json_path.display());
        let records = convert::csv_to_json(&csv_path, &json_path)?;

        let xml_path = cfg.xml_dir.join(format!("{}.xml", stem));
        println!("Converting {} to {}", csv_path.display(), xml_path.display());
        convert::csv_to_xml(&csv_path, &xml_path)?;

        summary.files += 1;
        summary.records += records;
    }

    println!("Conversion completed successfully!");
    info!(
        files = summary.files,
        records = summary.records,
        elapsed = ?start.elapsed(),
        "all done"
    );
    Ok(summary)
}
