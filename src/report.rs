//! Optional machine-readable run report: one JSON line per completed
//! run, appended to a configured file.

use crate::error::ImportError;
use crate::types::RunSummary;
use chrono::Utc;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
struct RunReport<'a> {
    finished_at: String,
    #[serde(flatten)]
    summary: &'a RunSummary,
}

/// Append `summary` as one JSON line to `path`, creating parent
/// directories and the file as needed.
pub fn append_run_report(path: &Path, summary: &RunSummary) -> Result<(), ImportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);

    let report = RunReport {
        finished_at: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        summary,
    };
    let json = serde_json::to_string(&report)?;
    writeln!(writer, "{}", json)?;
    writer.flush()?;

    Ok(())
}
