//! Export batch reports to JSON or CSV.
//!
//! The format follows the file extension: `.csv` writes one row per item, anything
//! else writes the full report as pretty JSON.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::domain::BatchReport;
use crate::error::{AppError, EXIT_IO};

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    line: usize,
    data: &'a str,
    output: String,
    succeeded: bool,
    error: &'a str,
}

/// Write `report` to `path`.
pub fn write_report(path: &Path, report: &BatchReport) -> Result<(), AppError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        write_report_csv(path, report)
    } else {
        write_report_json(path, report)
    }
}

fn write_report_json(path: &Path, report: &BatchReport) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to create report '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to write report JSON: {e}")))?;
    Ok(())
}

fn write_report_csv(path: &Path, report: &BatchReport) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to create report '{}': {e}", path.display())))?;

    for item in &report.items {
        writer
            .serialize(ReportRow {
                line: item.line_number,
                data: &item.source_line,
                output: item.result.output_path.display().to_string(),
                succeeded: item.result.succeeded,
                error: item.result.error_detail.as_deref().unwrap_or(""),
            })
            .map_err(|e| AppError::new(EXIT_IO, format!("Failed to write report CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to write report CSV: {e}")))?;
    Ok(())
}
