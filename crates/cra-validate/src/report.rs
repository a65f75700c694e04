//! Machine-readable validation report output.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

use cra_model::{RecordError, ValidationReport};

const REPORT_SCHEMA: &str = "clinic-revenue.validation-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct ValidationReportPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    error_count: usize,
    warning_count: usize,
    issues: &'a [RecordError],
}

/// Write `validation_report.json` into `output_dir`, returning the path.
pub fn write_report_json(output_dir: &Path, report: &ValidationReport) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let output_path = output_dir.join("validation_report.json");
    let payload = ValidationReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        error_count: report.error_count(),
        warning_count: report.warning_count(),
        issues: &report.issues,
    };
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(&output_path, format!("{json}\n"))?;
    Ok(output_path)
}
