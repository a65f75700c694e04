use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use cra_model::RawRecord;

/// A parsed CSV upload: one header row, then data rows.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read an uploaded CSV batch. The grammar is fixed: comma-delimited,
/// double-quote escaped, UTF-8, header row required (the first row).
/// Fully-empty rows are skipped.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    if raw_rows.is_empty() {
        return Ok(CsvTable {
            headers: Vec::new(),
            rows: Vec::new(),
        });
    }
    let headers: Vec<String> = raw_rows[0].iter().map(|value| normalize_header(value)).collect();
    let mut rows = Vec::new();
    for record in raw_rows.iter().skip(1) {
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            let value = record.get(idx).map(String::as_str).unwrap_or("");
            row.push(normalize_cell(value));
        }
        rows.push(row);
    }
    Ok(CsvTable { headers, rows })
}

/// Convert table rows into loose records, keyed by header. Cells beyond
/// the header width were already dropped by `read_csv_table`.
pub fn table_to_records(table: &CsvTable) -> Vec<RawRecord> {
    table
        .rows
        .iter()
        .map(|row| {
            let mut record = RawRecord::new();
            for (header, cell) in table.headers.iter().zip(row) {
                if header.is_empty() {
                    continue;
                }
                record.insert(header.clone(), serde_json::Value::String(cell.clone()));
            }
            record
        })
        .collect()
}

/// Read a CSV upload straight into loose records.
pub fn read_csv_records(path: &Path) -> Result<Vec<RawRecord>> {
    let table = read_csv_table(path)?;
    Ok(table_to_records(&table))
}
