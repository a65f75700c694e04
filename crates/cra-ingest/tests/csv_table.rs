//! CSV upload parsing tests.

use std::io::Write;

use cra_ingest::{read_csv_records, read_csv_table};
use tempfile::NamedTempFile;

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write csv");
    file
}

#[test]
fn header_row_and_cells_are_normalized() {
    let file = write_csv("\u{feff}患者コード , 来院日\nP1,2024-01-10\n ,\nP2,2024-01-11\n");
    let table = read_csv_table(file.path()).expect("read table");
    assert_eq!(table.headers, vec!["患者コード", "来院日"]);
    // The all-empty row is skipped.
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0], vec!["P1", "2024-01-10"]);
}

#[test]
fn quoted_fields_with_embedded_commas() {
    let file = write_csv("施術名,総額\n\"脱毛, 全身\",\"33,000\"\n");
    let table = read_csv_table(file.path()).expect("read table");
    assert_eq!(table.rows[0][0], "脱毛, 全身");
    assert_eq!(table.rows[0][1], "33,000");
}

#[test]
fn short_rows_pad_to_header_width() {
    let file = write_csv("a,b,c\n1,2\n");
    let table = read_csv_table(file.path()).expect("read table");
    assert_eq!(table.rows[0], vec!["1", "2", ""]);
}

#[test]
fn records_are_keyed_by_header() {
    let file = write_csv("患者コード,来院日\nP1,2024-01-10\n");
    let records = read_csv_records(file.path()).expect("read records");
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].get("患者コード").and_then(|v| v.as_str()),
        Some("P1")
    );
}

#[test]
fn empty_file_yields_empty_table() {
    let file = write_csv("");
    let table = read_csv_table(file.path()).expect("read table");
    assert!(table.headers.is_empty());
    assert!(table.rows.is_empty());
}
