//! End-to-end pipeline tests over temp batch files.

use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use tempfile::{NamedTempFile, TempDir};

use cra_cli::pipeline::{AnalysisOptions, load_batches, run_analysis, write_analytics_json};
use cra_taxonomy::TaxonomyRegistry;

fn write_file(suffix: &str, content: &str) -> (NamedTempFile, PathBuf) {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(content.as_bytes()).expect("write file");
    let path = file.path().to_path_buf();
    (file, path)
}

const RECORDS_CSV: &str = "\
患者コード,来院日,施術名,税込金額,来院きっかけ,患者区分,支払日時,支払金額
P1,2024-01-10,脱毛,33000,Instagram,初診,2024-01-10 12:00:00,33000
P1,2024-01-20,ダーマペン,19800,Instagram,再診,2024-01-20 12:00:00,19800
P2,2024-01-10,ピアス,5000,紹介,初診,2024-01-10 13:00:00,5000
";

#[test]
fn csv_batch_end_to_end() {
    let (_guard, path) = write_file(".csv", RECORDS_CSV);
    let batch = load_batches(&[path]).expect("load csv batch");
    assert_eq!(batch.len(), 3);

    let registry = TaxonomyRegistry::default();
    let result = run_analysis(&batch, &batch, &registry, AnalysisOptions::default());

    assert_eq!(result.visit_count, 3);
    assert_eq!(result.accounting_count, 3);
    assert!(!result.has_errors());

    let period = result.period.as_ref().expect("period resolved");
    assert_eq!(period.start, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    assert_eq!(period.end, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
    assert_eq!(period.days.len(), 11);

    // P1's first visit is New (same-day payment is not prior), the second
    // is Existing; P2's piercing visit is Other.
    assert_eq!(period.new_patients.len(), 1);
    assert_eq!(period.existing_patients.len(), 1);
    assert_eq!(period.other_patients.len(), 1);

    assert_eq!(period.same_day_new_average, 33000.0);
    assert_eq!(period.new_average, 52800.0);
    assert_eq!(period.existing_average, 52800.0);
    assert_eq!(period.total_revenue, 57800.0);

    let transitions = result.transitions.as_ref().expect("transitions built");
    assert_eq!(transitions.immediate_next.get("脱毛", "皮膚科"), 1);
    assert_eq!(transitions.any_later.get("脱毛", "皮膚科"), 1);
    assert_eq!(transitions.immediate_next.total(), 1);

    assert_eq!(result.holidays.len(), 11);
    assert_eq!(result.holidays.holiday_count(), 9);
}

#[test]
fn json_batch_and_report_output() {
    let json = r#"{"records": [
        {"患者コード": "P1", "来院日": "2024-01-10", "施術名": "脱毛", "来院きっかけ": "Web", "患者区分": "初診"},
        {"患者コード": "", "来院日": "2024-01-11", "施術名": "謎のご相談"}
    ]}"#;
    let (_guard, path) = write_file(".json", json);
    let batch = load_batches(&[path]).expect("load json batch");
    assert_eq!(batch.len(), 2);

    let registry = TaxonomyRegistry::default();
    let result = run_analysis(&batch, &batch, &registry, AnalysisOptions::default());

    // Second record: missing id, division, referral, and an unmapped
    // consultation name.
    assert!(result.has_errors());
    assert_eq!(result.validation.issues.len(), 4);

    let dir = TempDir::new().expect("temp dir");
    let report_path = write_analytics_json(dir.path(), &result).expect("write report");
    let content = std::fs::read_to_string(&report_path).expect("read report");
    let value: serde_json::Value = serde_json::from_str(&content).expect("parse report");
    assert_eq!(value["schema"], "clinic-revenue.analytics-report");
    assert_eq!(value["record_count"], 2);
    assert_eq!(value["validation"]["issues"].as_array().unwrap().len(), 4);
}

#[test]
fn explicit_period_bounds_override_observed_dates() {
    let (_guard, path) = write_file(".csv", RECORDS_CSV);
    let batch = load_batches(&[path]).expect("load csv batch");
    let registry = TaxonomyRegistry::default();
    let options = AnalysisOptions {
        from: Some(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()),
        to: Some(NaiveDate::from_ymd_opt(2024, 1, 12).unwrap()),
        skip_transitions: false,
    };
    let result = run_analysis(&batch, &batch, &registry, options);
    let period = result.period.as_ref().expect("period resolved");
    assert_eq!(period.days.len(), 3);
    // The 01-20 visit falls outside the window.
    assert_eq!(period.existing_patients.len(), 0);
    // Windowed transitions: only one distinct-day visit per patient left.
    let transitions = result.transitions.as_ref().expect("transitions built");
    assert_eq!(transitions.immediate_next.total(), 0);
}

#[test]
fn empty_batch_degrades_gracefully() {
    let registry = TaxonomyRegistry::default();
    let result = run_analysis(&[], &[], &registry, AnalysisOptions::default());
    assert!(result.period.is_none());
    assert!(result.holidays.is_empty());
    assert!(!result.has_errors());
}
