//! The analytics pipeline: load → normalize → classify → aggregate.
//!
//! Every stage is batch-in/batch-out over immutable collections; a bad
//! record degrades (dropped or flagged), it never aborts the run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, info_span, warn};

use cra_analytics::{build_transitions, compute_period_metrics, detect_holidays};
use cra_classify::classify_visits;
use cra_ingest::{extract_accounting, normalize_batch, read_csv_records, read_json_records};
use cra_model::{
    AccountingEntry, CanonicalVisitRecord, ClassifiedVisit, CrossSellReport, HolidayCalendar,
    PeriodMetrics, RawRecord, ValidationReport,
};
use cra_taxonomy::TaxonomyRegistry;
use cra_validate::validate_batch;

use crate::types::AnalysisResult;

/// Caller-supplied knobs for one analytics request.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalysisOptions {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub skip_transitions: bool,
}

/// Read one batch file; `.json` batches come from the remote-API proxy,
/// everything else is treated as a CSV upload.
pub fn load_batch(path: &Path) -> Result<Vec<RawRecord>> {
    let records = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => read_json_records(path)?,
        _ => read_csv_records(path)?,
    };
    info!(path = %path.display(), records = records.len(), "loaded batch");
    Ok(records)
}

/// Read and concatenate all batch files.
pub fn load_batches(paths: &[PathBuf]) -> Result<Vec<RawRecord>> {
    let mut records = Vec::new();
    for path in paths {
        records.extend(load_batch(path)?);
    }
    Ok(records)
}

/// Resolve the requested period against the observed record dates.
/// Explicit bounds win; missing bounds fall back to the observed extreme.
fn resolve_period(
    records: &[CanonicalVisitRecord],
    options: AnalysisOptions,
) -> Option<(NaiveDate, NaiveDate)> {
    let observed_min = records.iter().map(|r| r.record_date).min();
    let observed_max = records.iter().map(|r| r.record_date).max();
    let start = options.from.or(observed_min)?;
    let end = options.to.or(observed_max)?;
    if start > end {
        warn!(%start, %end, "requested period is empty");
        return None;
    }
    Some((start, end))
}

/// Run the full pipeline over pre-loaded raw batches.
pub fn run_analysis(
    record_batch: &[RawRecord],
    accounting_batch: &[RawRecord],
    registry: &TaxonomyRegistry,
    options: AnalysisOptions,
) -> AnalysisResult {
    let normalize_span = info_span!("normalize");
    let (records, accounting): (Vec<CanonicalVisitRecord>, Vec<AccountingEntry>) =
        normalize_span.in_scope(|| {
            let records = normalize_batch(record_batch);
            let accounting = extract_accounting(accounting_batch);
            info!(
                raw = record_batch.len(),
                normalized = records.len(),
                accounting = accounting.len(),
                "normalized batches"
            );
            (records, accounting)
        });

    let classify_span = info_span!("classify");
    let visits: Vec<ClassifiedVisit> =
        classify_span.in_scope(|| classify_visits(&records, &accounting, registry));

    let aggregate_span = info_span!("aggregate");
    let _guard = aggregate_span.enter();

    let period: Option<PeriodMetrics> =
        resolve_period(&records, options).map(|(start, end)| {
            let windowed: Vec<ClassifiedVisit> = visits
                .iter()
                .filter(|visit| {
                    visit.record.record_date >= start && visit.record.record_date <= end
                })
                .cloned()
                .collect();
            compute_period_metrics(&windowed, &accounting, start, end)
        });

    let transitions: Option<CrossSellReport> = if options.skip_transitions {
        None
    } else {
        period.as_ref().map(|period| {
            let windowed: Vec<ClassifiedVisit> = visits
                .iter()
                .filter(|visit| {
                    visit.record.record_date >= period.start
                        && visit.record.record_date <= period.end
                })
                .cloned()
                .collect();
            build_transitions(&windowed)
        })
    };

    // The calendar and the validator run over the full normalized batch,
    // independent of the requested window.
    let holidays: HolidayCalendar = detect_holidays(&records);
    let validation: ValidationReport = validate_batch(&records, registry);

    AnalysisResult {
        raw_count: record_batch.len(),
        visit_count: records.len(),
        accounting_count: accounting.len(),
        period,
        transitions,
        holidays,
        validation,
    }
}

const REPORT_SCHEMA: &str = "clinic-revenue.analytics-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct AnalyticsReportPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    record_count: usize,
    period: Option<&'a PeriodMetrics>,
    transitions: Option<&'a CrossSellReport>,
    holidays: &'a HolidayCalendar,
    validation: &'a ValidationReport,
}

/// Write `analytics_report.json` into `output_dir`, returning the path.
pub fn write_analytics_json(output_dir: &Path, result: &AnalysisResult) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create output dir: {}", output_dir.display()))?;
    let output_path = output_dir.join("analytics_report.json");
    let payload = AnalyticsReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        record_count: result.visit_count,
        period: result.period.as_ref(),
        transitions: result.transitions.as_ref(),
        holidays: &result.holidays,
        validation: &result.validation,
    };
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(&output_path, format!("{json}\n"))
        .with_context(|| format!("write report: {}", output_path.display()))?;
    Ok(output_path)
}
