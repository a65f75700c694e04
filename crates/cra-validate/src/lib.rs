//! Structural record validation.
//!
//! Checks are independent and all evaluated — a record missing three
//! fields reports three errors. Validation never fails a batch: the
//! issue list is returned alongside the computed metrics, not instead of
//! them.

mod report;

pub use report::write_report_json;

use cra_classify::{find_consultation, is_consultation_name};
use cra_model::{CanonicalVisitRecord, ErrorSeverity, RecordError, ValidationReport};
use cra_taxonomy::TaxonomyRegistry;
use tracing::debug;

const MISSING_PATIENT_ID: (&str, &str, &str) =
    ("CRA001", "Patient identifier is missing", "患者コード");
const MISSING_PATIENT_DIVISION: (&str, &str, &str) =
    ("CRA002", "First-visit/repeat flag is missing", "患者区分");
const MISSING_REFERRAL_SOURCE: (&str, &str, &str) =
    ("CRA003", "Referral source is missing", "来院きっかけ");
const UNMAPPED_CONSULTATION: (&str, &str, &str) = (
    "CRA004",
    "Consultation name has no mapping entry",
    "施術名",
);

fn issue(
    (code, message, field): (&str, &str, &str),
    record: &CanonicalVisitRecord,
) -> RecordError {
    RecordError {
        code: code.to_string(),
        message: message.to_string(),
        severity: ErrorSeverity::Error,
        field: Some(field.to_string()),
        patient_id: if record.patient_id.is_empty() {
            None
        } else {
            Some(record.patient_id.clone())
        },
    }
}

fn is_blank(value: Option<&String>) -> bool {
    value.map(|s| s.trim().is_empty()).unwrap_or(true)
}

/// Validate one normalized record. Returns an empty list for valid
/// records; never errors.
pub fn validate(record: &CanonicalVisitRecord, registry: &TaxonomyRegistry) -> Vec<RecordError> {
    let mut issues = Vec::new();
    if record.patient_id.trim().is_empty() {
        issues.push(issue(MISSING_PATIENT_ID, record));
    }
    if is_blank(record.patient_division.as_ref()) {
        issues.push(issue(MISSING_PATIENT_DIVISION, record));
    }
    if is_blank(record.referral_source.as_ref()) {
        issues.push(issue(MISSING_REFERRAL_SOURCE, record));
    }
    if is_consultation_name(&record.treatment_name_raw)
        && find_consultation(registry, &record.treatment_name_raw).is_none()
    {
        issues.push(issue(UNMAPPED_CONSULTATION, record));
    }
    issues
}

/// Validate a batch, flattening per-record issues into one report.
pub fn validate_batch(
    records: &[CanonicalVisitRecord],
    registry: &TaxonomyRegistry,
) -> ValidationReport {
    let mut issues = Vec::new();
    for record in records {
        issues.extend(validate(record, registry));
    }
    debug!(
        records = records.len(),
        issues = issues.len(),
        "validated record batch"
    );
    ValidationReport { issues }
}
