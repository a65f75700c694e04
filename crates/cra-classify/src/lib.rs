//! Classification pass: normalized records in, classified visits out.
//!
//! One pass per analytics request. The output is immutable and never
//! persisted — every query over a date range reclassifies from scratch.

pub mod patient_type;
pub mod treatment;

pub use patient_type::{PaymentHistory, classify_patient_type};
pub use treatment::{
    CONSULTATION_MARKER, classify_treatment, find_consultation, is_consultation_name,
};

use cra_model::{AccountingEntry, CanonicalVisitRecord, ClassifiedVisit};
use cra_taxonomy::TaxonomyRegistry;
use tracing::debug;

/// Run the single classification pass over a normalized batch.
pub fn classify_visits(
    records: &[CanonicalVisitRecord],
    accounting: &[AccountingEntry],
    registry: &TaxonomyRegistry,
) -> Vec<ClassifiedVisit> {
    let history = PaymentHistory::from_entries(accounting);
    let visits: Vec<ClassifiedVisit> = records
        .iter()
        .map(|record| {
            let category = classify_treatment(
                registry,
                &record.treatment_category_raw,
                &record.treatment_name_raw,
            );
            let patient_type = classify_patient_type(record, &category, &history);
            ClassifiedVisit {
                record: record.clone(),
                category,
                patient_type,
            }
        })
        .collect();
    debug!(count = visits.len(), "classified visit batch");
    visits
}
