//! Patient cohort classification.
//!
//! `その他` visits are `Other` unconditionally — advertising, product and
//! piercing revenue never moves a patient between the new/existing
//! cohorts, whatever their history says. For countable visits the rule is
//! a strict full-timestamp comparison: any accounting entry for the same
//! patient paid strictly before the visit instant makes them `Existing`.
//! A patient whose first-ever accounting entry lands on the visit instant
//! (or later the same day) is still `New`.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use cra_model::{AccountingEntry, CanonicalVisitRecord, Category, MainCategory, PatientType};

/// Payment timestamps grouped by patient, for repeated lookups across a
/// batch.
#[derive(Debug, Default)]
pub struct PaymentHistory {
    by_patient: BTreeMap<String, Vec<NaiveDateTime>>,
}

impl PaymentHistory {
    pub fn from_entries(entries: &[AccountingEntry]) -> Self {
        let mut by_patient: BTreeMap<String, Vec<NaiveDateTime>> = BTreeMap::new();
        for entry in entries {
            by_patient
                .entry(entry.patient_id.clone())
                .or_default()
                .push(entry.paid_at);
        }
        Self { by_patient }
    }

    /// Any payment strictly before `at` for this patient.
    pub fn has_payment_before(&self, patient_id: &str, at: NaiveDateTime) -> bool {
        self.by_patient
            .get(patient_id)
            .is_some_and(|payments| payments.iter().any(|paid_at| *paid_at < at))
    }
}

/// Classify one visit against the accounting history.
pub fn classify_patient_type(
    record: &CanonicalVisitRecord,
    category: &Category,
    history: &PaymentHistory,
) -> PatientType {
    if category.main == MainCategory::Other {
        return PatientType::Other;
    }
    if history.has_payment_before(&record.patient_id, record.recorded_at) {
        PatientType::Existing
    } else {
        PatientType::New
    }
}
