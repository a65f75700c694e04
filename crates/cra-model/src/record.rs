//! Visit and accounting record types.
//!
//! `RawRecord` is the loose shape both sources produce: the remote clinic
//! API returns JSON objects, CSV uploads become string-valued maps. Field
//! names vary per source (Japanese API names, Japanese or English CSV
//! headers, legacy aliases) — the normalizer in `cra-ingest` resolves them
//! through fixed alias chains into `CanonicalVisitRecord`.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::category::{Category, PatientType};

/// One unnormalized record as delivered by either source.
pub type RawRecord = BTreeMap<String, serde_json::Value>;

/// A single line item on a visit's payment breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentLineItem {
    pub category: String,
    pub name: String,
    pub price_with_tax: f64,
}

/// The normalized visit entity consumed by every downstream component.
///
/// `record_date` is always `recorded_at.date()`; calendar computations use
/// the date, the patient-type classifier uses the full timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalVisitRecord {
    /// Stable patient/visitor identifier, required for history joins.
    pub patient_id: String,
    pub recorded_at: NaiveDateTime,
    pub record_date: NaiveDate,
    pub clinic_id: Option<String>,
    pub clinic_name: Option<String>,
    /// Total for the visit, tax included. Never negative; 0 when absent.
    pub amount_with_tax: f64,
    pub payment_line_items: Vec<PaymentLineItem>,
    pub treatment_category_raw: String,
    pub treatment_name_raw: String,
    /// Used to detect consultation-only visits (counseling rooms).
    pub room_name: Option<String>,
    pub referral_source: Option<String>,
    pub appointment_route: Option<String>,
    pub staff: Option<String>,
    pub patient_age: Option<u32>,
    /// Raw first-visit/repeat flag as recorded at reception; validation only.
    pub patient_division: Option<String>,
    pub cancelled: bool,
    pub advance_payment: bool,
}

/// One entry in the accounting stream.
///
/// `paid_at` keeps full timestamp precision: the new/existing decision is a
/// strict `<` comparison against the visit timestamp, so date-only
/// resolution would misclassify same-day payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountingEntry {
    pub patient_id: String,
    pub paid_at: NaiveDateTime,
    pub amount: f64,
}

/// A visit after the single classification pass. Immutable; recomputed on
/// every query over a date range, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedVisit {
    #[serde(flatten)]
    pub record: CanonicalVisitRecord,
    pub category: Category,
    pub patient_type: PatientType,
}
