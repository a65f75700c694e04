//! Raw → canonical record normalization.
//!
//! Pure functions: a record either normalizes or is dropped (unresolvable
//! date), and numeric/boolean oddities degrade to documented fallbacks.
//! Nothing here can fail a batch.

use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::debug;

use cra_model::{AccountingEntry, CanonicalVisitRecord, PaymentLineItem, RawRecord};

use crate::datetime::parse_datetime;
use crate::fields;

/// Resolve the record timestamp by trying the four date tiers in fixed
/// priority order: record date, visit date, treatment date, accounting
/// date. `None` means the record has no usable date at all.
pub fn resolve_record_datetime(raw: &RawRecord) -> Option<NaiveDateTime> {
    [
        fields::RECORD_DATE,
        fields::VISIT_DATE,
        fields::TREATMENT_DATE,
        fields::ACCOUNTING_DATE,
    ]
    .iter()
    .find_map(|aliases| {
        fields::first_string(raw, aliases).and_then(|text| parse_datetime(&text))
    })
}

/// Normalize one loose record. Returns `None` when no candidate date
/// field parses — such records are excluded from every time-based
/// computation.
pub fn normalize(raw: &RawRecord) -> Option<CanonicalVisitRecord> {
    let recorded_at = resolve_record_datetime(raw)?;
    Some(CanonicalVisitRecord {
        patient_id: fields::first_string(raw, fields::PATIENT_ID).unwrap_or_default(),
        recorded_at,
        record_date: recorded_at.date(),
        clinic_id: fields::first_string(raw, fields::CLINIC_ID),
        clinic_name: fields::first_string(raw, fields::CLINIC_NAME),
        // Negative totals (refund rows) clamp to zero.
        amount_with_tax: fields::first_amount(raw, fields::AMOUNT_WITH_TAX).max(0.0),
        payment_line_items: resolve_line_items(raw),
        treatment_category_raw: fields::first_string(raw, fields::TREATMENT_CATEGORY)
            .unwrap_or_default(),
        treatment_name_raw: fields::first_string(raw, fields::TREATMENT_NAME).unwrap_or_default(),
        room_name: fields::first_string(raw, fields::ROOM_NAME),
        referral_source: fields::first_string(raw, fields::REFERRAL_SOURCE),
        appointment_route: fields::first_string(raw, fields::APPOINTMENT_ROUTE),
        staff: fields::first_string(raw, fields::STAFF),
        patient_age: fields::first_integer(raw, fields::PATIENT_AGE),
        patient_division: fields::first_string(raw, fields::PATIENT_DIVISION),
        cancelled: fields::first_flag(raw, fields::CANCELLED),
        advance_payment: fields::first_flag(raw, fields::ADVANCE_PAYMENT),
    })
}

/// Normalize a batch, dropping undateable records.
pub fn normalize_batch(raws: &[RawRecord]) -> Vec<CanonicalVisitRecord> {
    let mut records = Vec::with_capacity(raws.len());
    let mut dropped = 0usize;
    for raw in raws {
        match normalize(raw) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        debug!(dropped, kept = records.len(), "dropped records without a resolvable date");
    }
    records
}

fn resolve_line_items(raw: &RawRecord) -> Vec<PaymentLineItem> {
    let Some(Value::Array(items)) = fields::first_value(raw, fields::PAYMENT_LINE_ITEMS) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let Value::Object(map) = item else {
                return None;
            };
            let entry: RawRecord = map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            Some(PaymentLineItem {
                category: fields::first_string(&entry, fields::LINE_ITEM_CATEGORY)
                    .unwrap_or_default(),
                name: fields::first_string(&entry, fields::LINE_ITEM_NAME).unwrap_or_default(),
                price_with_tax: fields::first_amount(&entry, fields::LINE_ITEM_PRICE),
            })
        })
        .collect()
}

/// Resolve the accounting stream from a loose batch. Entries without a
/// patient identifier or a parseable payment timestamp are dropped —
/// they cannot participate in history joins.
pub fn extract_accounting(raws: &[RawRecord]) -> Vec<AccountingEntry> {
    let mut entries = Vec::new();
    let mut dropped = 0usize;
    for raw in raws {
        let patient_id = fields::first_string(raw, fields::PATIENT_ID);
        let paid_at = fields::first_string(raw, fields::PAID_AT)
            .and_then(|text| parse_datetime(&text));
        match (patient_id, paid_at) {
            (Some(patient_id), Some(paid_at)) => entries.push(AccountingEntry {
                patient_id,
                paid_at,
                amount: fields::first_amount(raw, fields::PAID_AMOUNT),
            }),
            _ => dropped += 1,
        }
    }
    if dropped > 0 {
        debug!(dropped, kept = entries.len(), "dropped unjoinable accounting rows");
    }
    entries
}
