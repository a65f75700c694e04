//! Daily and period revenue aggregation.
//!
//! The three averages are deliberately distinct and must not be
//! conflated:
//!
//! - same-day new average: same-calendar-day accounting only, over New
//!   visit entries;
//! - new average: lifetime accounting totals, over New visit entries;
//! - existing average: lifetime accounting totals, over Existing entries.
//!
//! A patient present in a day counts in the denominator even when no
//! accounting entry matches them. Period averages are recomputed over the
//! full period's entry lists, never averaged across days.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use cra_model::{
    AccountingEntry, CategoryKey, ClassifiedVisit, DailyMetrics, PatientRevenueEntry,
    PatientType, PeriodMetrics,
};

/// Accounting stream indexed by patient: lifetime total plus per-day
/// subtotals. The keyed structure replaces the string-concatenation
/// accumulators the upstream data entry tooling used.
#[derive(Debug, Default)]
pub struct AccountingIndex {
    by_patient: BTreeMap<String, PatientLedger>,
}

#[derive(Debug, Default)]
struct PatientLedger {
    lifetime: f64,
    by_day: BTreeMap<NaiveDate, f64>,
}

impl AccountingIndex {
    pub fn from_entries(entries: &[AccountingEntry]) -> Self {
        let mut by_patient: BTreeMap<String, PatientLedger> = BTreeMap::new();
        for entry in entries {
            let ledger = by_patient.entry(entry.patient_id.clone()).or_default();
            ledger.lifetime += entry.amount;
            *ledger.by_day.entry(entry.paid_at.date()).or_insert(0.0) += entry.amount;
        }
        Self { by_patient }
    }

    /// Lifetime accounting total for a patient (advance and remaining
    /// payments included).
    pub fn lifetime_total(&self, patient_id: &str) -> f64 {
        self.by_patient
            .get(patient_id)
            .map(|ledger| ledger.lifetime)
            .unwrap_or(0.0)
    }

    /// Accounting posted for a patient on one calendar day.
    pub fn day_total(&self, patient_id: &str, date: NaiveDate) -> f64 {
        self.by_patient
            .get(patient_id)
            .and_then(|ledger| ledger.by_day.get(&date))
            .copied()
            .unwrap_or(0.0)
    }

    /// Revenue posted across all patients on one calendar day.
    pub fn revenue_on(&self, date: NaiveDate) -> f64 {
        self.by_patient
            .values()
            .filter_map(|ledger| ledger.by_day.get(&date))
            .sum()
    }
}

fn average(sum: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { sum / count as f64 }
}

fn entry_for(visit: &ClassifiedVisit, index: &AccountingIndex, date: NaiveDate) -> PatientRevenueEntry {
    PatientRevenueEntry {
        patient_id: visit.record.patient_id.clone(),
        category: visit.category.clone(),
        same_day_amount: index.day_total(&visit.record.patient_id, date),
        total_amount: index.lifetime_total(&visit.record.patient_id),
    }
}

/// Category-breakdown totals: lifetime totals for countable cohorts,
/// same-day amounts for Other entries (Other patients have no lifetime
/// concept — product and piercing sales are day-scoped).
fn accumulate_categories(
    totals: &mut BTreeMap<CategoryKey, f64>,
    entries: &[PatientRevenueEntry],
    use_same_day: bool,
) {
    for entry in entries {
        let amount = if use_same_day {
            entry.same_day_amount
        } else {
            entry.total_amount
        };
        *totals.entry(entry.category.key()).or_insert(0.0) += amount;
    }
}

fn finish_averages(
    new_patients: &[PatientRevenueEntry],
    existing_patients: &[PatientRevenueEntry],
) -> (f64, f64, f64) {
    let same_day_new_sum: f64 = new_patients.iter().map(|e| e.same_day_amount).sum();
    let new_sum: f64 = new_patients.iter().map(|e| e.total_amount).sum();
    let existing_sum: f64 = existing_patients.iter().map(|e| e.total_amount).sum();
    (
        average(same_day_new_sum, new_patients.len()),
        average(new_sum, new_patients.len()),
        average(existing_sum, existing_patients.len()),
    )
}

/// Aggregate one calendar day with a prebuilt accounting index.
pub fn compute_daily_metrics_indexed(
    visits: &[ClassifiedVisit],
    index: &AccountingIndex,
    date: NaiveDate,
) -> DailyMetrics {
    let mut new_patients = Vec::new();
    let mut existing_patients = Vec::new();
    let mut other_patients = Vec::new();
    for visit in visits {
        if visit.record.record_date != date {
            continue;
        }
        let entry = entry_for(visit, index, date);
        match visit.patient_type {
            PatientType::New => new_patients.push(entry),
            PatientType::Existing => existing_patients.push(entry),
            PatientType::Other => other_patients.push(entry),
        }
    }
    let (same_day_new_average, new_average, existing_average) =
        finish_averages(&new_patients, &existing_patients);
    let mut category_totals = BTreeMap::new();
    accumulate_categories(&mut category_totals, &new_patients, false);
    accumulate_categories(&mut category_totals, &existing_patients, false);
    accumulate_categories(&mut category_totals, &other_patients, true);
    DailyMetrics {
        date,
        total_revenue: index.revenue_on(date),
        new_patients,
        existing_patients,
        other_patients,
        same_day_new_average,
        new_average,
        existing_average,
        category_totals,
    }
}

/// Aggregate one calendar day.
pub fn compute_daily_metrics(
    visits: &[ClassifiedVisit],
    accounting: &[AccountingEntry],
    date: NaiveDate,
) -> DailyMetrics {
    let index = AccountingIndex::from_entries(accounting);
    compute_daily_metrics_indexed(visits, &index, date)
}

/// Aggregate an inclusive `[start, end]` range: every day is computed and
/// kept, patient lists concatenate, and the three averages are recomputed
/// over the full-period lists.
pub fn compute_period_metrics(
    visits: &[ClassifiedVisit],
    accounting: &[AccountingEntry],
    start: NaiveDate,
    end: NaiveDate,
) -> PeriodMetrics {
    let index = AccountingIndex::from_entries(accounting);
    let mut period = PeriodMetrics {
        start,
        end,
        total_revenue: 0.0,
        new_patients: Vec::new(),
        existing_patients: Vec::new(),
        other_patients: Vec::new(),
        same_day_new_average: 0.0,
        new_average: 0.0,
        existing_average: 0.0,
        category_totals: BTreeMap::new(),
        days: Vec::new(),
    };
    for date in start.iter_days().take_while(|date| *date <= end) {
        let daily = compute_daily_metrics_indexed(visits, &index, date);
        period.total_revenue += daily.total_revenue;
        period.new_patients.extend(daily.new_patients.iter().cloned());
        period
            .existing_patients
            .extend(daily.existing_patients.iter().cloned());
        period.other_patients.extend(daily.other_patients.iter().cloned());
        for (key, amount) in &daily.category_totals {
            *period.category_totals.entry(key.clone()).or_insert(0.0) += amount;
        }
        period.days.push(daily);
    }
    let (same_day_new, new, existing) =
        finish_averages(&period.new_patients, &period.existing_patients);
    period.same_day_new_average = same_day_new;
    period.new_average = new;
    period.existing_average = existing;
    debug!(
        days = period.days.len(),
        new = period.new_patients.len(),
        existing = period.existing_patients.len(),
        other = period.other_patients.len(),
        "aggregated period metrics"
    );
    period
}
