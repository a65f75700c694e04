//! Revenue metric aggregates.
//!
//! Three per-patient averages with deliberately distinct definitions:
//!
//! - **same-day new average**: same-calendar-day accounting only, New
//!   patients only
//! - **new average**: lifetime accounting total (advance and remaining
//!   payments included), New patients only
//! - **existing average**: lifetime accounting total, Existing patients only
//!
//! Denominators count every patient present in the day/period, including
//! patients whose accounting total is zero. Period averages are recomputed
//! over the full period's patient lists — never a mean of daily means,
//! which would overweight low-volume days.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::category::{Category, CategoryKey};

/// One patient's revenue contribution within a day or period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRevenueEntry {
    pub patient_id: String,
    pub category: Category,
    /// Accounting posted on the same calendar day as the visit.
    pub same_day_amount: f64,
    /// Lifetime accounting total linked to the patient.
    pub total_amount: f64,
}

/// Aggregate over one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
    pub date: NaiveDate,
    pub total_revenue: f64,
    pub new_patients: Vec<PatientRevenueEntry>,
    pub existing_patients: Vec<PatientRevenueEntry>,
    pub other_patients: Vec<PatientRevenueEntry>,
    pub same_day_new_average: f64,
    pub new_average: f64,
    pub existing_average: f64,
    pub category_totals: BTreeMap<CategoryKey, f64>,
}

impl DailyMetrics {
    /// Zeroed metrics for a day with no records.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_revenue: 0.0,
            new_patients: Vec::new(),
            existing_patients: Vec::new(),
            other_patients: Vec::new(),
            same_day_new_average: 0.0,
            new_average: 0.0,
            existing_average: 0.0,
            category_totals: BTreeMap::new(),
        }
    }

    pub fn patient_count(&self) -> usize {
        self.new_patients.len() + self.existing_patients.len() + self.other_patients.len()
    }
}

/// Aggregate over an inclusive `[start, end]` date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetrics {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_revenue: f64,
    pub new_patients: Vec<PatientRevenueEntry>,
    pub existing_patients: Vec<PatientRevenueEntry>,
    pub other_patients: Vec<PatientRevenueEntry>,
    pub same_day_new_average: f64,
    pub new_average: f64,
    pub existing_average: f64,
    pub category_totals: BTreeMap<CategoryKey, f64>,
    pub days: Vec<DailyMetrics>,
}

impl PeriodMetrics {
    pub fn patient_count(&self) -> usize {
        self.new_patients.len() + self.existing_patients.len() + self.other_patients.len()
    }
}
