//! Operating-day detection.
//!
//! The clinic calendar is derived, not configured: a day inside the
//! observed date range with zero records is a holiday.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use cra_model::{CanonicalVisitRecord, DayActivity, HolidayCalendar};

/// Derive the holiday calendar over `[min, max]` of the records' resolved
/// dates. Empty input yields an empty calendar; a single-day range yields
/// one entry.
pub fn detect_holidays(records: &[CanonicalVisitRecord]) -> HolidayCalendar {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.record_date).or_insert(0) += 1;
    }
    let (Some(min), Some(max)) = (
        counts.keys().next().copied(),
        counts.keys().next_back().copied(),
    ) else {
        return HolidayCalendar::default();
    };
    let days = min
        .iter_days()
        .take_while(|date| *date <= max)
        .map(|date| {
            let appointment_count = counts.get(&date).copied().unwrap_or(0);
            DayActivity {
                date,
                appointment_count,
                is_holiday: appointment_count == 0,
            }
        })
        .collect();
    HolidayCalendar { days }
}
