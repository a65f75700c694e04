//! Operating-day calendar derived from record presence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day inside the observed `[min, max]` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub appointment_count: usize,
    /// A day is a holiday iff zero records resolve to it.
    pub is_holiday: bool,
}

/// Calendar covering every day between the earliest and latest record
/// dates, inclusive. Empty when the data set has no valid dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    pub days: Vec<DayActivity>,
}

impl HolidayCalendar {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn holiday_count(&self) -> usize {
        self.days.iter().filter(|day| day.is_holiday).count()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DayActivity> {
        self.days.iter().find(|day| day.date == date)
    }
}
