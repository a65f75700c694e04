//! Tolerant date/time parsing for clinic record fields.
//!
//! Source records mix API timestamps, Japanese CSV dates, and legacy
//! spreadsheet formats. Parsing tries datetime formats first, then
//! date-only formats (midnight assumed). Unparseable input is `None`,
//! never an error — the caller decides whether to drop the record.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Parse a date or datetime string; date-only input resolves to midnight.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(dt) = try_parse_datetime(trimmed) {
        return Some(dt);
    }
    try_parse_date(trimmed).map(|d| d.and_time(NaiveTime::MIN))
}

/// Parse a date string, accepting datetime input by truncation.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    parse_datetime(value).map(|dt| dt.date())
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
        "%Y年%m月%d日 %H:%M:%S",
        "%Y年%m月%d日 %H:%M",
    ];
    for fmt in &formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    None
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    let formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y.%m.%d",
        "%Y年%m月%d日",
        "%Y%m%d",
    ];
    for fmt in &formats {
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return Some(d);
        }
    }
    None
}
