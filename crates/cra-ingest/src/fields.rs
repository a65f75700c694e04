//! Field-alias tables and loose-value accessors.
//!
//! Every logical field has an explicit ordered list of candidate keys —
//! remote-API names, Japanese CSV headers, and legacy aliases — tried in
//! fixed priority order. Resolution never enumerates record keys
//! dynamically, so adding unrelated columns to an upload cannot change
//! which value a field resolves to.

use serde_json::Value;

use cra_model::RawRecord;

pub const PATIENT_ID: &[&str] = &[
    "患者コード",
    "患者番号",
    "カルテ番号",
    "patient_code",
    "patient_id",
    "visitor_id",
];

/// Record-date candidates, one group per priority tier. The first tier
/// with a parseable value wins.
pub const RECORD_DATE: &[&str] = &["記録日", "record_date"];
pub const VISIT_DATE: &[&str] = &["来院日", "来店日", "visit_date"];
pub const TREATMENT_DATE: &[&str] = &["施術日", "treatment_date"];
pub const ACCOUNTING_DATE: &[&str] = &["会計日", "精算日", "accounting_date"];

pub const CLINIC_ID: &[&str] = &["クリニックID", "店舗ID", "clinic_id"];
pub const CLINIC_NAME: &[&str] = &["クリニック名", "店舗名", "clinic_name"];

pub const AMOUNT_WITH_TAX: &[&str] = &[
    "税込金額",
    "合計金額",
    "総額",
    "amount_with_tax",
    "total_amount",
];

pub const PAYMENT_LINE_ITEMS: &[&str] = &["会計明細", "明細", "payments", "payment_details"];
pub const LINE_ITEM_CATEGORY: &[&str] = &["カテゴリ", "category"];
pub const LINE_ITEM_NAME: &[&str] = &["商品名", "名称", "name"];
pub const LINE_ITEM_PRICE: &[&str] = &["税込価格", "金額", "price_with_tax", "price"];

pub const TREATMENT_CATEGORY: &[&str] = &["施術カテゴリ", "カテゴリ", "treatment_category"];
pub const TREATMENT_NAME: &[&str] = &["施術名", "メニュー名", "treatment_name", "menu_name"];

pub const ROOM_NAME: &[&str] = &["部屋名", "ルーム名", "room_name"];
pub const REFERRAL_SOURCE: &[&str] = &["来院きっかけ", "紹介元", "referral_source"];
pub const APPOINTMENT_ROUTE: &[&str] = &["予約経路", "appointment_route"];
pub const STAFF: &[&str] = &["担当者", "担当スタッフ", "staff"];
pub const PATIENT_AGE: &[&str] = &["年齢", "age", "patient_age"];
pub const PATIENT_DIVISION: &[&str] = &["患者区分", "初診再診", "patient_division"];

pub const CANCELLED: &[&str] = &["キャンセル", "キャンセルフラグ", "cancelled", "is_cancelled"];
pub const ADVANCE_PAYMENT: &[&str] = &["前受金", "前受金フラグ", "advance_payment"];

pub const PAID_AT: &[&str] = &["支払日時", "支払日", "入金日", "会計日時", "paid_at", "payment_date"];
pub const PAID_AMOUNT: &[&str] = &["支払金額", "金額", "amount", "支払額"];

/// First present candidate value, regardless of content.
pub fn first_value<'a>(record: &'a RawRecord, aliases: &[&str]) -> Option<&'a Value> {
    aliases.iter().find_map(|key| record.get(*key))
}

/// First candidate that resolves to a non-empty trimmed string. Numbers
/// stringify; null/absent/empty keep searching down the alias chain.
pub fn first_string(record: &RawRecord, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|key| {
        record.get(*key).and_then(|value| {
            let text = match value {
                Value::String(s) => s.trim().to_string(),
                Value::Number(n) => n.to_string(),
                _ => return None,
            };
            if text.is_empty() { None } else { Some(text) }
        })
    })
}

/// Tolerant numeric resolution: `0.0` on absence or parse failure, never
/// an error. String values may carry currency decoration (`¥33,000`,
/// `33000円`).
pub fn first_amount(record: &RawRecord, aliases: &[&str]) -> f64 {
    first_value(record, aliases)
        .and_then(parse_amount_value)
        .unwrap_or(0.0)
}

pub fn parse_amount_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_amount_str(s),
        _ => None,
    }
}

pub fn parse_amount_str(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, ',' | '¥' | '￥' | '円' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Integer resolution with the same fallback posture as `first_amount`.
pub fn first_integer(record: &RawRecord, aliases: &[&str]) -> Option<u32> {
    let value = first_value(record, aliases)?;
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

/// Boolean-like flag resolution: the string `"1"`, the string `"true"`,
/// or JSON `true`. Anything else — including absence — is `false`.
pub fn first_flag(record: &RawRecord, aliases: &[&str]) -> bool {
    first_value(record, aliases)
        .map(|value| match value {
            Value::Bool(b) => *b,
            Value::String(s) => {
                let trimmed = s.trim();
                trimmed == "1" || trimmed.eq_ignore_ascii_case("true")
            }
            _ => false,
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, Value)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn alias_priority_is_fixed() {
        let rec = record(&[
            ("patient_code", Value::String("EN".into())),
            ("患者コード", Value::String("JP".into())),
        ]);
        assert_eq!(first_string(&rec, PATIENT_ID), Some("JP".to_string()));
    }

    #[test]
    fn empty_values_fall_through() {
        let rec = record(&[
            ("患者コード", Value::String("  ".into())),
            ("patient_code", Value::String("P9".into())),
        ]);
        assert_eq!(first_string(&rec, PATIENT_ID), Some("P9".to_string()));
    }

    #[test]
    fn amount_parsing_is_tolerant() {
        assert_eq!(parse_amount_str("33000"), Some(33000.0));
        assert_eq!(parse_amount_str("¥33,000"), Some(33000.0));
        assert_eq!(parse_amount_str("33000円"), Some(33000.0));
        assert_eq!(parse_amount_str("unknown"), None);
        let rec = record(&[("総額", Value::String("three".into()))]);
        assert_eq!(first_amount(&rec, AMOUNT_WITH_TAX), 0.0);
    }

    #[test]
    fn flags_accept_only_known_truthy_shapes() {
        let truthy = record(&[("キャンセル", Value::String("1".into()))]);
        assert!(first_flag(&truthy, CANCELLED));
        let truthy_bool = record(&[("cancelled", Value::Bool(true))]);
        assert!(first_flag(&truthy_bool, CANCELLED));
        let truthy_word = record(&[("cancelled", Value::String("true".into()))]);
        assert!(first_flag(&truthy_word, CANCELLED));
        let falsy = record(&[("cancelled", Value::String("yes".into()))]);
        assert!(!first_flag(&falsy, CANCELLED));
        let falsy_num = record(&[("cancelled", Value::Number(1.into()))]);
        assert!(!first_flag(&falsy_num, CANCELLED));
    }
}
