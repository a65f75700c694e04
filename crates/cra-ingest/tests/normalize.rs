//! Normalizer behavior over loose records.

use chrono::NaiveDate;
use serde_json::{Value, json};

use cra_ingest::{extract_accounting, normalize, normalize_batch, resolve_record_datetime};
use cra_model::RawRecord;

fn record(pairs: &[(&str, Value)]) -> RawRecord {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

#[test]
fn normalizes_japanese_csv_row() {
    let raw = record(&[
        ("来院日", json!("2024-01-10")),
        ("年齢", json!("25")),
        ("患者コード", json!("P1")),
        ("施術名", json!("脱毛")),
    ]);
    let visit = normalize(&raw).expect("record has a visit date");
    assert_eq!(visit.record_date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    assert_eq!(visit.patient_id, "P1");
    assert_eq!(visit.patient_age, Some(25));
    assert_eq!(visit.treatment_name_raw, "脱毛");
    assert_eq!(visit.amount_with_tax, 0.0);
    assert!(!visit.cancelled);
}

#[test]
fn date_tier_priority_order() {
    // Record date beats visit date beats treatment date beats accounting date.
    let raw = record(&[
        ("会計日", json!("2024-04-04")),
        ("施術日", json!("2024-03-03")),
        ("来院日", json!("2024-02-02")),
        ("記録日", json!("2024-01-01")),
    ]);
    assert_eq!(
        resolve_record_datetime(&raw).map(|dt| dt.date()),
        NaiveDate::from_ymd_opt(2024, 1, 1)
    );

    let without_record_date = record(&[
        ("会計日", json!("2024-04-04")),
        ("施術日", json!("2024-03-03")),
        ("来院日", json!("2024-02-02")),
    ]);
    assert_eq!(
        resolve_record_datetime(&without_record_date).map(|dt| dt.date()),
        NaiveDate::from_ymd_opt(2024, 2, 2)
    );
}

#[test]
fn unparseable_higher_tier_falls_through() {
    let raw = record(&[
        ("記録日", json!("不明")),
        ("来院日", json!("2024-02-02")),
    ]);
    assert_eq!(
        resolve_record_datetime(&raw).map(|dt| dt.date()),
        NaiveDate::from_ymd_opt(2024, 2, 2)
    );
}

#[test]
fn dateless_records_are_dropped() {
    let batch = vec![
        record(&[("患者コード", json!("P1"))]),
        record(&[("患者コード", json!("P2")), ("来院日", json!("2024-01-05"))]),
    ];
    let normalized = normalize_batch(&batch);
    assert_eq!(normalized.len(), 1);
    assert_eq!(normalized[0].patient_id, "P2");
}

#[test]
fn amounts_default_to_zero_and_never_go_negative() {
    let raw = record(&[
        ("来院日", json!("2024-01-10")),
        ("総額", json!("誤入力")),
    ]);
    assert_eq!(normalize(&raw).unwrap().amount_with_tax, 0.0);

    let refund = record(&[
        ("来院日", json!("2024-01-10")),
        ("総額", json!(-5000)),
    ]);
    assert_eq!(normalize(&refund).unwrap().amount_with_tax, 0.0);

    let decorated = record(&[
        ("来院日", json!("2024-01-10")),
        ("税込金額", json!("¥33,000")),
    ]);
    assert_eq!(normalize(&decorated).unwrap().amount_with_tax, 33000.0);
}

#[test]
fn payment_line_items_resolve_from_nested_array() {
    let raw = record(&[
        ("来院日", json!("2024-01-10")),
        (
            "会計明細",
            json!([
                {"カテゴリ": "皮膚科", "商品名": "ダーマペン", "税込価格": 19800},
                {"category": "物販", "name": "美容液", "price_with_tax": "5,500円"},
                "not-an-object"
            ]),
        ),
    ]);
    let visit = normalize(&raw).unwrap();
    assert_eq!(visit.payment_line_items.len(), 2);
    assert_eq!(visit.payment_line_items[0].price_with_tax, 19800.0);
    assert_eq!(visit.payment_line_items[1].price_with_tax, 5500.0);
    assert_eq!(visit.payment_line_items[1].category, "物販");
}

#[test]
fn accounting_extraction_requires_id_and_timestamp() {
    let batch = vec![
        record(&[
            ("患者コード", json!("P1")),
            ("支払日時", json!("2024-01-10 14:00:00")),
            ("支払金額", json!(30000)),
        ]),
        record(&[("患者コード", json!("P2")), ("支払金額", json!(1000))]),
        record(&[("支払日時", json!("2024-01-11")), ("支払金額", json!(1000))]),
    ];
    let entries = extract_accounting(&batch);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].patient_id, "P1");
    assert_eq!(entries[0].amount, 30000.0);
    assert_eq!(
        entries[0].paid_at.date(),
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    );
}
