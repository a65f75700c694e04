use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::warn;

use cra_model::RawRecord;

/// Read a JSON record batch as produced by the remote-API proxy: either a
/// bare array of objects or `{"records": [...]}`.
pub fn read_json_records(path: &Path) -> Result<Vec<RawRecord>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read json batch: {}", path.display()))?;
    let value: Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse json batch: {}", path.display()))?;
    Ok(batch_to_records(&value))
}

/// Extract loose records from a parsed batch value. Non-object elements
/// are skipped, never a fault — partial batches are acceptable input.
pub fn batch_to_records(value: &Value) -> Vec<RawRecord> {
    let array = match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("records").and_then(Value::as_array) {
            Some(items) => items.as_slice(),
            None => {
                warn!("json batch has no records array");
                return Vec::new();
            }
        },
        _ => {
            warn!("json batch is neither an array nor an object");
            return Vec::new();
        }
    };
    let mut records = Vec::with_capacity(array.len());
    let mut skipped = 0usize;
    for item in array {
        match item {
            Value::Object(map) => {
                records.push(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect());
            }
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(skipped, "skipped non-object elements in json batch");
    }
    records
}
