// src/extract/decode.rs
use serde_json::Value;

use crate::models::RawRecord;

/// Parse a candidate span as an array of date/close records. Rejects (None)
/// when the span is not valid JSON, not an array, shorter than
/// `min_records`, or its first element lacks a date or close key. Accepted
/// arrays map element-wise; elements missing a usable date or close are
/// silently dropped.
pub fn decode_records(span: &str, min_records: usize) -> Option<Vec<RawRecord>> {
    let value: Value = serde_json::from_str(span).ok()?;
    let items = value.as_array()?;
    if items.len() < min_records {
        return None;
    }
    let first = items.first()?.as_object()?;
    if !first.contains_key("date") || !first.contains_key("close") {
        return None;
    }
    Some(map_record_elements(items))
}

/// Element-wise mapping shared with the live-render strategy, which hands
/// over already-materialized arrays that skip span validation.
pub fn map_record_elements(items: &[Value]) -> Vec<RawRecord> {
    items
        .iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            let date = obj.get("date")?.as_str()?.to_string();
            let close = coerce_close(obj.get("close")?)?;
            Some(RawRecord { date, close })
        })
        .collect()
}

/// Close values arrive as numbers or numeric strings.
pub fn coerce_close(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
