// src/extract/normalize.rs
use std::collections::BTreeMap;

use crate::models::{DailyPoint, DailySeries, RawRecord};

/// Collapse raw records into one close per calendar day. The day key is the
/// first ten chars of the date (YYYY-MM-DD, timestamps truncate); records
/// are inserted in input order so the last same-day record wins; the map
/// iterates ascending.
pub fn normalize_daily(records: &[RawRecord]) -> DailySeries {
    let mut by_day: BTreeMap<String, f64> = BTreeMap::new();
    for record in records {
        let day: String = record.date.chars().take(10).collect();
        if day.is_empty() {
            continue;
        }
        by_day.insert(day, record.close);
    }
    by_day
        .into_iter()
        .map(|(date, close)| DailyPoint { date, close })
        .collect()
}
