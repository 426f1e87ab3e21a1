// src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A table cell after tolerant numeric parsing: a number when the text was
/// numeric after cleaning, otherwise the trimmed original text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Num(f64),
    Text(String),
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Num(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }
}

/// One row of the screener market-watch table. Field names match the JSON
/// consumed downstream; do not rename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockRow {
    pub symbol: String,
    pub name: Option<String>,
    pub pe_ratio: Option<CellValue>,
    pub price: Option<CellValue>,
    pub change: Option<CellValue>,
    pub change_pct: Option<CellValue>,
    pub volume: Option<CellValue>,
    pub value: Option<CellValue>,
    pub market_cap: Option<CellValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    /// Raw date text as published; not parsed.
    pub date: Option<String>,
    pub url: Option<String>,
}

/// A record as decoded from an embedded payload array, close already coerced.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub date: String,
    pub close: f64,
}

/// One closing value per calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: String,
    pub close: f64,
}

/// Strictly ascending by date, at most one entry per day.
pub type DailySeries = Vec<DailyPoint>;

/// Everything one run produced. Assembled once, immutable afterwards; the
/// output writer serializes it into the three artifact documents.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    pub timestamp: DateTime<Utc>,
    pub bsi_index: Option<f64>,
    pub stocks: Vec<StockRow>,
    pub history: BTreeMap<String, DailySeries>,
    pub news: Vec<NewsItem>,
}
