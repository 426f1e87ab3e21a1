// src/output.rs
use std::fs;
use std::path::Path;

use log::info;
use serde_json::{json, Value};

use crate::models::ExtractionResult;
use crate::Result;

/// Write the three artifact documents. All three are always produced, even
/// when their sections are empty; field names are fixed for downstream
/// consumers.
pub fn write_artifacts(dir: &Path, result: &ExtractionResult) -> Result<()> {
    fs::create_dir_all(dir)?;
    let updated_at = result.timestamp.to_rfc3339();
    save_json(
        &dir.join("stocks.json"),
        &json!({
            "updated_at": updated_at,
            "bsi": result.bsi_index,
            "stocks": result.stocks,
        }),
    )?;
    save_json(
        &dir.join("history.json"),
        &json!({
            "updated_at": updated_at,
            "history": result.history,
        }),
    )?;
    save_json(
        &dir.join("news.json"),
        &json!({
            "updated_at": updated_at,
            "news": result.news,
        }),
    )?;
    Ok(())
}

fn save_json(path: &Path, doc: &Value) -> Result<()> {
    let file = fs::File::create(path)?;
    serde_json::to_writer_pretty(file, doc)?;
    info!("Saved {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;

    #[test]
    fn all_three_documents_appear_even_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let result = ExtractionResult {
            timestamp: Utc::now(),
            bsi_index: None,
            stocks: Vec::new(),
            history: BTreeMap::new(),
            news: Vec::new(),
        };
        write_artifacts(dir.path(), &result).unwrap();

        let stocks: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("stocks.json")).unwrap())
                .unwrap();
        assert!(stocks["updated_at"].is_string());
        assert!(stocks["bsi"].is_null());
        assert_eq!(stocks["stocks"], json!([]));

        let history: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("history.json")).unwrap())
                .unwrap();
        assert_eq!(history["history"], json!({}));

        let news: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("news.json")).unwrap())
                .unwrap();
        assert_eq!(news["news"], json!([]));
    }

    #[test]
    fn cell_values_serialize_as_number_string_or_null() {
        use crate::models::{CellValue, StockRow};
        let row = StockRow {
            symbol: "BNBL".to_string(),
            name: Some("Bhutan National Bank Ltd".to_string()),
            pe_ratio: Some(CellValue::Num(12.4)),
            price: Some(CellValue::Num(34.5)),
            change: None,
            change_pct: Some(CellValue::Text("N/A".to_string())),
            volume: None,
            value: None,
            market_cap: None,
        };
        let doc = serde_json::to_value(&row).unwrap();
        assert_eq!(doc["pe_ratio"], json!(12.4));
        assert_eq!(doc["change_pct"], json!("N/A"));
        assert_eq!(doc["change"], Value::Null);
    }
}
