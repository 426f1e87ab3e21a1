// src/services/index.rs
use log::warn;
use regex::Regex;
use scraper::{Html, Selector};

use crate::config::TrackerConfig;
use crate::models::CellValue;
use crate::num::parse_number;
use crate::session::PageSession;

const BSI_PATTERN: &str = r"BSI[^\d]*?([\d,]+\.?\d*)";
const NUMBER_PATTERN: &str = r"[\d,]+\.?\d*";

/// Scrape the Bhutan Stock Index value from the home page. Never an error:
/// a missing value is a null field in the output.
pub async fn scrape_bsi<S: PageSession>(session: &mut S, cfg: &TrackerConfig) -> Option<f64> {
    if let Err(e) = session.navigate(&cfg.base_url, cfg.nav_timeout_ms).await {
        warn!("bsi: failed to load {}: {}", cfg.base_url, e);
        return None;
    }
    if let Err(e) = session.wait_for_selector("body", cfg.body_timeout_ms).await {
        warn!("bsi: page body never appeared: {}", e);
        return None;
    }
    find_bsi_value(&session.content())
}

/// Look for a numeric value right after the BSI marker in the serialized
/// page; fall back to the tightest rendered element mentioning the marker.
pub fn find_bsi_value(content: &str) -> Option<f64> {
    let re = Regex::new(BSI_PATTERN).unwrap();
    if let Some(caps) = re.captures(content) {
        if let Some(CellValue::Num(n)) = parse_number(caps.get(1)?.as_str()) {
            return Some(n);
        }
    }

    // Prefer the shortest matching text: it is the most specific node
    let doc = Html::parse_document(content);
    let sel = Selector::parse("div, span, p, h1, h2, h3, h4, li, td").unwrap();
    let mut best: Option<String> = None;
    for el in doc.select(&sel) {
        let text = el.text().collect::<Vec<_>>().join(" ");
        if !text.contains("BSI") {
            continue;
        }
        if best.as_ref().map_or(true, |b| text.len() < b.len()) {
            best = Some(text);
        }
    }
    let text = best?;
    let num_re = Regex::new(NUMBER_PATTERN).unwrap();
    match parse_number(num_re.find(&text)?.as_str()) {
        Some(CellValue::Num(n)) => Some(n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_value_next_to_the_marker() {
        let content = "<html><body><div>BSI 1,234.56 pts</div></body></html>";
        assert_eq!(find_bsi_value(content), Some(1234.56));
    }

    #[test]
    fn marker_and_value_may_be_separated_by_markup() {
        let content = r#"<span class="label">BSI</span><span class="val">987.4</span>"#;
        assert_eq!(find_bsi_value(content), Some(987.4));
    }

    #[test]
    fn falls_back_to_element_text_when_digits_precede_the_marker() {
        let content = "<html><body><span>1,200.5 BSI</span></body></html>";
        assert_eq!(find_bsi_value(content), Some(1200.5));
    }

    #[test]
    fn no_marker_means_no_value() {
        assert_eq!(find_bsi_value("<html><body>nothing here</body></html>"), None);
    }
}
