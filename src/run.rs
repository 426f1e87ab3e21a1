// src/run.rs
use chrono::Utc;
use log::info;

use crate::config::TrackerConfig;
use crate::models::ExtractionResult;
use crate::services::{history, index, news, stocks};
use crate::session::PageSession;

/// One full extraction pass over a single owned session. Stages run
/// strictly sequentially: each depends on the page state the previous one
/// left behind. Every stage degrades to empty on timeout, so a completed
/// run always yields a full result.
pub async fn run_once<S: PageSession>(session: &mut S, cfg: &TrackerConfig) -> ExtractionResult {
    info!("Scraping BSI index...");
    let bsi_index = index::scrape_bsi(session, cfg).await;
    info!("  BSI: {:?}", bsi_index);

    info!("Scraping stocks...");
    let stocks = stocks::scrape_stocks(session, cfg).await;
    info!("  Found {} securities", stocks.len());

    info!("Scraping price history...");
    let history = history::extract_history(session, cfg).await;
    info!("  Found series for {} symbols", history.len());

    info!("Scraping news...");
    let news = news::scrape_news(session, cfg).await;
    info!("  Found {} news items", news.len());

    ExtractionResult {
        timestamp: Utc::now(),
        bsi_index,
        stocks,
        history,
        news,
    }
}
