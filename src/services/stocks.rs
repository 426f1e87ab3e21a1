// src/services/stocks.rs
use log::warn;

use crate::config::TrackerConfig;
use crate::models::StockRow;
use crate::num::parse_number;
use crate::session::{ElementHandle, PageSession};

const TABLE_CELLS: &str = "table tbody tr td";
const TABLE_ROWS: &str = "table tbody tr";

/// Ranked probes for the pagination affordance; the first enabled match
/// wins. A heuristic list, not a contract.
enum NextRule {
    Css(&'static str),
    ButtonText(&'static str),
}

const NEXT_RULES: [NextRule; 3] = [
    NextRule::Css("button[aria-label='Next page']"),
    NextRule::Css("a[aria-label='Next']"),
    NextRule::ButtonText("Next"),
];

/// Harvest every page of the screener market-watch table. Termination:
/// each iteration either finds no next control, finds a disabled one, or
/// exhausts the page budget; a click or re-wait that times out is an early
/// non-fatal stop with the rows collected so far.
pub async fn scrape_stocks<S: PageSession>(session: &mut S, cfg: &TrackerConfig) -> Vec<StockRow> {
    let mut stocks = Vec::new();

    let url = format!("{}/screener", cfg.base_url);
    if let Err(e) = session.navigate(&url, cfg.nav_timeout_ms).await {
        warn!("stocks: failed to load {}: {}", url, e);
        return stocks;
    }
    if let Err(e) = session
        .wait_for_selector(TABLE_CELLS, cfg.table_timeout_ms)
        .await
    {
        warn!("stocks: timed out waiting for screener table: {}", e);
        return stocks;
    }

    for page in 1..=cfg.max_pages {
        for row in session.query_selector_all(TABLE_ROWS) {
            let texts: Vec<String> = row
                .query_selector_all("td")
                .iter()
                .map(|cell| cell.text())
                .collect();
            // Skip empty and header rows
            if texts.len() < 5 || texts[0].is_empty() {
                continue;
            }
            stocks.push(row_from_cells(&texts));
        }

        if page == cfg.max_pages {
            warn!("stocks: pagination budget exhausted after {} pages", page);
            break;
        }
        let next = match find_next_control(session) {
            Some(handle) if handle.is_enabled() => handle,
            _ => break,
        };
        if let Err(e) = next.click().await {
            warn!("stocks: next-page click failed after page {}: {}", page, e);
            break;
        }
        if let Err(e) = session
            .wait_for_selector(TABLE_CELLS, cfg.paginate_timeout_ms)
            .await
        {
            // Stale page after clicking next: keep the partial result
            warn!("stocks: table never settled after page {}: {}", page, e);
            break;
        }
    }

    stocks
}

// Column order observed on the screener:
// Symbol | Company Name | P/E | Price | Change | % Change | Volume | Value | Mkt Cap
fn row_from_cells(texts: &[String]) -> StockRow {
    let num = |i: usize| texts.get(i).and_then(|t| parse_number(t));
    StockRow {
        symbol: texts[0].clone(),
        name: texts.get(1).cloned(),
        pe_ratio: num(2),
        price: num(3),
        change: num(4),
        change_pct: num(5),
        volume: num(6),
        value: num(7),
        market_cap: num(8),
    }
}

fn find_next_control<S: PageSession>(session: &S) -> Option<S::Handle> {
    for rule in &NEXT_RULES {
        match rule {
            NextRule::Css(selector) => {
                if let Some(handle) = session.query_selector_all(selector).into_iter().next() {
                    return Some(handle);
                }
            }
            NextRule::ButtonText(text) => {
                for handle in session.query_selector_all("button") {
                    if handle.text().contains(text) {
                        return Some(handle);
                    }
                }
            }
        }
    }
    None
}
