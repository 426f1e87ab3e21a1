// src/services/history.rs
use std::collections::BTreeMap;

use log::{info, warn};

use crate::config::TrackerConfig;
use crate::extract::{self, decode, normalize, reassemble};
use crate::models::DailySeries;
use crate::session::PageSession;

/// History extraction strategies, tried in this order. A closed set: the
/// first strategy to produce at least one non-empty series ends the run,
/// and results from two strategies are never mixed.
#[derive(Debug, Clone, Copy)]
enum Strategy {
    LiveRender,
    EmbeddedPayload,
}

/// Best-effort walker evaluated in the live page. Looks for arrays of
/// date-keyed objects hanging off the framework's client state and returns
/// them keyed by the nearest identifier; may legitimately find nothing.
const LIVE_RENDER_WALKER: &str = r#"
(() => {
  const out = {};
  const visit = (node) => {
    if (!node || typeof node !== 'object') return;
    for (const [key, value] of Object.entries(node)) {
      if (Array.isArray(value) && value.length && value[0] && value[0].date !== undefined) {
        out[key] = value;
      } else if (typeof value === 'object') {
        visit(value);
      }
    }
  };
  visit(window.__NEXT_DATA__ || null);
  return out;
})()
"#;

pub async fn extract_history<S: PageSession>(
    session: &mut S,
    cfg: &TrackerConfig,
) -> BTreeMap<String, DailySeries> {
    if let Err(e) = session.navigate(&cfg.base_url, cfg.nav_timeout_ms).await {
        warn!("history: failed to load {}: {}", cfg.base_url, e);
        return BTreeMap::new();
    }

    for strategy in [Strategy::LiveRender, Strategy::EmbeddedPayload] {
        let series = match strategy {
            Strategy::LiveRender => live_render_series(session, cfg).await,
            Strategy::EmbeddedPayload => embedded_payload_series(session, cfg),
        };
        if !series.is_empty() {
            info!("history: {:?} produced {} series", strategy, series.len());
            return series;
        }
        info!("history: {:?} yielded nothing", strategy);
    }
    // Absence of history is a valid outcome, not an error
    BTreeMap::new()
}

async fn live_render_series<S: PageSession>(
    session: &mut S,
    cfg: &TrackerConfig,
) -> BTreeMap<String, DailySeries> {
    let mut out = BTreeMap::new();
    let value = match session.evaluate_in_page(LIVE_RENDER_WALKER).await {
        Ok(value) => value,
        Err(e) => {
            warn!("history: in-page evaluation failed: {}", e);
            return out;
        }
    };
    let map = match value.as_object() {
        Some(map) => map,
        None => return out,
    };
    for (key, raw) in map {
        // Only known symbols, or identifiers short enough to plausibly be one
        let known = cfg.known_symbols.iter().any(|(symbol, _)| symbol == key);
        if !known && key.chars().count() > cfg.max_symbol_len {
            continue;
        }
        let items = match raw.as_array() {
            Some(items) => items,
            None => continue,
        };
        let series = normalize::normalize_daily(&decode::map_record_elements(items));
        if !series.is_empty() {
            out.insert(key.clone(), series);
        }
    }
    out
}

fn embedded_payload_series<S: PageSession>(
    session: &S,
    cfg: &TrackerConfig,
) -> BTreeMap<String, DailySeries> {
    let source = session.content();
    let chunks = reassemble::harvest_chunks(&source);
    let mut buffer = reassemble::reassemble(&chunks);
    if buffer.is_empty() {
        // Some server-rendered pages inline the arrays unchunked
        info!("history: no chunked payload, scanning the page source directly");
        buffer = source;
    }

    let mut out = BTreeMap::new();
    let mut misses = 0usize;
    for (symbol, _) in &cfg.known_symbols {
        match extract::series_for_anchor(&buffer, symbol, cfg) {
            Some(series) => {
                out.insert(symbol.clone(), series);
            }
            None => misses += 1,
        }
    }
    info!(
        "history: embedded payload matched {} symbols, {} without data",
        out.len(),
        misses
    );
    out
}
