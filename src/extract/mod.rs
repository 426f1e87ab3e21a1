// src/extract/mod.rs
// Embedded structured-data extraction engine: reassemble the page's chunked
// escaped payload into one buffer, then per known symbol locate, bound,
// decode and normalize its daily record array.

pub mod decode;
pub mod locate;
pub mod normalize;
pub mod reassemble;
pub mod scan;

use log::debug;

use crate::config::TrackerConfig;
use crate::models::DailySeries;

/// Locate -> scan -> decode -> normalize for one anchor. Occurrences are
/// tried in buffer order; the first one whose candidate span decodes into a
/// plausible record array wins and later occurrences are not tried.
pub fn series_for_anchor(buf: &str, anchor: &str, cfg: &TrackerConfig) -> Option<DailySeries> {
    for occ in locate::occurrences(buf, anchor) {
        let start = match locate::candidate_in_window(
            buf,
            occ,
            occ + anchor.len(),
            cfg.window_before,
            cfg.window_after,
        ) {
            Some(start) => start,
            None => continue,
        };
        let end = match scan::balanced_span(buf, start) {
            Some(end) => end,
            None => {
                debug!("{}: candidate at {} never closes", anchor, start);
                continue;
            }
        };
        let records = match decode::decode_records(&buf[start..end], cfg.min_records) {
            Some(records) => records,
            None => {
                debug!("{}: candidate at {}..{} rejected", anchor, start, end);
                continue;
            }
        };
        let series = normalize::normalize_daily(&records);
        if !series.is_empty() {
            return Some(series);
        }
    }
    None
}
