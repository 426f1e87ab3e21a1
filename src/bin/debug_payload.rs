use log::{info, warn};

use rsebl_tracker::config::TrackerConfig;
use rsebl_tracker::extract::{decode, locate, reassemble, scan};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cfg = TrackerConfig::default();
    let url = std::env::args().nth(1).unwrap_or_else(|| cfg.base_url.clone());
    info!("Inspecting embedded payload structure at {}", url);

    let client = reqwest::Client::builder()
        .user_agent("Mozilla/5.0 (compatible; RSEBLTracker/1.0)")
        .build()?;
    let source = client.get(&url).send().await?.text().await?;
    info!("Fetched {} bytes of page source", source.len());

    let chunks = reassemble::harvest_chunks(&source);
    let buffer = reassemble::reassemble(&chunks);
    info!(
        "{} payload chunks, {} bytes after reassembly",
        chunks.len(),
        buffer.len()
    );
    let buffer = if buffer.is_empty() {
        warn!("No chunked payload found, scanning the raw source instead");
        source
    } else {
        buffer
    };

    for (symbol, name) in &cfg.known_symbols {
        let occs = locate::occurrences(&buffer, symbol);
        if occs.is_empty() {
            continue;
        }
        let candidate = occs.iter().find_map(|occ| {
            locate::candidate_in_window(
                &buffer,
                *occ,
                occ + symbol.len(),
                cfg.window_before,
                cfg.window_after,
            )
        });
        match candidate {
            Some(start) => match scan::balanced_span(&buffer, start) {
                Some(end) => {
                    let records = decode::decode_records(&buffer[start..end], cfg.min_records)
                        .map(|r| r.len())
                        .unwrap_or(0);
                    info!(
                        "{} ({}): {} occurrences, span of {} bytes, {} records",
                        symbol,
                        name,
                        occs.len(),
                        end - start,
                        records
                    );
                }
                None => info!(
                    "{} ({}): candidate at {} never closes",
                    symbol, name, start
                ),
            },
            None => info!(
                "{} ({}): {} occurrences, no array start in window",
                symbol,
                name,
                occs.len()
            ),
        }
    }

    Ok(())
}
