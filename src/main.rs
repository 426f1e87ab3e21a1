use std::env;
use std::path::PathBuf;

use dotenv::dotenv;
use log::{info, warn};

use rsebl_tracker::config::TrackerConfig;
use rsebl_tracker::session::HttpSession;
use rsebl_tracker::{output, run, BoxError};

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenv().ok();
    // Initialize the logger
    env_logger::init();
    info!("Logger initialized. Starting the tracker...");

    // Optional overrides live in the environment; the library only ever
    // sees the explicit config value
    let mut cfg = TrackerConfig::default();
    if let Ok(base) = env::var("RSEBL_BASE_URL") {
        info!("Using base URL override: {}", base);
        cfg.base_url = base;
    }
    let data_dir = env::var("RSEBL_DATA_DIR").unwrap_or_else(|_| {
        warn!("$RSEBL_DATA_DIR not set, defaulting to data");
        "data".to_string()
    });

    // Failing to establish the session at all is the one fatal path
    let mut session = HttpSession::new()?;

    let result = run::run_once(&mut session, &cfg).await;
    output::write_artifacts(&PathBuf::from(&data_dir), &result)?;

    info!(
        "Done. {} securities, {} history series, {} news items",
        result.stocks.len(),
        result.history.len(),
        result.news.len()
    );
    Ok(())
}
