// src/config.rs

/// Explicit configuration for one tracker run. The library never reads the
/// environment; binaries build one of these and pass it down.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub base_url: String,
    /// Ordered symbol -> company name table. This is the anchor set: no
    /// identifier outside it is ever treated as a known symbol, and anchors
    /// are searched in exactly this order.
    pub known_symbols: Vec<(String, String)>,
    /// Locator window opened before an anchor occurrence, in chars.
    pub window_before: usize,
    /// Locator window opened after an anchor occurrence, in chars.
    pub window_after: usize,
    /// Minimum plausible length for a decoded record array.
    pub min_records: usize,
    /// Identifiers no longer than this may pass the live-render filter even
    /// when they are not in the known table.
    pub max_symbol_len: usize,
    pub news_min_count: usize,
    pub news_limit: usize,
    /// Pagination budget for the screener table.
    pub max_pages: usize,
    pub nav_timeout_ms: u64,
    pub table_timeout_ms: u64,
    pub paginate_timeout_ms: u64,
    pub body_timeout_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            base_url: "https://rsebl.org.bt".to_string(),
            known_symbols: default_symbols(),
            window_before: 5_000,
            window_after: 30_000,
            min_records: 20,
            max_symbol_len: 8,
            news_min_count: 1,
            news_limit: 30,
            max_pages: 25,
            nav_timeout_ms: 30_000,
            table_timeout_ms: 15_000,
            paginate_timeout_ms: 8_000,
            body_timeout_ms: 10_000,
        }
    }
}

/// Securities listed on the Royal Securities Exchange of Bhutan.
fn default_symbols() -> Vec<(String, String)> {
    [
        ("BBPL", "Bhutan Board Products Ltd"),
        ("BCCL", "Bhutan Carbide and Chemicals Ltd"),
        ("BFAL", "Bhutan Ferro Alloys Ltd"),
        ("BIL", "Bhutan Insurance Ltd"),
        ("BNBL", "Bhutan National Bank Ltd"),
        ("BPCL", "Bhutan Polymers Company Ltd"),
        ("BTCL", "Bhutan Tourism Corporation Ltd"),
        ("DFAL", "Druk Ferro Alloys Ltd"),
        ("DPNB", "Druk PNB Bank Ltd"),
        ("DWAL", "Druk Wang Alloys Ltd"),
        ("GICB", "GIC-Bhutan Re Ltd"),
        ("KCL", "Kuensel Corporation Ltd"),
        ("PCAL", "Penden Cement Authority Ltd"),
        ("RICB", "Royal Insurance Corporation of Bhutan Ltd"),
        ("STCB", "State Trading Corporation of Bhutan Ltd"),
        ("SVL", "Sherza Ventures Ltd"),
        ("TBL", "T Bank Ltd"),
    ]
    .iter()
    .map(|(s, n)| (s.to_string(), n.to_string()))
    .collect()
}
