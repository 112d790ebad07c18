use serde::{Deserialize, Serialize};

/// Default market-watch endpoint.
pub const MARKET_WATCH_URL: &str = "https://old.tsetmc.com/tsev2/data/MarketWatchPlus.aspx";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub refresh: RefreshConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    pub interval_secs: u64,
    /// IANA timezone used for "today" in DTE and for snapshot timestamps.
    pub timezone: String,
}

impl RefreshConfig {
    /// Parses the configured timezone.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a known IANA timezone.
    pub fn tz(&self) -> anyhow::Result<chrono_tz::Tz> {
        self.timezone
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid timezone '{}': {e}", self.timezone))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feed: FeedConfig {
                url: MARKET_WATCH_URL.to_string(),
                timeout_secs: 10,
            },
            refresh: RefreshConfig {
                interval_secs: 60,
                timezone: "Asia/Tehran".to_string(),
            },
        }
    }
}
