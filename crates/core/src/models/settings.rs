use serde::{Deserialize, Serialize};

use super::rate::FALLBACK_USD_TRY;

pub const DEFAULT_PRICE_FEED_URL: &str = "http://192.168.8.8:5000/api/sorgu/emtia/XAUUSD";
pub const DEFAULT_FX_URL: &str = "https://doviz.dev/v1/usd.json";

/// Endpoint and network settings for the two data collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Full URL of the gold price feed (returns `{ success, data }`)
    pub price_feed_url: String,

    /// Full URL of the FX endpoint (returns `{ USDTRY }`)
    pub fx_url: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Rate substituted when the FX endpoint fails
    pub fallback_rate: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            price_feed_url: DEFAULT_PRICE_FEED_URL.to_string(),
            fx_url: DEFAULT_FX_URL.to_string(),
            request_timeout_secs: 30,
            fallback_rate: FALLBACK_USD_TRY,
        }
    }
}
