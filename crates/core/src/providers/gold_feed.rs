use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::quote::PriceQuote;
use super::traits::QuoteProvider;

const PROVIDER: &str = "gold feed";

/// HTTP price feed for spot gold (XAU/USD).
///
/// - **Endpoint**: configured, e.g. `http://host:5000/api/sorgu/emtia/XAUUSD`.
/// - **Response**: `{ "success": bool, "data": { "buying_price_numeric": ..., ... } }`.
/// - **Failure**: non-2xx, `success = false`, missing `data` or an
///   undecodable body are all errors. There is no fallback price.
pub struct GoldFeedProvider {
    client: Client,
    url: String,
}

impl GoldFeedProvider {
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(timeout_secs));
        #[cfg(target_arch = "wasm32")]
        let _ = timeout_secs;
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Decode a feed response body into a quote.
    pub fn parse_response(body: &str) -> Result<PriceQuote, CoreError> {
        let resp: FeedResponse = serde_json::from_str(body).map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse feed response: {e}"),
        })?;

        if !resp.success {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: "feed reported success=false".into(),
            });
        }

        let quote = resp.data.ok_or_else(|| CoreError::Api {
            provider: PROVIDER.into(),
            message: "feed response has no data".into(),
        })?;

        if !quote.buying_price.is_finite() || quote.buying_price <= 0.0 {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("invalid buying price {}", quote.buying_price),
            });
        }

        Ok(quote)
    }
}

// ── Feed response types ─────────────────────────────────────────────

#[derive(Deserialize)]
struct FeedResponse {
    #[serde(default)]
    success: bool,
    data: Option<PriceQuote>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl QuoteProvider for GoldFeedProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn get_quote(&self) -> Result<PriceQuote, CoreError> {
        log::debug!("GET {}", self.url);

        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("HTTP {status}"),
            });
        }

        let body = resp.text().await?;
        Self::parse_response(&body)
    }
}
