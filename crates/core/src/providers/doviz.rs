use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::rate::ExchangeRate;
use super::traits::RateProvider;

const PROVIDER: &str = "doviz.dev";

/// doviz.dev provider for the USD/TRY exchange rate.
///
/// - **Free**: no API key.
/// - **Endpoint**: `https://doviz.dev/v1/usd.json` returning `{ "USDTRY": 41.2, ... }`.
///
/// Failures are returned as errors; the rate service decides on the fallback.
pub struct DovizProvider {
    client: Client,
    url: String,
}

impl DovizProvider {
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

    /// Decode a response body into a rate.
    pub fn parse_response(body: &str) -> Result<ExchangeRate, CoreError> {
        let resp: UsdRatesResponse = serde_json::from_str(body).map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse USD rates: {e}"),
        })?;

        let rate = ExchangeRate::new(resp.usd_try);
        if !rate.is_usable() {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("unusable USDTRY rate {}", resp.usd_try),
            });
        }
        Ok(rate)
    }
}

// ── doviz.dev response types ────────────────────────────────────────

#[derive(Deserialize)]
struct UsdRatesResponse {
    #[serde(rename = "USDTRY")]
    usd_try: f64,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RateProvider for DovizProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn get_rate(&self) -> Result<ExchangeRate, CoreError> {
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
