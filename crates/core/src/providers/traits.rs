use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::quote::PriceQuote;
use crate::models::rate::ExchangeRate;

/// Source of spot gold quotes.
///
/// The HTTP price feed implements this; tests plug in mocks. Swapping the
/// feed only touches the implementation, never the valuation code.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the latest quote. Any failure is an error; there is no fallback.
    async fn get_quote(&self) -> Result<PriceQuote, CoreError>;
}

/// Source of the quote-to-local exchange rate.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RateProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the latest rate. Callers absorb failures with a fallback.
    async fn get_rate(&self) -> Result<ExchangeRate, CoreError>;
}
