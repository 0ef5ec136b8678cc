use crate::errors::CoreError;
use crate::models::quote::PriceQuote;
use crate::providers::traits::QuoteProvider;

/// Fetches the gold quote. Unlike the rate, there is no fallback: any
/// provider failure becomes `CoreError::DataUnavailable` carrying the
/// underlying message.
pub struct QuoteService;

impl QuoteService {
    pub fn new() -> Self {
        Self
    }

    pub async fn fetch(&self, provider: &dyn QuoteProvider) -> Result<PriceQuote, CoreError> {
        provider.get_quote().await.map_err(|e| {
            log::error!("{} failed: {e}", provider.name());
            if matches!(e, CoreError::DataUnavailable(_)) {
                e
            } else {
                CoreError::DataUnavailable(e.to_string())
            }
        })
    }
}

impl Default for QuoteService {
    fn default() -> Self {
        Self::new()
    }
}
