use crate::models::rate::ExchangeRate;
use crate::providers::traits::RateProvider;

/// Resolves the quote-to-local exchange rate.
///
/// FX failures are never fatal: any error, or a rate that is zero, negative
/// or not finite, is replaced by the fallback rate so valuation always has a
/// usable multiplier.
pub struct RateService {
    fallback: ExchangeRate,
}

impl RateService {
    pub fn new(fallback_rate: f64) -> Self {
        let fallback = ExchangeRate::new(fallback_rate);
        let fallback = if fallback.is_usable() {
            fallback
        } else {
            ExchangeRate::fallback()
        };
        Self { fallback }
    }

    pub fn fallback(&self) -> ExchangeRate {
        self.fallback
    }

    /// Fetch the rate, substituting the fallback on any failure.
    pub async fn resolve(&self, provider: &dyn RateProvider) -> ExchangeRate {
        match provider.get_rate().await {
            Ok(rate) if rate.is_usable() => {
                log::debug!("{}: USD/TRY = {}", provider.name(), rate.quote_to_local);
                rate
            }
            Ok(rate) => {
                log::warn!(
                    "{} returned unusable rate {}; using fallback {}",
                    provider.name(),
                    rate.quote_to_local,
                    self.fallback.quote_to_local
                );
                self.fallback
            }
            Err(e) => {
                log::warn!(
                    "{} failed ({e}); using fallback rate {}",
                    provider.name(),
                    self.fallback.quote_to_local
                );
                self.fallback
            }
        }
    }
}

impl Default for RateService {
    fn default() -> Self {
        Self::new(crate::models::rate::FALLBACK_USD_TRY)
    }
}
