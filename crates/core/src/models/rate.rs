use serde::{Deserialize, Serialize};

/// USD/TRY used when the FX provider cannot be reached.
pub const FALLBACK_USD_TRY: f64 = 34.0;

/// Units of local currency per unit of quote currency (e.g., TRY per USD).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub quote_to_local: f64,
}

impl ExchangeRate {
    pub fn new(quote_to_local: f64) -> Self {
        Self { quote_to_local }
    }

    /// The fixed fallback rate substituted on FX failure.
    pub fn fallback() -> Self {
        Self::new(FALLBACK_USD_TRY)
    }

    /// A rate is usable only if it is finite and strictly positive.
    pub fn is_usable(&self) -> bool {
        self.quote_to_local.is_finite() && self.quote_to_local > 0.0
    }

    /// Convert an amount in quote currency to local currency.
    pub fn to_local(&self, amount_quote: f64) -> f64 {
        amount_quote * self.quote_to_local
    }
}
