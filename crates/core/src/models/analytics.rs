use serde::{Deserialize, Serialize};

/// Valuation of the position at the latest quote and exchange rate.
///
/// Always derived from (quote, rate, params) and never mutated in place.
/// All monetary fields are in local currency; `asset_amount` is in ounces.
/// `Default` is the all-zero snapshot shown while data is loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Amount originally invested
    pub investment_local: f64,

    /// Value of the held ounces at the current buying price
    pub current_value_local: f64,

    /// current_value_local - investment_local
    pub profit_loss_local: f64,

    /// profit_loss_local / investment_local * 100 (0 when nothing invested)
    pub profit_loss_percent: f64,

    /// Ounces bought at the entry price
    pub asset_amount: f64,

    /// Projected gain if the price reaches the target. May be negative.
    pub target_profit_local: f64,

    /// Projected loss if the price falls to the stop. May be negative.
    pub potential_loss_local: f64,
}

impl PortfolioSnapshot {
    pub fn is_profit(&self) -> bool {
        self.profit_loss_local >= 0.0
    }

    /// Target profit as shown on screen: a target below entry shows as 0.
    pub fn displayed_target_profit(&self) -> f64 {
        self.target_profit_local.max(0.0)
    }

    /// Potential loss as shown on screen: a stop above entry shows as 0.
    pub fn displayed_potential_loss(&self) -> f64 {
        self.potential_loss_local.max(0.0)
    }

    /// False when any field is NaN or infinite (zero entry price in local
    /// currency). Such a snapshot must not be rendered as numbers.
    pub fn is_valid(&self) -> bool {
        [
            self.investment_local,
            self.current_value_local,
            self.profit_loss_local,
            self.profit_loss_percent,
            self.asset_amount,
            self.target_profit_local,
            self.potential_loss_local,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// How far the current price has travelled from entry towards the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetProgress {
    /// target - current buying price, in quote currency
    pub distance_quote: f64,

    /// The same distance in local currency
    pub distance_local: f64,

    /// Clamped to [0, 100]
    pub progress_percent: f64,
}
