use crate::models::analytics::{PortfolioSnapshot, TargetProgress};
use crate::models::position::PositionParameters;
use crate::models::quote::PriceQuote;
use crate::models::rate::ExchangeRate;

/// Values the hypothetical gold position.
///
/// Everything here is a pure function of (quote, rate, params): no I/O,
/// no state, identical inputs give bit-identical outputs.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Compute the portfolio snapshot.
    ///
    /// While either the quote or the rate is missing (still loading) the
    /// all-zero snapshot is returned.
    ///
    /// 1. Convert the entry price to local currency and derive the ounces bought
    /// 2. Value those ounces at the current buying price
    /// 3. Project the outcome at the target and at the stop
    pub fn compute_snapshot(
        &self,
        quote: Option<&PriceQuote>,
        rate: Option<&ExchangeRate>,
        params: &PositionParameters,
    ) -> PortfolioSnapshot {
        let (quote, rate) = match (quote, rate) {
            (Some(q), Some(r)) => (q, r),
            _ => return PortfolioSnapshot::default(),
        };

        let entry_price_local = rate.to_local(params.entry_price_quote);
        let asset_amount = params.investment_amount_local / entry_price_local;

        let investment_local = params.investment_amount_local;
        let current_value_local = asset_amount * quote.buying_price_local(rate);
        let profit_loss_local = current_value_local - investment_local;
        let profit_loss_percent = if investment_local > 0.0 {
            profit_loss_local / investment_local * 100.0
        } else {
            0.0
        };

        let target_profit_local =
            asset_amount * rate.to_local(params.target_price_quote) - investment_local;
        let potential_loss_local =
            investment_local - asset_amount * rate.to_local(params.stop_loss_quote);

        PortfolioSnapshot {
            investment_local,
            current_value_local,
            profit_loss_local,
            profit_loss_percent,
            asset_amount,
            target_profit_local,
            potential_loss_local,
        }
    }

    /// Progress of the current price from entry towards the target.
    /// `None` while the quote or rate is missing.
    pub fn target_progress(
        &self,
        quote: Option<&PriceQuote>,
        rate: Option<&ExchangeRate>,
        params: &PositionParameters,
    ) -> Option<TargetProgress> {
        let (quote, rate) = (quote?, rate?);

        let distance_quote = params.target_price_quote - quote.buying_price;
        let span = params.target_price_quote - params.entry_price_quote;
        let progress_percent = if span == 0.0 {
            0.0
        } else {
            let raw = (quote.buying_price - params.entry_price_quote) / span * 100.0;
            if raw.is_finite() {
                raw.clamp(0.0, 100.0)
            } else {
                0.0
            }
        };

        Some(TargetProgress {
            distance_quote,
            distance_local: rate.to_local(distance_quote),
            progress_percent,
        })
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}
