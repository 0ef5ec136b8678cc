use serde::{Deserialize, Serialize};

use super::rate::ExchangeRate;

/// Direction of the last price move as reported by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Up,
    Down,
}

impl ChangeDirection {
    /// The feed sends free-form strings; anything other than "up" is a down move.
    pub fn from_feed(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("up") {
            ChangeDirection::Up
        } else {
            ChangeDirection::Down
        }
    }
}

/// Named price extrema shipped with every quote.
///
/// Every field is optional: the feed omits the ones it has no data for.
/// Keys on the wire are the Turkish labels used by the price feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteStatistics {
    #[serde(rename = "Önceki Kapanış", default)]
    pub previous_close: Option<f64>,

    #[serde(rename = "En Düşük", default)]
    pub daily_low: Option<f64>,

    #[serde(rename = "En Yüksek", default)]
    pub daily_high: Option<f64>,

    #[serde(rename = "Haftalık En Düşük", default)]
    pub weekly_low: Option<f64>,

    #[serde(rename = "Haftalık En Yüksek", default)]
    pub weekly_high: Option<f64>,

    #[serde(rename = "Aylık En Düşük", default)]
    pub monthly_low: Option<f64>,

    #[serde(rename = "Aylık En Yüksek", default)]
    pub monthly_high: Option<f64>,

    #[serde(rename = "Yıllık En Düşük", default)]
    pub yearly_low: Option<f64>,

    #[serde(rename = "Yıllık En Yüksek", default)]
    pub yearly_high: Option<f64>,
}

impl QuoteStatistics {
    /// Same extrema expressed in local currency.
    pub fn to_local(&self, rate: &ExchangeRate) -> QuoteStatistics {
        let conv = |v: Option<f64>| v.map(|p| rate.to_local(p));
        QuoteStatistics {
            previous_close: conv(self.previous_close),
            daily_low: conv(self.daily_low),
            daily_high: conv(self.daily_high),
            weekly_low: conv(self.weekly_low),
            weekly_high: conv(self.weekly_high),
            monthly_low: conv(self.monthly_low),
            monthly_high: conv(self.monthly_high),
            yearly_low: conv(self.yearly_low),
            yearly_high: conv(self.yearly_high),
        }
    }

    /// Labelled (low, high) pairs in display order: daily, weekly, monthly, yearly.
    pub fn ranges(&self) -> Vec<(&'static str, Option<f64>, Option<f64>)> {
        vec![
            ("Daily", self.daily_low, self.daily_high),
            ("Weekly", self.weekly_low, self.weekly_high),
            ("Monthly", self.monthly_low, self.monthly_high),
            ("Yearly", self.yearly_low, self.yearly_high),
        ]
    }
}

/// A spot gold quote as delivered by the price feed.
///
/// Prices are in quote currency (USD) per troy ounce. A quote is never
/// patched in place: every refresh replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Buying price in quote currency
    #[serde(rename = "buying_price_numeric")]
    pub buying_price: f64,

    /// Percent change since previous close
    #[serde(rename = "percent_change_numeric", default)]
    pub percent_change: f64,

    #[serde(deserialize_with = "direction_from_feed", default = "default_direction")]
    pub change_direction: ChangeDirection,

    /// Quote currency code (e.g., "USD")
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(rename = "statistics_numeric", default)]
    pub statistics: QuoteStatistics,

    /// Feed timestamp, kept verbatim
    #[serde(default)]
    pub timestamp: String,
}

impl PriceQuote {
    /// Current buying price in local currency.
    pub fn buying_price_local(&self, rate: &ExchangeRate) -> f64 {
        rate.to_local(self.buying_price)
    }
}

fn direction_from_feed<'de, D>(deserializer: D) -> Result<ChangeDirection, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map_or(ChangeDirection::Down, |r| ChangeDirection::from_feed(&r)))
}

fn default_direction() -> ChangeDirection {
    ChangeDirection::Down
}

fn default_currency() -> String {
    "USD".to_string()
}
