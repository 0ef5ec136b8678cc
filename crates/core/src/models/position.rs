use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

pub const DEFAULT_INVESTMENT_AMOUNT: f64 = 1000.0;
pub const DEFAULT_ENTRY_PRICE: f64 = 3500.0;
pub const DEFAULT_TARGET_PRICE: f64 = 3600.0;
pub const DEFAULT_STOP_LOSS: f64 = 3400.0;

/// The hypothetical spot position the screen values.
///
/// The investment is in local currency (TRY); every price is in quote
/// currency (USD) per ounce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionParameters {
    pub investment_amount_local: f64,
    pub entry_price_quote: f64,
    pub target_price_quote: f64,
    pub stop_loss_quote: f64,
}

impl Default for PositionParameters {
    fn default() -> Self {
        Self {
            investment_amount_local: DEFAULT_INVESTMENT_AMOUNT,
            entry_price_quote: DEFAULT_ENTRY_PRICE,
            target_price_quote: DEFAULT_TARGET_PRICE,
            stop_loss_quote: DEFAULT_STOP_LOSS,
        }
    }
}

impl PositionParameters {
    /// Build a validated position.
    pub fn new(
        investment_amount_local: f64,
        entry_price_quote: f64,
        target_price_quote: f64,
        stop_loss_quote: f64,
    ) -> Result<Self, CoreError> {
        let params = Self {
            investment_amount_local,
            entry_price_quote,
            target_price_quote,
            stop_loss_quote,
        };
        params.validate()?;
        Ok(params)
    }

    /// Amount and entry price must be finite and strictly positive.
    /// Target and stop only need to be finite numbers.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !is_positive(self.investment_amount_local) {
            return Err(CoreError::Configuration(format!(
                "investment amount must be a positive number, got {}",
                self.investment_amount_local
            )));
        }
        if !is_positive(self.entry_price_quote) {
            return Err(CoreError::Configuration(format!(
                "entry price must be a positive number, got {}",
                self.entry_price_quote
            )));
        }
        if !self.target_price_quote.is_finite() {
            return Err(CoreError::Configuration(format!(
                "target price must be a number, got {}",
                self.target_price_quote
            )));
        }
        if !self.stop_loss_quote.is_finite() {
            return Err(CoreError::Configuration(format!(
                "stop loss must be a number, got {}",
                self.stop_loss_quote
            )));
        }
        Ok(())
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Colour scheme requested by the launcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

impl FromStr for Theme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(CoreError::Configuration(format!(
                "unknown theme '{other}': expected 'dark' or 'light'"
            ))),
        }
    }
}

/// Everything read once at startup from the query-string-like launch input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaunchParams {
    pub position: PositionParameters,
    pub theme: Theme,
}

impl LaunchParams {
    /// Parse `amount`, `entryPrice`, `targetPrice`, `stopLoss` and `theme`
    /// from a query string such as `?amount=5000&entryPrice=3450`.
    ///
    /// The position is only overridden when both `amount` and `entryPrice`
    /// are present; otherwise the default position is used. Empty values
    /// count as absent. An unrecognised `theme` falls back to dark.
    pub fn from_query(query: &str) -> Result<Self, CoreError> {
        let query = query.trim().trim_start_matches('?');
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
            .map_err(|e| CoreError::Configuration(format!("malformed launch query: {e}")))?;

        let get = |key: &str| -> Option<&str> {
            pairs
                .iter()
                .find(|(k, v)| k == key && !v.trim().is_empty())
                .map(|(_, v)| v.as_str())
        };

        let theme = match get("theme") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                log::warn!("{e}; using {}", Theme::default());
                Theme::default()
            }),
            None => Theme::default(),
        };

        let position = match (get("amount"), get("entryPrice")) {
            (Some(amount), Some(entry)) => {
                let target = get("targetPrice")
                    .map(|v| parse_number("targetPrice", v))
                    .transpose()?
                    .unwrap_or(DEFAULT_TARGET_PRICE);
                let stop = get("stopLoss")
                    .map(|v| parse_number("stopLoss", v))
                    .transpose()?
                    .unwrap_or(DEFAULT_STOP_LOSS);
                PositionParameters::new(
                    parse_number("amount", amount)?,
                    parse_number("entryPrice", entry)?,
                    target,
                    stop,
                )?
            }
            _ => PositionParameters::default(),
        };

        Ok(Self { position, theme })
    }
}

fn parse_number(key: &str, raw: &str) -> Result<f64, CoreError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CoreError::Configuration(format!("{key} is not a number: '{raw}'")))
}
