use clap::Parser;

use gold_position_core::models::settings::{Settings, DEFAULT_FX_URL, DEFAULT_PRICE_FEED_URL};
use gold_position_core::models::rate::FALLBACK_USD_TRY;

#[derive(Parser, Debug)]
#[command(name = "gold-position")]
#[command(about = "Simulated XAU/USD position valued in Turkish lira")]
pub struct Cli {
    /// Raw launch query, e.g. "amount=5000&entryPrice=3450&theme=light".
    /// Individual flags below are appended to it.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Investment amount in TRY (needs --entry-price)
    #[arg(long)]
    pub amount: Option<String>,

    /// Entry price in USD per ounce (needs --amount)
    #[arg(long)]
    pub entry_price: Option<String>,

    /// Target price in USD per ounce [default: 3600]
    #[arg(long)]
    pub target_price: Option<String>,

    /// Stop-loss price in USD per ounce [default: 3400]
    #[arg(long)]
    pub stop_loss: Option<String>,

    /// dark or light [default: dark]
    #[arg(long)]
    pub theme: Option<String>,

    /// Panel to show: position or summary
    #[arg(long, default_value = "position")]
    pub tab: String,

    /// Write the simulated performance chart to this SVG file
    #[arg(long)]
    pub svg: Option<std::path::PathBuf>,

    /// Print the final figures without the counter animation
    #[arg(long)]
    pub no_animate: bool,

    /// Gold price feed URL
    #[arg(long, env = "GOLD_FEED_URL", default_value = DEFAULT_PRICE_FEED_URL)]
    pub feed_url: String,

    /// USD/TRY endpoint URL
    #[arg(long, env = "GOLD_FX_URL", default_value = DEFAULT_FX_URL)]
    pub fx_url: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
}

impl Cli {
    /// Merge `--query` with the individual flags into one launch query.
    /// Flags come last so they win over the same key in `--query`.
    pub fn launch_query(&self) -> anyhow::Result<String> {
        let flags: Vec<(&str, &str)> = [
            ("amount", self.amount.as_deref()),
            ("entryPrice", self.entry_price.as_deref()),
            ("targetPrice", self.target_price.as_deref()),
            ("stopLoss", self.stop_loss.as_deref()),
            ("theme", self.theme.as_deref()),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect();

        let mut pairs: Vec<(String, String)> = match &self.query {
            Some(q) => serde_urlencoded::from_str(q.trim().trim_start_matches('?'))?,
            None => Vec::new(),
        };
        pairs.retain(|(k, _)| !flags.iter().any(|(fk, _)| fk == k));
        pairs.extend(flags.into_iter().map(|(k, v)| (k.to_string(), v.to_string())));

        Ok(serde_urlencoded::to_string(&pairs)?)
    }

    pub fn settings(&self) -> Settings {
        Settings {
            price_feed_url: self.feed_url.clone(),
            fx_url: self.fx_url.clone(),
            request_timeout_secs: self.timeout,
            fallback_rate: FALLBACK_USD_TRY,
        }
    }
}
