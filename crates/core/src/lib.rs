pub mod animation;
pub mod errors;
pub mod format;
pub mod models;
pub mod providers;
pub mod services;
pub mod transaction;

use std::fmt;
use std::str::FromStr;

use animation::{CounterAnimation, CounterFrame, CounterHandle};
use models::{
    analytics::{PortfolioSnapshot, TargetProgress},
    chart::PerformanceSeries,
    position::{LaunchParams, PositionParameters, Theme},
    quote::PriceQuote,
    rate::ExchangeRate,
    settings::Settings,
};
use providers::{
    doviz::DovizProvider,
    gold_feed::GoldFeedProvider,
    traits::{QuoteProvider, RateProvider},
};
use services::{
    quote_service::QuoteService,
    rate_service::RateService,
    series_service::{NoiseSource, SeriesService},
    valuation_service::ValuationService,
};
use tokio::sync::watch;

use errors::CoreError;

/// Where the screen is in its single load cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    /// Constructed, nothing fetched yet
    Idle,
    Loading,
    /// The price feed failed; carries the message shown full-screen
    Failed(String),
    Ready,
}

/// The two panels of the screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Position,
    Summary,
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::Position => write!(f, "position"),
            Tab::Summary => write!(f, "summary"),
        }
    }
}

impl FromStr for Tab {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "position" => Ok(Tab::Position),
            "summary" => Ok(Tab::Summary),
            other => Err(CoreError::Configuration(format!(
                "unknown tab '{other}': expected 'position' or 'summary'"
            ))),
        }
    }
}

/// Main entry point for the gold position screen.
/// Owns the screen state and the services that operate on it.
///
/// The screen is always in exactly one of: loading, failed, or ready.
/// There is no partially rendered state.
#[must_use]
pub struct GoldPositionTracker {
    launch: LaunchParams,
    quote: Option<PriceQuote>,
    rate: Option<ExchangeRate>,
    transaction_id: Option<String>,
    active_tab: Tab,
    phase: LoadPhase,
    quote_provider: Box<dyn QuoteProvider>,
    rate_provider: Box<dyn RateProvider>,
    quote_service: QuoteService,
    rate_service: RateService,
    valuation_service: ValuationService,
    series_service: SeriesService,
    counter: Option<CounterHandle>,
}

impl fmt::Debug for GoldPositionTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoldPositionTracker")
            .field("launch", &self.launch)
            .field("quote_provider", &self.quote_provider.name())
            .field("rate_provider", &self.rate_provider.name())
            .field("has_quote", &self.quote.is_some())
            .field("rate", &self.rate)
            .field("phase", &self.phase)
            .field("active_tab", &self.active_tab)
            .finish()
    }
}

impl GoldPositionTracker {
    /// Create a tracker talking to the HTTP collaborators named in `settings`.
    pub fn new(launch: LaunchParams, settings: &Settings) -> Self {
        let quote_provider =
            GoldFeedProvider::new(&settings.price_feed_url, settings.request_timeout_secs);
        let rate_provider = DovizProvider::new(&settings.fx_url, settings.request_timeout_secs);
        Self::with_providers(
            launch,
            Box::new(quote_provider),
            Box::new(rate_provider),
            settings.fallback_rate,
        )
    }

    /// Parse the launch query and build a tracker. A bad query is a
    /// `CoreError::Configuration` and nothing is fetched.
    pub fn from_query(query: &str, settings: &Settings) -> Result<Self, CoreError> {
        let launch = parse_launch(query)?;
        Ok(Self::new(launch, settings))
    }

    /// Like [`Self::from_query`] but with explicit providers.
    pub fn from_query_with_providers(
        query: &str,
        quote_provider: Box<dyn QuoteProvider>,
        rate_provider: Box<dyn RateProvider>,
        fallback_rate: f64,
    ) -> Result<Self, CoreError> {
        let launch = parse_launch(query)?;
        Ok(Self::with_providers(
            launch,
            quote_provider,
            rate_provider,
            fallback_rate,
        ))
    }

    /// Create a tracker with explicit providers (tests, alternative feeds).
    pub fn with_providers(
        launch: LaunchParams,
        quote_provider: Box<dyn QuoteProvider>,
        rate_provider: Box<dyn RateProvider>,
        fallback_rate: f64,
    ) -> Self {
        Self {
            launch,
            quote: None,
            rate: None,
            transaction_id: None,
            active_tab: Tab::default(),
            phase: LoadPhase::Idle,
            quote_provider,
            rate_provider,
            quote_service: QuoteService::new(),
            rate_service: RateService::new(fallback_rate),
            valuation_service: ValuationService::new(),
            series_service: SeriesService::new(),
            counter: None,
        }
    }

    // ── Loading ─────────────────────────────────────────────────────

    /// Run the one-time load: FX rate first, then the gold quote.
    ///
    /// The FX step never fails (fallback rate). A failed quote moves the
    /// screen to `LoadPhase::Failed` and returns `CoreError::DataUnavailable`.
    pub async fn load(&mut self) -> Result<(), CoreError> {
        self.phase = LoadPhase::Loading;

        let rate = self.rate_service.resolve(self.rate_provider.as_ref()).await;
        self.set_rate(rate);

        match self.quote_service.fetch(self.quote_provider.as_ref()).await {
            Ok(quote) => {
                log::info!(
                    "Loaded gold quote {} {} at USD/TRY {}",
                    quote.buying_price,
                    quote.currency,
                    rate.quote_to_local
                );
                self.set_quote(quote);
                self.transaction_id = Some(transaction::new_transaction_id());
                self.phase = LoadPhase::Ready;
                Ok(())
            }
            Err(e) => {
                self.phase = LoadPhase::Failed(e.to_string());
                self.stop_counter();
                Err(e)
            }
        }
    }

    /// Replace the quote wholesale. A running counter restarts.
    pub fn set_quote(&mut self, quote: PriceQuote) {
        self.quote = Some(quote);
        self.restart_counter_if_running();
    }

    /// Replace the rate wholesale. A running counter restarts.
    pub fn set_rate(&mut self, rate: ExchangeRate) {
        self.rate = Some(rate);
        self.restart_counter_if_running();
    }

    // ── Valuation ───────────────────────────────────────────────────

    /// Current snapshot; all zeros until both quote and rate are known.
    #[must_use]
    pub fn snapshot(&self) -> PortfolioSnapshot {
        self.valuation_service.compute_snapshot(
            self.quote.as_ref(),
            self.rate.as_ref(),
            &self.launch.position,
        )
    }

    #[must_use]
    pub fn target_progress(&self) -> Option<TargetProgress> {
        self.valuation_service.target_progress(
            self.quote.as_ref(),
            self.rate.as_ref(),
            &self.launch.position,
        )
    }

    // ── Chart ───────────────────────────────────────────────────────

    /// Simulated performance curve for the current return. Randomized.
    #[must_use]
    pub fn performance_series(&self) -> PerformanceSeries {
        self.series_service
            .build_random_series(self.snapshot().profit_loss_percent)
    }

    /// Simulated performance curve with a caller-supplied noise source.
    #[must_use]
    pub fn performance_series_with(&self, noise: &mut dyn NoiseSource) -> PerformanceSeries {
        self.series_service
            .build_series(self.snapshot().profit_loss_percent, noise)
    }

    // ── Counter ─────────────────────────────────────────────────────

    /// (Re)start the profit/loss counter for the current snapshot.
    /// Any previous counter is aborted. Must be called inside a tokio runtime.
    pub fn start_counter(&mut self) -> watch::Receiver<CounterFrame> {
        let handle = CounterAnimation::new(&self.snapshot()).spawn();
        let rx = handle.subscribe();
        // Replacing the handle drops (and aborts) the previous one.
        self.counter = Some(handle);
        rx
    }

    pub fn counter_mut(&mut self) -> Option<&mut CounterHandle> {
        self.counter.as_mut()
    }

    /// Abort the counter, if any.
    pub fn stop_counter(&mut self) {
        self.counter = None;
    }

    fn restart_counter_if_running(&mut self) {
        if self.counter.is_none() {
            return;
        }
        if tokio::runtime::Handle::try_current().is_ok() {
            self.start_counter();
        } else {
            self.stop_counter();
        }
    }

    // ── Screen state ────────────────────────────────────────────────

    #[must_use]
    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    /// Message for the full-screen error state, if the load failed.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            LoadPhase::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    #[must_use]
    pub fn params(&self) -> &PositionParameters {
        &self.launch.position
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.launch.theme
    }

    #[must_use]
    pub fn quote(&self) -> Option<&PriceQuote> {
        self.quote.as_ref()
    }

    #[must_use]
    pub fn rate(&self) -> Option<ExchangeRate> {
        self.rate
    }

    #[must_use]
    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }

    #[must_use]
    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }
}

fn parse_launch(query: &str) -> Result<LaunchParams, CoreError> {
    LaunchParams::from_query(query).inspect_err(|e| log::error!("{e}"))
}
