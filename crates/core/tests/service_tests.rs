// ═══════════════════════════════════════════════════════════════════
// Service Tests — ValuationService, SeriesService, RateService,
// QuoteService, counter animation
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use gold_position_core::animation::{
    ease_out_quart, CounterAnimation, COUNTER_DURATION, COUNTER_FRAMES,
};
use gold_position_core::errors::CoreError;
use gold_position_core::models::analytics::PortfolioSnapshot;
use gold_position_core::models::position::PositionParameters;
use gold_position_core::models::quote::PriceQuote;
use gold_position_core::models::rate::ExchangeRate;
use gold_position_core::providers::traits::{QuoteProvider, RateProvider};
use gold_position_core::services::quote_service::QuoteService;
use gold_position_core::services::rate_service::RateService;
use gold_position_core::services::series_service::{
    NoNoise, NoiseSource, RandomNoise, SeriesService, SERIES_LEN,
};
use gold_position_core::services::valuation_service::ValuationService;

// ═══════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════

fn quote(buying_price: f64) -> PriceQuote {
    serde_json::from_value(serde_json::json!({
        "buying_price_numeric": buying_price,
        "percent_change_numeric": 0.5,
        "change_direction": "up",
        "currency": "USD",
        "timestamp": "2025-09-12T10:00:00Z"
    }))
    .unwrap()
}

fn params(amount: f64, entry: f64, target: f64, stop: f64) -> PositionParameters {
    PositionParameters {
        investment_amount_local: amount,
        entry_price_quote: entry,
        target_price_quote: target,
        stop_loss_quote: stop,
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Noise that adds a fixed offset per index.
struct ScriptedNoise(Vec<f64>);

impl NoiseSource for ScriptedNoise {
    fn sample(&mut self, index: usize, _trend_up: bool) -> f64 {
        self.0[index]
    }
}

// ═══════════════════════════════════════════════════════════════════
// ValuationService — compute_snapshot
// ═══════════════════════════════════════════════════════════════════

mod valuation {
    use super::*;

    #[test]
    fn missing_quote_gives_zero_snapshot() {
        let svc = ValuationService::new();
        let rate = ExchangeRate::new(34.0);
        let snap = svc.compute_snapshot(None, Some(&rate), &PositionParameters::default());
        assert_eq!(snap, PortfolioSnapshot::default());
    }

    #[test]
    fn missing_rate_gives_zero_snapshot() {
        let svc = ValuationService::new();
        let q = quote(3600.0);
        let snap = svc.compute_snapshot(Some(&q), None, &PositionParameters::default());
        assert_eq!(snap, PortfolioSnapshot::default());
    }

    #[test]
    fn asset_amount_from_local_entry_price() {
        // 1000 TRY at 3500 USD/oz and 34 TRY/USD: entry is 119000 TRY/oz.
        let svc = ValuationService::new();
        let snap = svc.compute_snapshot(
            Some(&quote(3500.0)),
            Some(&ExchangeRate::new(34.0)),
            &params(1000.0, 3500.0, 3600.0, 3400.0),
        );
        assert!(close(snap.asset_amount, 1000.0 / 119_000.0));
        assert!((snap.asset_amount - 0.008403).abs() < 1e-6);
    }

    #[test]
    fn unchanged_price_means_no_profit() {
        let svc = ValuationService::new();
        let snap = svc.compute_snapshot(
            Some(&quote(3500.0)),
            Some(&ExchangeRate::new(34.0)),
            &params(1000.0, 3500.0, 3600.0, 3400.0),
        );
        assert_eq!(snap.investment_local, 1000.0);
        assert!(close(snap.current_value_local, 1000.0));
        assert!(close(snap.profit_loss_local, 0.0));
        assert!(close(snap.profit_loss_percent, 0.0));
    }

    #[test]
    fn price_rise_gives_profit() {
        let svc = ValuationService::new();
        let snap = svc.compute_snapshot(
            Some(&quote(3600.0)),
            Some(&ExchangeRate::new(34.0)),
            &params(1000.0, 3500.0, 3600.0, 3400.0),
        );
        let expected_value = 1000.0 * 3600.0 / 3500.0;
        assert!(close(snap.current_value_local, expected_value));
        assert!(close(snap.profit_loss_local, expected_value - 1000.0));
        assert!(close(snap.profit_loss_percent, (expected_value - 1000.0) / 10.0));
        assert!(snap.is_profit());
    }

    #[test]
    fn price_drop_gives_loss() {
        let svc = ValuationService::new();
        let snap = svc.compute_snapshot(
            Some(&quote(3150.0)),
            Some(&ExchangeRate::new(41.0)),
            &params(2000.0, 3500.0, 3600.0, 3400.0),
        );
        // 10% drop
        assert!(close(snap.profit_loss_local, -200.0));
        assert!(close(snap.profit_loss_percent, -10.0));
        assert!(!snap.is_profit());
    }

    #[test]
    fn rate_cancels_out_of_return() {
        let svc = ValuationService::new();
        let p = params(1000.0, 3500.0, 3600.0, 3400.0);
        let q = quote(3700.0);
        let a = svc.compute_snapshot(Some(&q), Some(&ExchangeRate::new(34.0)), &p);
        let b = svc.compute_snapshot(Some(&q), Some(&ExchangeRate::new(41.0)), &p);
        assert!((a.profit_loss_percent - b.profit_loss_percent).abs() < 1e-9);
    }

    #[test]
    fn target_and_stop_projections() {
        let svc = ValuationService::new();
        let snap = svc.compute_snapshot(
            Some(&quote(3550.0)),
            Some(&ExchangeRate::new(34.0)),
            &params(1000.0, 3500.0, 3600.0, 3400.0),
        );
        assert!(close(snap.target_profit_local, 1000.0 * 3600.0 / 3500.0 - 1000.0));
        assert!(close(snap.potential_loss_local, 1000.0 - 1000.0 * 3400.0 / 3500.0));
    }

    #[test]
    fn degenerate_target_and_stop_go_negative_but_display_as_zero() {
        let svc = ValuationService::new();
        let snap = svc.compute_snapshot(
            Some(&quote(3500.0)),
            Some(&ExchangeRate::new(34.0)),
            &params(1000.0, 3500.0, 3300.0, 3700.0),
        );
        assert!(snap.target_profit_local < 0.0);
        assert!(snap.potential_loss_local < 0.0);
        assert_eq!(snap.displayed_target_profit(), 0.0);
        assert_eq!(snap.displayed_potential_loss(), 0.0);
    }

    #[test]
    fn zero_investment_has_zero_percent() {
        let svc = ValuationService::new();
        let snap = svc.compute_snapshot(
            Some(&quote(3900.0)),
            Some(&ExchangeRate::new(34.0)),
            &params(0.0, 3500.0, 3600.0, 3400.0),
        );
        assert_eq!(snap.investment_local, 0.0);
        assert_eq!(snap.profit_loss_percent, 0.0);
    }

    #[test]
    fn zero_entry_price_is_flagged_invalid() {
        let svc = ValuationService::new();
        let snap = svc.compute_snapshot(
            Some(&quote(3500.0)),
            Some(&ExchangeRate::new(34.0)),
            &params(1000.0, 0.0, 3600.0, 3400.0),
        );
        assert!(snap.asset_amount.is_infinite());
        assert!(!snap.is_valid());
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let svc = ValuationService::new();
        let q = quote(3612.37);
        let r = ExchangeRate::new(41.2734);
        let p = params(12_345.67, 3498.2, 3800.0, 3300.0);
        let a = svc.compute_snapshot(Some(&q), Some(&r), &p);
        let b = svc.compute_snapshot(Some(&q), Some(&r), &p);
        assert_eq!(a.current_value_local.to_bits(), b.current_value_local.to_bits());
        assert_eq!(a.profit_loss_percent.to_bits(), b.profit_loss_percent.to_bits());
        assert_eq!(a, b);
    }
}

// ═══════════════════════════════════════════════════════════════════
// ValuationService — target_progress
// ═══════════════════════════════════════════════════════════════════

mod target_progress {
    use super::*;

    #[test]
    fn halfway_to_target() {
        let svc = ValuationService::new();
        let progress = svc
            .target_progress(
                Some(&quote(3550.0)),
                Some(&ExchangeRate::new(34.0)),
                &params(1000.0, 3500.0, 3600.0, 3400.0),
            )
            .unwrap();
        assert!(close(progress.distance_quote, 50.0));
        assert!(close(progress.distance_local, 1700.0));
        assert!(close(progress.progress_percent, 50.0));
    }

    #[test]
    fn progress_is_clamped() {
        let svc = ValuationService::new();
        let rate = ExchangeRate::new(34.0);
        let p = params(1000.0, 3500.0, 3600.0, 3400.0);
        let below = svc.target_progress(Some(&quote(3400.0)), Some(&rate), &p).unwrap();
        let above = svc.target_progress(Some(&quote(3800.0)), Some(&rate), &p).unwrap();
        assert_eq!(below.progress_percent, 0.0);
        assert_eq!(above.progress_percent, 100.0);
        assert!(above.distance_quote < 0.0);
    }

    #[test]
    fn target_equal_to_entry_is_zero_progress() {
        let svc = ValuationService::new();
        let progress = svc
            .target_progress(
                Some(&quote(3600.0)),
                Some(&ExchangeRate::new(34.0)),
                &params(1000.0, 3500.0, 3500.0, 3400.0),
            )
            .unwrap();
        assert_eq!(progress.progress_percent, 0.0);
    }

    #[test]
    fn none_while_loading() {
        let svc = ValuationService::new();
        assert!(svc
            .target_progress(None, None, &PositionParameters::default())
            .is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
// SeriesService
// ═══════════════════════════════════════════════════════════════════

mod series {
    use super::*;

    fn count_curves(path: &str) -> usize {
        path.split_whitespace().filter(|t| *t == "C").count()
    }

    #[test]
    fn always_ten_points_spanning_plot_width() {
        let svc = SeriesService::new();
        for target in [-35.0, -2.5, 0.0, 0.7, 12.0, 250.0] {
            let s = svc.build_random_series(target);
            assert_eq!(s.points.len(), SERIES_LEN);
            assert_eq!(SERIES_LEN, 10);
            assert!((s.points[0].x - 10.0).abs() < 1e-9);
            assert!((s.points[9].x - 190.0).abs() < 1e-9);
        }
    }

    #[test]
    fn x_is_evenly_spaced() {
        let s = SeriesService::new().build_series(5.0, &mut NoNoise);
        for (i, p) in s.points.iter().enumerate() {
            assert!((p.x - (10.0 + 20.0 * i as f64)).abs() < 1e-9);
        }
    }

    #[test]
    fn path_has_one_move_and_nine_curves() {
        let s = SeriesService::new().build_random_series(3.2);
        assert!(s.path.starts_with("M "));
        assert_eq!(s.path.matches('M').count(), 1);
        assert_eq!(count_curves(&s.path), 9);
    }

    #[test]
    fn y_stays_inside_plot_band() {
        let svc = SeriesService::new();
        for target in [-80.0, -1.0, 0.0, 0.2, 4.0, 60.0] {
            let s = svc.build_random_series(target);
            for p in &s.points {
                assert!(p.y >= 10.0 - 1e-9 && p.y <= 70.0 + 1e-9, "y={} for {target}", p.y);
            }
        }
    }

    #[test]
    fn flat_without_noise_at_zero_return() {
        let s = SeriesService::new().build_series(0.0, &mut NoNoise);
        assert!(s.points.iter().all(|p| p.y == 40.0));
        assert_eq!(s.min_value, 0.0);
        assert_eq!(s.max_value, 0.0);
        assert!(s.path.starts_with("M 10 40 C 20 40, 20 40, 30 40"));
    }

    #[test]
    fn non_finite_return_is_treated_as_zero() {
        let s = SeriesService::new().build_series(f64::NAN, &mut NoNoise);
        assert!(s.points.iter().all(|p| p.y == 40.0));
    }

    #[test]
    fn gain_curve_rises_to_the_top() {
        let s = SeriesService::new().build_series(50.0, &mut NoNoise);
        // Values run 5 -> 55; higher value is a smaller y.
        for pair in s.points.windows(2) {
            assert!(pair[1].y < pair[0].y);
        }
        assert!((s.points[9].y - 10.0).abs() < 1e-9);
        assert_eq!(s.min_value, 0.0);
        assert!((s.max_value - 55.0).abs() < 1e-9);
    }

    #[test]
    fn loss_curve_falls_to_the_bottom() {
        let s = SeriesService::new().build_series(-50.0, &mut NoNoise);
        for pair in s.points.windows(2) {
            assert!(pair[1].y > pair[0].y);
        }
        assert!((s.points[0].y - 10.0).abs() < 1e-9);
        assert!((s.points[9].y - 70.0).abs() < 1e-9);
    }

    #[test]
    fn control_points_sit_at_horizontal_midpoints() {
        let s = SeriesService::new().build_series(
            0.0,
            &mut ScriptedNoise(vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0]),
        );
        // min 0, max 1: even indices at y=70, odd at y=10.
        assert_eq!(s.points[0].y, 70.0);
        assert_eq!(s.points[1].y, 10.0);
        assert!(s.path.starts_with("M 10 70 C 20 70, 20 10, 30 10 C 40 10, 40 70, 50 70"));
    }

    #[test]
    fn same_seed_same_curve() {
        let svc = SeriesService::new();
        let a = svc.build_series(7.5, &mut RandomNoise::new(StdRng::seed_from_u64(42)));
        let b = svc.build_series(7.5, &mut RandomNoise::new(StdRng::seed_from_u64(42)));
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let svc = SeriesService::new();
        let a = svc.build_series(7.5, &mut RandomNoise::new(StdRng::seed_from_u64(1)));
        let b = svc.build_series(7.5, &mut RandomNoise::new(StdRng::seed_from_u64(2)));
        assert_ne!(a.path, b.path);
    }

    #[test]
    fn random_noise_is_bounded() {
        let mut noise = RandomNoise::new(StdRng::seed_from_u64(7));
        for i in 0..SERIES_LEN {
            let wave = (i as f64 * 1.3).sin() * 0.6;
            let up = noise.sample(i, true);
            assert!((up - wave).abs() <= 0.15 + 1e-12);
            let down = noise.sample(i, false);
            assert!((down + wave).abs() <= 0.15 + 1e-12);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// RateService & QuoteService
// ═══════════════════════════════════════════════════════════════════

struct StaticRate(Result<f64, String>);

#[async_trait]
impl RateProvider for StaticRate {
    fn name(&self) -> &str {
        "static"
    }

    async fn get_rate(&self) -> Result<ExchangeRate, CoreError> {
        match &self.0 {
            Ok(r) => Ok(ExchangeRate::new(*r)),
            Err(msg) => Err(CoreError::Network(msg.clone())),
        }
    }
}

struct StaticQuote(Result<f64, CoreError>);

#[async_trait]
impl QuoteProvider for StaticQuote {
    fn name(&self) -> &str {
        "static"
    }

    async fn get_quote(&self) -> Result<PriceQuote, CoreError> {
        match &self.0 {
            Ok(p) => Ok(quote(*p)),
            Err(CoreError::Api { provider, message }) => Err(CoreError::Api {
                provider: provider.clone(),
                message: message.clone(),
            }),
            Err(e) => Err(CoreError::Network(e.to_string())),
        }
    }
}

mod rate_service {
    use super::*;

    #[tokio::test]
    async fn passes_through_good_rate() {
        let svc = RateService::default();
        let rate = svc.resolve(&StaticRate(Ok(41.3))).await;
        assert_eq!(rate.quote_to_local, 41.3);
    }

    #[tokio::test]
    async fn network_failure_uses_fallback() {
        let svc = RateService::default();
        let rate = svc.resolve(&StaticRate(Err("timed out".into()))).await;
        assert_eq!(rate.quote_to_local, 34.0);
    }

    #[tokio::test]
    async fn unusable_rate_uses_fallback() {
        let svc = RateService::default();
        assert_eq!(svc.resolve(&StaticRate(Ok(0.0))).await.quote_to_local, 34.0);
        assert_eq!(svc.resolve(&StaticRate(Ok(f64::NAN))).await.quote_to_local, 34.0);
    }

    #[tokio::test]
    async fn custom_fallback() {
        let svc = RateService::new(40.0);
        let rate = svc.resolve(&StaticRate(Err("down".into()))).await;
        assert_eq!(rate.quote_to_local, 40.0);
    }

    #[test]
    fn unusable_custom_fallback_reverts_to_default() {
        assert_eq!(RateService::new(-1.0).fallback().quote_to_local, 34.0);
    }
}

mod quote_service {
    use super::*;

    #[tokio::test]
    async fn passes_through_quote() {
        let q = QuoteService::new().fetch(&StaticQuote(Ok(3612.0))).await.unwrap();
        assert_eq!(q.buying_price, 3612.0);
    }

    #[tokio::test]
    async fn provider_error_becomes_data_unavailable() {
        let provider = StaticQuote(Err(CoreError::Api {
            provider: "gold feed".into(),
            message: "HTTP 500 Internal Server Error".into(),
        }));
        let err = QuoteService::new().fetch(&provider).await.unwrap_err();
        match err {
            CoreError::DataUnavailable(msg) => assert!(msg.contains("HTTP 500")),
            other => panic!("expected DataUnavailable, got {other:?}"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Counter animation
// ═══════════════════════════════════════════════════════════════════

mod counter {
    use super::*;

    fn snapshot(pl: f64, pct: f64) -> PortfolioSnapshot {
        PortfolioSnapshot {
            profit_loss_local: pl,
            profit_loss_percent: pct,
            ..Default::default()
        }
    }

    #[test]
    fn easing_endpoints() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert!((ease_out_quart(0.5) - 0.9375).abs() < 1e-12);
        assert_eq!(ease_out_quart(-1.0), 0.0);
        assert_eq!(ease_out_quart(2.0), 1.0);
    }

    #[test]
    fn sixty_frames_over_one_and_a_half_seconds() {
        let anim = CounterAnimation::new(&snapshot(120.0, 4.0));
        assert_eq!(COUNTER_FRAMES, 60);
        assert_eq!(COUNTER_DURATION, Duration::from_millis(1500));
        assert_eq!(anim.frame_count(), 60);
        assert_eq!(anim.interval(), Duration::from_millis(25));
        assert_eq!(anim.frames().count(), 60);
    }

    #[test]
    fn frames_rise_monotonically_to_target() {
        let anim = CounterAnimation::new(&snapshot(120.0, 4.0));
        let frames: Vec<_> = anim.frames().collect();
        for pair in frames.windows(2) {
            assert!(pair[1].profit_loss_local >= pair[0].profit_loss_local);
        }
        let last = frames.last().unwrap();
        assert_eq!(last.frame, 60);
        assert_eq!(last.profit_loss_local, 120.0);
        assert_eq!(last.profit_loss_percent, 4.0);
    }

    #[test]
    fn losses_count_down_from_zero() {
        let anim = CounterAnimation::new(&snapshot(-80.0, -2.0));
        assert_eq!(anim.frame_at(0).profit_loss_local, 0.0);
        assert!(anim.frame_at(30).profit_loss_local < 0.0);
        assert_eq!(anim.frame_at(60).profit_loss_local, -80.0);
        // Frames past the end stay on the last one.
        assert_eq!(anim.frame_at(500), anim.frame_at(60));
    }

    #[tokio::test(start_paused = true)]
    async fn spawned_counter_lands_on_snapshot_values() {
        let mut handle = CounterAnimation::new(&snapshot(250.5, 7.25)).spawn();
        assert_eq!(handle.latest().frame, 0);

        let last = handle.wait().await;
        assert_eq!(last.frame, 60);
        assert_eq!(last.profit_loss_local, 250.5);
        assert_eq!(last.profit_loss_percent, 7.25);
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn counter_is_midway_after_half_a_second() {
        let handle = CounterAnimation::new(&snapshot(100.0, 1.0)).spawn();
        tokio::time::sleep(Duration::from_millis(500)).await;
        let frame = handle.latest();
        assert!(frame.frame >= 1 && frame.frame < 60, "frame {}", frame.frame);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_before_completion() {
        let mut handle = CounterAnimation::new(&snapshot(100.0, 1.0)).spawn();
        handle.cancel();
        let last = handle.wait().await;
        assert!(last.frame < 60);
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(handle.latest().frame, last.frame);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_stops_the_timer() {
        let handle = CounterAnimation::new(&snapshot(100.0, 1.0)).spawn();
        let mut rx = handle.subscribe();
        drop(handle);
        // The task is aborted, so the sender goes away without finishing.
        while rx.changed().await.is_ok() {}
        assert!(rx.borrow().frame < 60);
    }
}
