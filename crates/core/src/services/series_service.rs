use rand::rngs::ThreadRng;
use rand::Rng;

use crate::models::chart::{PerformanceSeries, SeriesPoint};

/// Number of samples in the performance curve.
pub const SERIES_LEN: usize = 10;

const PLOT_LEFT: f64 = 10.0;
const PLOT_WIDTH: f64 = 180.0;
const PLOT_BOTTOM: f64 = 70.0;
const PLOT_HEIGHT: f64 = 60.0;
const PLOT_MID: f64 = 40.0;

const WAVE_FREQUENCY: f64 = 1.3;
const WAVE_AMPLITUDE: f64 = 0.6;
const JITTER: f64 = 0.3;

/// Per-sample perturbation added on top of the eased trend.
///
/// Injected so the chart can be reproduced under a fixed seed or switched
/// off entirely.
pub trait NoiseSource {
    fn sample(&mut self, index: usize, trend_up: bool) -> f64;
}

/// A sine wave that follows the trend direction plus uniform jitter.
pub struct RandomNoise<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomNoise<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomNoise<ThreadRng> {
    pub fn from_thread_rng() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> NoiseSource for RandomNoise<R> {
    fn sample(&mut self, index: usize, trend_up: bool) -> f64 {
        let amplitude = if trend_up { WAVE_AMPLITUDE } else { -WAVE_AMPLITUDE };
        let wave = (index as f64 * WAVE_FREQUENCY).sin() * amplitude;
        let jitter = (self.rng.gen::<f64>() - 0.5) * JITTER;
        wave + jitter
    }
}

/// No perturbation at all: the bare smoothstep trend.
pub struct NoNoise;

impl NoiseSource for NoNoise {
    fn sample(&mut self, _index: usize, _trend_up: bool) -> f64 {
        0.0
    }
}

/// Synthesizes the decorative performance curve shown on the chart card.
///
/// The curve starts near a tenth of the total return, eases towards the
/// full return with a smoothstep, and wobbles a little. It looks like a
/// trend line but is not derived from any price history.
pub struct SeriesService;

impl SeriesService {
    pub fn new() -> Self {
        Self
    }

    /// Build the series with thread-local randomness. Two calls with the same
    /// input give different curves.
    pub fn build_random_series(&self, target_percent: f64) -> PerformanceSeries {
        self.build_series(target_percent, &mut RandomNoise::from_thread_rng())
    }

    /// Build the series with the given noise source.
    ///
    /// Always yields `SERIES_LEN` points spread over x in [10, 190], with y in
    /// [10, 70] (higher value, smaller y), and a path of one move-to plus
    /// `SERIES_LEN - 1` cubic segments.
    pub fn build_series(
        &self,
        target_percent: f64,
        noise: &mut dyn NoiseSource,
    ) -> PerformanceSeries {
        let target = if target_percent.is_finite() {
            target_percent
        } else {
            0.0
        };
        let values = sample_values(target, noise);

        let min_value = values.iter().copied().fold(0.0_f64, f64::min);
        let max_value = values.iter().copied().fold(target, f64::max);

        let step = PLOT_WIDTH / (SERIES_LEN - 1) as f64;
        let points: Vec<SeriesPoint> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| SeriesPoint {
                x: PLOT_LEFT + i as f64 * step,
                y: scale_y(v, min_value, max_value),
            })
            .collect();

        PerformanceSeries {
            path: smooth_path(&points),
            points,
            min_value,
            max_value,
        }
    }
}

impl Default for SeriesService {
    fn default() -> Self {
        Self::new()
    }
}

fn sample_values(target: f64, noise: &mut dyn NoiseSource) -> Vec<f64> {
    let trend_up = target >= 0.0;
    let base = if trend_up {
        (target * 0.1).max(0.0)
    } else {
        (target * 0.1).min(0.0)
    };

    (0..SERIES_LEN)
        .map(|i| {
            let t = i as f64 / (SERIES_LEN - 1) as f64;
            let ease = t * t * (3.0 - 2.0 * t);
            base + ease * target + noise.sample(i, trend_up)
        })
        .collect()
}

fn scale_y(v: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return PLOT_MID;
    }
    PLOT_BOTTOM - (v - min) / (max - min) * PLOT_HEIGHT
}

/// Join the points with cubic Bezier segments whose control points sit at
/// the horizontal midpoint, level with each endpoint.
fn smooth_path(points: &[SeriesPoint]) -> String {
    let Some(first) = points.first() else {
        return String::new();
    };

    let mut d = format!("M {} {}", first.x, first.y);
    for pair in points.windows(2) {
        let (p0, p1) = (pair[0], pair[1]);
        let dx = (p1.x - p0.x) / 2.0;
        d.push_str(&format!(
            " C {} {}, {} {}, {} {}",
            p0.x + dx,
            p0.y,
            p1.x - dx,
            p1.y,
            p1.x,
            p1.y
        ));
    }
    d
}
