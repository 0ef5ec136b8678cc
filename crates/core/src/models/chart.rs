use serde::{Deserialize, Serialize};

/// A point in the 200 x 80 plotting space of the performance chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub x: f64,
    pub y: f64,
}

/// Simulated performance curve for the chart card.
///
/// This is decorative: it is shaped after the total return percent and is
/// NOT a record of historical prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSeries {
    /// SVG path data: one move-to followed by cubic Bezier segments
    pub path: String,

    /// Plot-space points, left to right
    pub points: Vec<SeriesPoint>,

    /// Lower bound of the value range used for scaling (never above 0)
    pub min_value: f64,

    /// Upper bound of the value range used for scaling (never below the target)
    pub max_value: f64,
}
