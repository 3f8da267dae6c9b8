//! Technical indicator implementations.
//!
//! Every rolling or exponential computation here is an explicit recurrence or a
//! fixed-size sliding-window accumulator over a slice of closes (or volumes):
//! - [`ema`]: span-based EMA and Wilder smoothing, seeded by the first sample
//! - [`sma`]: rolling mean that degrades to the mean of available samples
//! - [`stddev`]: sample standard deviation
//! - [`rsi`], [`macd`], [`obv`], [`bollinger`]: the classic oscillators
//! - [`risk`], [`volume`], [`crossover`], [`divergence`], [`timeframe`]: derived metrics
//! - [`bundle`]: folds everything into an [`IndicatorBundle`] for the last bar

pub mod bollinger;
pub mod bundle;
pub mod crossover;
pub mod divergence;
pub mod ema;
pub mod macd;
pub mod obv;
pub mod risk;
pub mod rsi;
pub mod sma;
pub mod stddev;
pub mod timeframe;
pub mod volume;

pub use bundle::{compute_indicators, IndicatorBundle, MIN_BARS};

use std::fmt;

/// Direction label shared by trend, OBV and divergence readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Trend::Bullish => "bullish",
            Trend::Bearish => "bearish",
            Trend::Neutral => "neutral",
        };
        f.write_str(label)
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Fractional day-over-day changes; one shorter than the input.
pub fn pct_returns(closes: &[f64]) -> Vec<f64> {
    closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// The trailing `n` values, or all of them when fewer exist.
pub fn tail(values: &[f64], n: usize) -> &[f64] {
    &values[values.len().saturating_sub(n)..]
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Replaces NaN and infinities with `fallback`.
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}
