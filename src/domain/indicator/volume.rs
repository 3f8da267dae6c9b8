//! Volume confirmation and on-balance-volume readings for the last bar.

use crate::domain::indicator::obv::calculate_obv;
use crate::domain::indicator::sma::trailing_mean;
use crate::domain::indicator::Trend;
use std::fmt;

pub const SPIKE_RATIO: f64 = 1.5;
pub const BREAKDOWN_RATIO: f64 = 0.7;
pub const TREND_UPPER: f64 = 1.1;
pub const TREND_LOWER: f64 = 0.9;
pub const CONFIRM_HIGH_RATIO: f64 = 1.2;
pub const CONFIRM_LOW_RATIO: f64 = 0.8;
const OBV_WINDOW: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeTrend {
    Increasing,
    Decreasing,
    Stable,
}

impl fmt::Display for VolumeTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VolumeTrend::Increasing => "increasing",
            VolumeTrend::Decreasing => "decreasing",
            VolumeTrend::Stable => "stable",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeMetrics {
    pub current: f64,
    pub avg_20: f64,
    pub avg_50: f64,
    /// current / avg_20, 1.0 when avg_20 is zero.
    pub ratio: f64,
    pub spike: bool,
    pub breakdown: bool,
    pub trend: VolumeTrend,
    pub confirming: bool,
    pub divergence: bool,
    pub obv: f64,
    pub obv_mean_20: f64,
    /// Bullish when OBV is above its 20-bar mean, otherwise bearish.
    pub obv_trend: Trend,
    pub obv_divergence: Trend,
}

impl VolumeMetrics {
    /// `closes` and `volumes` must be non-empty and of equal length.
    pub fn compute(closes: &[f64], volumes: &[f64]) -> Self {
        let current = volumes.last().copied().unwrap_or(0.0);
        let avg_20 = trailing_mean(volumes, 20);
        let avg_50 = if volumes.len() >= 50 {
            trailing_mean(volumes, 50)
        } else {
            avg_20
        };
        let ratio = if avg_20 > 0.0 { current / avg_20 } else { 1.0 };

        let trend = if avg_20 > avg_50 * TREND_UPPER {
            VolumeTrend::Increasing
        } else if avg_20 < avg_50 * TREND_LOWER {
            VolumeTrend::Decreasing
        } else {
            VolumeTrend::Stable
        };

        let price_change = match closes {
            [.., prev, last] => last / prev - 1.0,
            _ => 0.0,
        };
        let confirming = (price_change > 0.0 && ratio > CONFIRM_HIGH_RATIO)
            || (price_change < 0.0 && ratio < CONFIRM_LOW_RATIO);
        let divergence = (price_change > 0.0 && ratio < CONFIRM_LOW_RATIO)
            || (price_change < 0.0 && ratio > CONFIRM_HIGH_RATIO);

        let obv_series = calculate_obv(closes, volumes);
        let obv = obv_series.last().copied().unwrap_or(0.0);
        let obv_mean_20 = trailing_mean(&obv_series, OBV_WINDOW);
        let obv_trend = if obv > obv_mean_20 {
            Trend::Bullish
        } else {
            Trend::Bearish
        };

        let close = closes.last().copied().unwrap_or(0.0);
        let price_mean_20 = trailing_mean(closes, OBV_WINDOW);
        let obv_divergence = if obv > obv_mean_20 && close < price_mean_20 {
            Trend::Bullish
        } else if obv < obv_mean_20 && close > price_mean_20 {
            Trend::Bearish
        } else {
            Trend::Neutral
        };

        VolumeMetrics {
            current,
            avg_20,
            avg_50,
            ratio,
            spike: ratio >= SPIKE_RATIO,
            breakdown: ratio <= BREAKDOWN_RATIO,
            trend,
            confirming,
            divergence,
            obv,
            obv_mean_20,
            obv_trend,
            obv_divergence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_closes(n: usize) -> Vec<f64> {
        vec![100.0; n]
    }

    #[test]
    fn spike_at_one_and_a_half_times_average() {
        let mut volumes = vec![1000.0; 19];
        volumes.push(1600.0);
        // avg20 = 1030, ratio = 1.553
        let m = VolumeMetrics::compute(&flat_closes(20), &volumes);
        assert!(m.spike);

        let mut volumes = vec![1000.0; 19];
        volumes.push(1500.0);
        // avg20 = 1025, ratio = 1.463
        let m = VolumeMetrics::compute(&flat_closes(20), &volumes);
        assert!(!m.spike);

        let mut volumes = vec![1000.0; 19];
        volumes.push(3000.0);
        let m = VolumeMetrics::compute(&flat_closes(20), &volumes);
        // avg20 = 1100, ratio = 2.727
        assert!(m.spike);
        assert!(!m.breakdown);
    }

    #[test]
    fn breakdown_on_thin_volume() {
        let mut volumes = vec![1000.0; 19];
        volumes.push(100.0);
        let m = VolumeMetrics::compute(&flat_closes(20), &volumes);
        assert!(m.breakdown);
        assert!(m.ratio < BREAKDOWN_RATIO);
    }

    #[test]
    fn zero_average_volume_gives_unit_ratio() {
        let m = VolumeMetrics::compute(&flat_closes(20), &[0.0; 20]);
        assert_eq!(m.ratio, 1.0);
        assert_eq!(m.trend, VolumeTrend::Stable);
    }

    #[test]
    fn avg_50_falls_back_to_avg_20() {
        let volumes: Vec<f64> = (1..=30).map(|i| i as f64 * 100.0).collect();
        let m = VolumeMetrics::compute(&flat_closes(30), &volumes);
        assert_eq!(m.avg_50, m.avg_20);
    }

    #[test]
    fn increasing_volume_trend() {
        let mut volumes = vec![1000.0; 30];
        volumes.extend(vec![2000.0; 20]);
        let m = VolumeMetrics::compute(&flat_closes(50), &volumes);
        assert_eq!(m.trend, VolumeTrend::Increasing);
    }

    #[test]
    fn decreasing_volume_trend() {
        let mut volumes = vec![2000.0; 30];
        volumes.extend(vec![1000.0; 20]);
        let m = VolumeMetrics::compute(&flat_closes(50), &volumes);
        assert_eq!(m.trend, VolumeTrend::Decreasing);
    }

    #[test]
    fn rising_price_on_heavy_volume_confirms() {
        let mut closes = flat_closes(19);
        closes.push(101.0);
        let mut volumes = vec![1000.0; 19];
        volumes.push(2000.0);
        let m = VolumeMetrics::compute(&closes, &volumes);
        assert!(m.confirming);
        assert!(!m.divergence);
    }

    #[test]
    fn rising_price_on_thin_volume_diverges() {
        let mut closes = flat_closes(19);
        closes.push(101.0);
        let mut volumes = vec![1000.0; 19];
        volumes.push(200.0);
        let m = VolumeMetrics::compute(&closes, &volumes);
        assert!(!m.confirming);
        assert!(m.divergence);
    }

    #[test]
    fn obv_bullish_divergence_when_price_lags() {
        // price drifts down on light volume then ticks up on heavy volume,
        // leaving OBV above its mean while close is still below its mean
        let mut closes: Vec<f64> = (0..19).map(|i| 120.0 - i as f64).collect();
        closes.push(102.5);
        let mut volumes = vec![10.0; 19];
        volumes.push(100_000.0);
        let m = VolumeMetrics::compute(&closes, &volumes);
        assert_eq!(m.obv_trend, Trend::Bullish);
        assert_eq!(m.obv_divergence, Trend::Bullish);
    }

    #[test]
    fn obv_bearish_divergence_when_price_runs() {
        let mut closes: Vec<f64> = (0..19).map(|i| 100.0 + i as f64).collect();
        closes.push(117.5);
        let mut volumes = vec![10.0; 19];
        volumes.push(100_000.0);
        let m = VolumeMetrics::compute(&closes, &volumes);
        assert_eq!(m.obv_trend, Trend::Bearish);
        assert_eq!(m.obv_divergence, Trend::Bearish);
    }

    #[test]
    fn volume_trend_display() {
        assert_eq!(VolumeTrend::Increasing.to_string(), "increasing");
        assert_eq!(VolumeTrend::Stable.to_string(), "stable");
    }
}
