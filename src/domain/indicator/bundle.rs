//! Indicator snapshot at the last bar of a price series.

use crate::domain::error::InsufficientData;
use crate::domain::indicator::bollinger::{self, calculate_bollinger};
use crate::domain::indicator::crossover::{CrossoverSignal, detect_crossover};
use crate::domain::indicator::divergence::{RsiDivergence, detect_rsi_divergence};
use crate::domain::indicator::macd::{MacdPoint, calculate_macd_default};
use crate::domain::indicator::risk::RiskMetrics;
use crate::domain::indicator::rsi::{self, NEUTRAL_RSI, calculate_rsi};
use crate::domain::indicator::sma::trailing_mean;
use crate::domain::indicator::timeframe::{TimeframeAnalysis, analyze_timeframes};
use crate::domain::indicator::volume::VolumeMetrics;
use crate::domain::indicator::{finite_or, pct_returns, round_to};
use crate::domain::ohlcv::PriceSeries;

/// Bars required before any indicator is computed.
pub const MIN_BARS: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorBundle {
    pub close: f64,
    pub prev_close: f64,
    /// Day-over-day change of the last close, in percent.
    pub change_pct: f64,
    pub rsi: f64,
    /// Histogram rounded to 4 decimals.
    pub macd: MacdPoint,
    pub sma_20: f64,
    pub sma_50: f64,
    pub sma_200: f64,
    pub crossover: CrossoverSignal,
    pub divergence: RsiDivergence,
    pub timeframe: TimeframeAnalysis,
    /// Rounded to 2 decimals.
    pub risk: RiskMetrics,
    pub bb_width: f64,
    pub z_score: f64,
    /// `ratio` rounded to 2 decimals; flags were taken from the raw ratio.
    pub volume: VolumeMetrics,
}

impl IndicatorBundle {
    /// Last close times the 20-bar average volume.
    pub fn dollar_volume(&self) -> f64 {
        self.close * self.volume.avg_20
    }
}

pub fn compute_indicators(series: &PriceSeries) -> Result<IndicatorBundle, InsufficientData> {
    if series.len() < MIN_BARS {
        return Err(InsufficientData {
            bars: series.len(),
            minimum: MIN_BARS,
        });
    }

    let closes = series.closes();
    let volumes = series.volumes();
    let n = closes.len();
    let close = closes[n - 1];
    let prev_close = closes[n - 2];

    let rsi_series = calculate_rsi(&closes, rsi::DEFAULT_PERIOD);
    let rsi = rsi_series.last().copied().unwrap_or(NEUTRAL_RSI);

    let macd = calculate_macd_default(&closes)
        .last()
        .map(|p| MacdPoint {
            histogram: round_to(p.histogram, 4),
            ..*p
        })
        .unwrap_or(MacdPoint {
            line: 0.0,
            signal: 0.0,
            histogram: 0.0,
        });

    let sma_20 = trailing_mean(&closes, 20);
    let sma_50 = trailing_mean(&closes, 50);
    let sma_200 = trailing_mean(&closes, 200);

    let raw_risk = RiskMetrics::compute(&pct_returns(&closes));
    let risk = RiskMetrics {
        volatility: round_to(raw_risk.volatility, 2),
        sharpe_ratio: round_to(raw_risk.sharpe_ratio, 2),
        sortino_ratio: round_to(raw_risk.sortino_ratio, 2),
        max_drawdown: round_to(raw_risk.max_drawdown, 2),
    };

    let (bb_width, z_score) = calculate_bollinger(&closes, bollinger::DEFAULT_PERIOD)
        .map(|b| (round_to(b.width, 2), round_to(b.z_score, 2)))
        .unwrap_or((0.0, 0.0));

    let raw_volume = VolumeMetrics::compute(&closes, &volumes);
    let volume = VolumeMetrics {
        ratio: round_to(raw_volume.ratio, 2),
        ..raw_volume
    };

    Ok(IndicatorBundle {
        close,
        prev_close,
        change_pct: finite_or((close / prev_close - 1.0) * 100.0, 0.0),
        rsi,
        macd,
        sma_20,
        sma_50,
        sma_200,
        crossover: detect_crossover(&closes),
        divergence: detect_rsi_divergence(&closes, &rsi_series),
        timeframe: analyze_timeframes(&closes, sma_20, sma_50, sma_200),
        risk,
        bb_width,
        z_score,
        volume,
    })
}
