//! Composite score thresholds and point values.
//!
//! Tier tables are checked in order; the first tier whose `above` bound the
//! value strictly exceeds wins.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub above: f64,
    pub points: f64,
}

const fn tier(above: f64, points: f64) -> Tier {
    Tier { above, points }
}

/// Points of the first tier `value` exceeds.
pub fn tier_points(value: f64, tiers: &[Tier]) -> Option<f64> {
    tiers.iter().find(|t| value > t.above).map(|t| t.points)
}

pub const BASE_SCORE: f64 = 50.0;
pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

// Relative strength against the primary benchmark
pub const VS_PRIMARY_20D: [Tier; 4] = [
    tier(10.0, 15.0),
    tier(5.0, 12.0),
    tier(0.0, 8.0),
    tier(-5.0, -3.0),
];
pub const VS_PRIMARY_20D_FLOOR: f64 = -8.0;
pub const VS_PRIMARY_60D: [Tier; 3] = [tier(15.0, 10.0), tier(5.0, 5.0), tier(0.0, 2.0)];
pub const VS_PRIMARY_60D_LAGGARD: f64 = -10.0;
pub const VS_PRIMARY_60D_LAGGARD_POINTS: f64 = -5.0;

// Own price performance
pub const PERF_20D: [Tier; 3] = [tier(15.0, 10.0), tier(5.0, 5.0), tier(0.0, 2.0)];
pub const PERF_20D_LAGGARD: f64 = -10.0;
pub const PERF_20D_LAGGARD_POINTS: f64 = -5.0;
pub const PERF_60D: [Tier; 2] = [tier(30.0, 5.0), tier(10.0, 3.0)];

// Technical confirmation
pub const RSI_SWEET_LOW: f64 = 55.0;
pub const RSI_SWEET_HIGH: f64 = 70.0;
pub const RSI_SWEET_POINTS: f64 = 5.0;
pub const ABOVE_SMA_50_POINTS: f64 = 5.0;
pub const ABOVE_SMA_200_POINTS: f64 = 5.0;

// Volume
pub const VOLUME_SPIKE_POINTS: f64 = 8.0;
pub const VOLUME_RATIO_TIERS: [Tier; 2] = [tier(1.2, 5.0), tier(1.0, 2.0)];
pub const VOLUME_BREAKDOWN_POINTS: f64 = -5.0;
pub const ACCUMULATION_POINTS: f64 = 3.0;
pub const OBV_DIVERGENCE_POINTS: f64 = 4.0;
pub const VOLUME_MIN: f64 = -10.0;
pub const VOLUME_MAX: f64 = 12.0;

// Liquidity, on close * 20-bar average volume
pub const DOLLAR_VOLUME: [Tier; 2] = [tier(500_000_000.0, 5.0), tier(100_000_000.0, 3.0)];

// Timeframe confluence
pub const CONFLUENCE_STRONG_BULL_POINTS: f64 = 12.0;
pub const CONFLUENCE_BULL_POINTS: f64 = 8.0;
pub const CONFLUENCE_NEUTRAL_POINTS: f64 = 3.0;
pub const CONFLUENCE_BEAR_POINTS: f64 = -5.0;
pub const WEEKLY_DAILY_ALIGNMENT_POINTS: f64 = 4.0;
pub const MACD_INTRADAY_POINTS: f64 = 3.0;
pub const TIMEFRAME_MIN: f64 = -8.0;
pub const TIMEFRAME_MAX: f64 = 15.0;

// Risk-adjusted returns
pub const SORTINO: [Tier; 4] = [
    tier(2.0, 10.0),
    tier(1.5, 7.0),
    tier(1.0, 5.0),
    tier(0.5, 2.0),
];
pub const NEGATIVE_SORTINO_POINTS: f64 = -5.0;
pub const SHARPE: [Tier; 3] = [tier(1.5, 5.0), tier(1.0, 3.0), tier(0.5, 1.0)];
pub const LOW_VOLATILITY: f64 = 30.0;
pub const LOW_VOLATILITY_POINTS: f64 = 3.0;
pub const MODERATE_VOLATILITY: f64 = 40.0;
pub const MODERATE_VOLATILITY_POINTS: f64 = 1.0;
pub const HIGH_VOLATILITY: f64 = 60.0;
pub const HIGH_VOLATILITY_POINTS: f64 = -5.0;

// Mean reversion on the 20-bar z-score
pub const Z_SCORE_EXTENDED: [Tier; 3] = [tier(3.0, -8.0), tier(2.5, -5.0), tier(2.0, -3.0)];
pub const Z_SCORE_OVERSOLD: f64 = -3.0;
pub const Z_SCORE_OVERSOLD_POINTS: f64 = 3.0;

// Drawdown, in percent (<= 0)
pub const SHALLOW_DRAWDOWN: f64 = -15.0;
pub const SHALLOW_DRAWDOWN_POINTS: f64 = 2.0;
pub const DEEP_DRAWDOWN: f64 = -40.0;
pub const DEEP_DRAWDOWN_POINTS: f64 = -3.0;

// Analyst recommendation
pub const STRONG_BUY_POINTS: f64 = 5.0;
pub const BUY_POINTS: f64 = 3.0;
pub const SELL_POINTS: f64 = -3.0;

// Sector concentration, on the sector's share of the pass so far
pub const SECTOR_SHARE: [Tier; 3] = [tier(0.30, -8.0), tier(0.20, -4.0), tier(0.10, -2.0)];
pub const DIVERSIFICATION_POINTS: f64 = 3.0;

// Regime adjustment
pub const BULLISH_REGIME_BOOST: f64 = 1.05;

// Rating floors
pub const RATING_S: f64 = 85.0;
pub const RATING_A: f64 = 75.0;
pub const RATING_B: f64 = 60.0;
pub const RATING_C: f64 = 45.0;
