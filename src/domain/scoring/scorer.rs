//! Folds indicators, relative performance, regime and sector mix into one score.
//!
//! Every factor is additive on a base of 50. The regime adjustment is applied to
//! the sum last, then the result is clamped to [0, 100] and rounded to one
//! decimal. The scorer reads the [`SectorTally`]; recording the scored sector is
//! the caller's job.

use crate::domain::indicator::timeframe::Confluence;
use crate::domain::indicator::volume::VolumeTrend;
use crate::domain::indicator::{IndicatorBundle, Trend, round_to};
use crate::domain::performance::RelativePerformance;
use crate::domain::regime::{Regime, RegimeContext};
use crate::domain::scoring::tally::SectorTally;
use crate::domain::scoring::thresholds::{self as t, tier_points};
use crate::domain::scoring::{Rating, Recommendation};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Factor {
    RelativeStrength20d,
    RelativeStrength60d,
    Performance,
    Technical,
    Volume,
    Liquidity,
    Timeframe,
    RiskAdjusted,
    MeanReversion,
    Drawdown,
    Analyst,
    SectorConcentration,
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Factor::RelativeStrength20d => "relative strength 20d",
            Factor::RelativeStrength60d => "relative strength 60d",
            Factor::Performance => "performance",
            Factor::Technical => "technical",
            Factor::Volume => "volume",
            Factor::Liquidity => "liquidity",
            Factor::Timeframe => "timeframe",
            Factor::RiskAdjusted => "risk adjusted",
            Factor::MeanReversion => "mean reversion",
            Factor::Drawdown => "drawdown",
            Factor::Analyst => "analyst",
            Factor::SectorConcentration => "sector concentration",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorContribution {
    pub factor: Factor,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    /// Final score in [0, 100], one decimal.
    pub score: f64,
    pub rating: Rating,
    /// Base plus factor points, before the regime adjustment and clamping.
    pub raw_score: f64,
    pub factors: Vec<FactorContribution>,
}

impl ScoreResult {
    pub fn points(&self, factor: Factor) -> f64 {
        self.factors
            .iter()
            .find(|c| c.factor == factor)
            .map(|c| c.points)
            .unwrap_or(0.0)
    }
}

pub fn score_asset(
    bundle: &IndicatorBundle,
    performance: &RelativePerformance,
    recommendation: Recommendation,
    sector: &str,
    regime: &RegimeContext,
    tally: &SectorTally,
) -> ScoreResult {
    let vs_primary = performance.primary_delta();

    let factors = vec![
        FactorContribution {
            factor: Factor::RelativeStrength20d,
            points: relative_strength_20d(vs_primary.d20),
        },
        FactorContribution {
            factor: Factor::RelativeStrength60d,
            points: relative_strength_60d(vs_primary.d60),
        },
        FactorContribution {
            factor: Factor::Performance,
            points: own_performance(performance.own.d20, performance.own.d60),
        },
        FactorContribution {
            factor: Factor::Technical,
            points: technical(bundle),
        },
        FactorContribution {
            factor: Factor::Volume,
            points: volume(bundle),
        },
        FactorContribution {
            factor: Factor::Liquidity,
            points: tier_points(bundle.dollar_volume(), &t::DOLLAR_VOLUME).unwrap_or(0.0),
        },
        FactorContribution {
            factor: Factor::Timeframe,
            points: timeframe(bundle),
        },
        FactorContribution {
            factor: Factor::RiskAdjusted,
            points: risk_adjusted(bundle),
        },
        FactorContribution {
            factor: Factor::MeanReversion,
            points: mean_reversion(bundle.z_score),
        },
        FactorContribution {
            factor: Factor::Drawdown,
            points: drawdown(bundle.risk.max_drawdown),
        },
        FactorContribution {
            factor: Factor::Analyst,
            points: analyst(recommendation),
        },
        FactorContribution {
            factor: Factor::SectorConcentration,
            points: sector_concentration(sector, tally),
        },
    ];

    let raw_score = t::BASE_SCORE + factors.iter().map(|c| c.points).sum::<f64>();
    let score = round_to(
        adjust_for_regime(raw_score, regime).clamp(t::MIN_SCORE, t::MAX_SCORE),
        1,
    );

    ScoreResult {
        score,
        rating: Rating::from_score(score),
        raw_score,
        factors,
    }
}

/// Scales by the position-size multiplier when new longs are not allowed and
/// boosts bullish regimes, capped at the maximum score.
pub fn adjust_for_regime(score: f64, regime: &RegimeContext) -> f64 {
    let mut adjusted = score;
    if !regime.allow_new_longs {
        adjusted *= regime.position_size_multiplier;
    }
    if regime.regime == Regime::Bullish {
        adjusted = (adjusted * t::BULLISH_REGIME_BOOST).min(t::MAX_SCORE);
    }
    adjusted
}

fn relative_strength_20d(delta: f64) -> f64 {
    tier_points(delta, &t::VS_PRIMARY_20D).unwrap_or(t::VS_PRIMARY_20D_FLOOR)
}

fn relative_strength_60d(delta: f64) -> f64 {
    match tier_points(delta, &t::VS_PRIMARY_60D) {
        Some(points) => points,
        None if delta < t::VS_PRIMARY_60D_LAGGARD => t::VS_PRIMARY_60D_LAGGARD_POINTS,
        None => 0.0,
    }
}

fn own_performance(perf_20d: f64, perf_60d: f64) -> f64 {
    let short = match tier_points(perf_20d, &t::PERF_20D) {
        Some(points) => points,
        None if perf_20d < t::PERF_20D_LAGGARD => t::PERF_20D_LAGGARD_POINTS,
        None => 0.0,
    };
    short + tier_points(perf_60d, &t::PERF_60D).unwrap_or(0.0)
}

fn technical(bundle: &IndicatorBundle) -> f64 {
    let mut points = 0.0;
    if bundle.rsi > t::RSI_SWEET_LOW && bundle.rsi < t::RSI_SWEET_HIGH {
        points += t::RSI_SWEET_POINTS;
    }
    if bundle.close > bundle.sma_50 {
        points += t::ABOVE_SMA_50_POINTS;
    }
    if bundle.close > bundle.sma_200 {
        points += t::ABOVE_SMA_200_POINTS;
    }
    points
}

fn volume(bundle: &IndicatorBundle) -> f64 {
    let v = &bundle.volume;
    let mut points = if v.spike {
        t::VOLUME_SPIKE_POINTS
    } else if let Some(p) = tier_points(v.ratio, &t::VOLUME_RATIO_TIERS) {
        p
    } else if v.breakdown {
        t::VOLUME_BREAKDOWN_POINTS
    } else {
        0.0
    };

    match (v.trend, v.obv_trend) {
        (VolumeTrend::Increasing, Trend::Bullish) => points += t::ACCUMULATION_POINTS,
        (VolumeTrend::Decreasing, Trend::Bearish) => points -= t::ACCUMULATION_POINTS,
        _ => {}
    }

    match v.obv_divergence {
        Trend::Bullish => points += t::OBV_DIVERGENCE_POINTS,
        Trend::Bearish => points -= t::OBV_DIVERGENCE_POINTS,
        Trend::Neutral => {}
    }

    points.clamp(t::VOLUME_MIN, t::VOLUME_MAX)
}

fn timeframe(bundle: &IndicatorBundle) -> f64 {
    let tf = &bundle.timeframe;
    let mut points = match tf.confluence {
        Confluence::StrongBull => t::CONFLUENCE_STRONG_BULL_POINTS,
        Confluence::Bull => t::CONFLUENCE_BULL_POINTS,
        Confluence::Neutral => t::CONFLUENCE_NEUTRAL_POINTS,
        Confluence::Bear => t::CONFLUENCE_BEAR_POINTS,
    };

    match (tf.weekly, tf.daily) {
        (Trend::Bullish, Trend::Bullish) => points += t::WEEKLY_DAILY_ALIGNMENT_POINTS,
        (Trend::Bearish, Trend::Bearish) => points -= t::WEEKLY_DAILY_ALIGNMENT_POINTS,
        _ => {}
    }

    let histogram = bundle.macd.histogram;
    if histogram > 0.0 && tf.intraday_bullish {
        points += t::MACD_INTRADAY_POINTS;
    } else if histogram < 0.0 && tf.intraday_bearish {
        points -= t::MACD_INTRADAY_POINTS;
    }

    points.clamp(t::TIMEFRAME_MIN, t::TIMEFRAME_MAX)
}

fn risk_adjusted(bundle: &IndicatorBundle) -> f64 {
    let risk = &bundle.risk;
    let sortino = match tier_points(risk.sortino_ratio, &t::SORTINO) {
        Some(points) => points,
        None if risk.sortino_ratio < 0.0 => t::NEGATIVE_SORTINO_POINTS,
        None => 0.0,
    };
    let sharpe = tier_points(risk.sharpe_ratio, &t::SHARPE).unwrap_or(0.0);
    let volatility = if risk.volatility < t::LOW_VOLATILITY {
        t::LOW_VOLATILITY_POINTS
    } else if risk.volatility < t::MODERATE_VOLATILITY {
        t::MODERATE_VOLATILITY_POINTS
    } else if risk.volatility > t::HIGH_VOLATILITY {
        t::HIGH_VOLATILITY_POINTS
    } else {
        0.0
    };
    sortino + sharpe + volatility
}

fn mean_reversion(z_score: f64) -> f64 {
    match tier_points(z_score, &t::Z_SCORE_EXTENDED) {
        Some(points) => points,
        None if z_score < t::Z_SCORE_OVERSOLD => t::Z_SCORE_OVERSOLD_POINTS,
        None => 0.0,
    }
}

fn drawdown(max_drawdown: f64) -> f64 {
    if max_drawdown > t::SHALLOW_DRAWDOWN {
        t::SHALLOW_DRAWDOWN_POINTS
    } else if max_drawdown < t::DEEP_DRAWDOWN {
        t::DEEP_DRAWDOWN_POINTS
    } else {
        0.0
    }
}

fn analyst(recommendation: Recommendation) -> f64 {
    match recommendation {
        Recommendation::StrongBuy => t::STRONG_BUY_POINTS,
        Recommendation::Buy => t::BUY_POINTS,
        Recommendation::Hold => 0.0,
        Recommendation::Sell | Recommendation::StrongSell => t::SELL_POINTS,
    }
}

fn sector_concentration(sector: &str, tally: &SectorTally) -> f64 {
    match tally.share(sector) {
        None => 0.0,
        Some(share) => tier_points(share, &t::SECTOR_SHARE).unwrap_or(t::DIVERSIFICATION_POINTS),
    }
}
