//! Multi-timeframe trend confluence.
//!
//! Daily compares the close against SMA20 and SMA20 against its value four bars
//! earlier. Weekly resamples every 5th close from bar 0. Intraday is the close
//! against both SMA20 and SMA50.

use crate::domain::indicator::sma::rolling_mean_series;
use crate::domain::indicator::{Trend, mean, tail};
use std::fmt;

const DAILY_WINDOW: usize = 20;
const DAILY_SLOPE_LAG: usize = 5;
const WEEKLY_STRIDE: usize = 5;
const WEEKLY_POINTS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confluence {
    StrongBull,
    Bull,
    Neutral,
    Bear,
}

impl Confluence {
    pub fn from_alignment(alignment: u8) -> Self {
        match alignment {
            3.. => Confluence::StrongBull,
            2 => Confluence::Bull,
            1 => Confluence::Neutral,
            0 => Confluence::Bear,
        }
    }
}

impl fmt::Display for Confluence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Confluence::StrongBull => "strong_bull",
            Confluence::Bull => "bull",
            Confluence::Neutral => "neutral",
            Confluence::Bear => "bear",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeframeAnalysis {
    pub daily: Trend,
    pub weekly: Trend,
    pub intraday_bullish: bool,
    pub intraday_bearish: bool,
    /// Bullish signals out of {daily, weekly, intraday, close > SMA200}.
    pub alignment: u8,
    pub confluence: Confluence,
}

pub fn daily_trend(closes: &[f64]) -> Trend {
    if closes.len() < DAILY_SLOPE_LAG {
        return Trend::Neutral;
    }
    let sma = rolling_mean_series(closes, DAILY_WINDOW);
    let n = closes.len();
    let close = closes[n - 1];
    let now = sma[n - 1];
    let earlier = sma[n - DAILY_SLOPE_LAG];

    if close > now && now > earlier {
        Trend::Bullish
    } else if close < now && now < earlier {
        Trend::Bearish
    } else {
        Trend::Neutral
    }
}

pub fn weekly_trend(closes: &[f64]) -> Trend {
    let weekly: Vec<f64> = closes.iter().copied().step_by(WEEKLY_STRIDE).collect();
    if weekly.len() < WEEKLY_POINTS {
        return Trend::Neutral;
    }
    let recent = tail(&weekly, WEEKLY_POINTS);
    match (weekly.last(), mean(recent)) {
        (Some(&last), Some(avg)) if last > avg => Trend::Bullish,
        _ => Trend::Bearish,
    }
}

pub fn analyze_timeframes(closes: &[f64], sma_20: f64, sma_50: f64, sma_200: f64) -> TimeframeAnalysis {
    let close = closes.last().copied().unwrap_or(0.0);
    let daily = daily_trend(closes);
    let weekly = weekly_trend(closes);
    let intraday_bullish = close > sma_20 && close > sma_50;
    let intraday_bearish = close < sma_20 && close < sma_50;

    let alignment = [
        daily == Trend::Bullish,
        weekly == Trend::Bullish,
        intraday_bullish,
        close > sma_200,
    ]
    .iter()
    .filter(|&&on| on)
    .count() as u8;

    TimeframeAnalysis {
        daily,
        weekly,
        intraday_bullish,
        intraday_bearish,
        alignment,
        confluence: Confluence::from_alignment(alignment),
    }
}
