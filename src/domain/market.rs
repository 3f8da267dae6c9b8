//! Market-wide context: VIX term structure, pulse score, benchmark snapshots.

use crate::domain::indicator::crossover::{CrossoverSignal, detect_crossover};
use crate::domain::indicator::rsi::{self, NEUTRAL_RSI, calculate_rsi};
use crate::domain::indicator::sma::trailing_mean;
use crate::domain::performance::percent_change;
use crate::domain::regime::VIX_LOW;
use std::fmt;

const VIX_9D_FALLBACK: f64 = 0.95;
const VIX_3M_FALLBACK: f64 = 1.05;
const VIX_6M_FALLBACK: f64 = 1.10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermStructure {
    Contango,
    Backwardation,
}

impl TermStructure {
    pub fn description(&self) -> &'static str {
        match self {
            TermStructure::Contango => {
                "Normal term structure - Lower future volatility expected (Bullish)"
            }
            TermStructure::Backwardation => {
                "Inverted term structure - High near-term fear (Bearish/Reversal)"
            }
        }
    }

    pub fn fear_is_high(&self) -> bool {
        matches!(self, TermStructure::Backwardation)
    }
}

impl fmt::Display for TermStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermStructure::Contango => f.write_str("Contango"),
            TermStructure::Backwardation => f.write_str("Backwardation"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VixTermStructure {
    pub vix: f64,
    pub vix_9d: f64,
    pub vix_3m: f64,
    pub vix_6m: f64,
    /// VIX3M minus VIX.
    pub spread: f64,
    pub spread_pct: f64,
    pub structure: TermStructure,
}

impl VixTermStructure {
    /// Missing tenors are estimated from spot VIX.
    pub fn new(vix: f64, vix_9d: Option<f64>, vix_3m: Option<f64>, vix_6m: Option<f64>) -> Self {
        let vix_3m = vix_3m.unwrap_or(vix * VIX_3M_FALLBACK);
        let spread = vix_3m - vix;
        let spread_pct = if vix != 0.0 { spread / vix * 100.0 } else { 0.0 };
        VixTermStructure {
            vix,
            vix_9d: vix_9d.unwrap_or(vix * VIX_9D_FALLBACK),
            vix_3m,
            vix_6m: vix_6m.unwrap_or(vix * VIX_6M_FALLBACK),
            spread,
            spread_pct,
            structure: if spread > 0.0 {
                TermStructure::Contango
            } else {
                TermStructure::Backwardation
            },
        }
    }
}

pub const PULSE_BASE: f64 = 50.0;
pub const PULSE_OFFENSE: f64 = 70.0;
pub const PULSE_DEFENSE: f64 = 50.0;
const PULSE_PANIC_VIX: f64 = 30.0;
const FEAR_GREED_NEUTRAL: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    Offense,
    Balanced,
    Defense,
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stance::Offense => "offense",
            Stance::Balanced => "balanced",
            Stance::Defense => "defense",
        };
        f.write_str(label)
    }
}

/// Inputs for [`market_pulse`]. Breadth and sentiment are optional; absent
/// readings contribute nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PulseInputs<'a> {
    pub index_closes: &'a [f64],
    pub vix: f64,
    pub new_highs: Option<u32>,
    pub new_lows: Option<u32>,
    pub fear_greed: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketPulse {
    pub score: f64,
    pub stance: Stance,
}

pub fn market_pulse(inputs: &PulseInputs<'_>) -> MarketPulse {
    let mut score = PULSE_BASE;

    if let (Some(highs), Some(lows)) = (inputs.new_highs, inputs.new_lows) {
        if highs > lows {
            score += 10.0;
        }
    }

    if inputs.vix < VIX_LOW {
        score += 15.0;
    } else if inputs.vix > PULSE_PANIC_VIX {
        score -= 15.0;
    }

    if let Some(&last) = inputs.index_closes.last() {
        if last > trailing_mean(inputs.index_closes, 200) {
            score += 15.0;
        }
    }

    if inputs.fear_greed.is_some_and(|fg| fg > FEAR_GREED_NEUTRAL) {
        score += 10.0;
    }

    let stance = if score >= PULSE_OFFENSE {
        Stance::Offense
    } else if score < PULSE_DEFENSE {
        Stance::Defense
    } else {
        Stance::Balanced
    };
    MarketPulse { score, stance }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkSnapshot {
    pub code: String,
    pub close: f64,
    pub change_pct: f64,
    /// 0 when the history is shorter than 20 bars.
    pub perf_20d: f64,
    /// 0 when the history is shorter than 60 bars.
    pub perf_60d: f64,
    /// Since the first bar.
    pub perf_period: f64,
    pub rsi: f64,
    pub crossover: CrossoverSignal,
}

impl BenchmarkSnapshot {
    /// `None` for fewer than two closes.
    pub fn from_closes(code: impl Into<String>, closes: &[f64]) -> Option<Self> {
        let [.., prev, close] = closes else {
            return None;
        };
        let over = |n: usize| {
            if closes.len() >= n {
                percent_change(closes, n)
            } else {
                0.0
            }
        };
        Some(BenchmarkSnapshot {
            code: code.into(),
            close: *close,
            change_pct: (close / prev - 1.0) * 100.0,
            perf_20d: over(20),
            perf_60d: over(60),
            perf_period: percent_change(closes, closes.len()),
            rsi: calculate_rsi(closes, rsi::DEFAULT_PERIOD)
                .last()
                .copied()
                .unwrap_or(NEUTRAL_RSI),
            crossover: detect_crossover(closes),
        })
    }
}
