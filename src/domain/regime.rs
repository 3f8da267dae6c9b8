//! Market regime classification from a broad-market index and the VIX.

use crate::domain::indicator::sma::trailing_mean;
use std::fmt;

const SMA_WINDOW: usize = 200;
pub const VIX_LOW: f64 = 20.0;
pub const VIX_MODERATE: f64 = 25.0;
pub const VIX_HIGH: f64 = 30.0;
/// Multiplier applied when the regime cannot be determined.
pub const FALLBACK_MULTIPLIER: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    Bullish,
    CautiousBull,
    VolatileBull,
    Correction,
    Bearish,
    Unknown,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Regime::Bullish => "bullish",
            Regime::CautiousBull => "cautious_bull",
            Regime::VolatileBull => "volatile_bull",
            Regime::Correction => "correction",
            Regime::Bearish => "bearish",
            Regime::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradingMode {
    AggressiveLong,
    SelectiveLong,
    ReduceExposure,
    Sidelines,
    Defensive,
    Wait,
}

impl fmt::Display for TradingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TradingMode::AggressiveLong => "aggressive long",
            TradingMode::SelectiveLong => "selective long",
            TradingMode::ReduceExposure => "reduce exposure",
            TradingMode::Sidelines => "sidelines",
            TradingMode::Defensive => "defensive",
            TradingMode::Wait => "wait",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VixLevel {
    Low,
    Moderate,
    High,
    Extreme,
    Unknown,
}

impl VixLevel {
    pub fn from_vix(vix: f64) -> Self {
        if !vix.is_finite() {
            VixLevel::Unknown
        } else if vix < VIX_LOW {
            VixLevel::Low
        } else if vix < VIX_MODERATE {
            VixLevel::Moderate
        } else if vix < VIX_HIGH {
            VixLevel::High
        } else {
            VixLevel::Extreme
        }
    }
}

impl fmt::Display for VixLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VixLevel::Low => "low",
            VixLevel::Moderate => "moderate",
            VixLevel::High => "high",
            VixLevel::Extreme => "extreme",
            VixLevel::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegimeContext {
    pub regime: Regime,
    pub trading_mode: TradingMode,
    pub allow_new_longs: bool,
    /// Always in (0, 1].
    pub position_size_multiplier: f64,
    pub vix: f64,
    pub vix_level: VixLevel,
    pub index_above_200ma: bool,
    pub index_sma_200: f64,
    pub distance_to_200ma_pct: f64,
    pub reduce_position_size: bool,
}

impl RegimeContext {
    pub fn unknown() -> Self {
        RegimeContext {
            regime: Regime::Unknown,
            trading_mode: TradingMode::Wait,
            allow_new_longs: false,
            position_size_multiplier: FALLBACK_MULTIPLIER,
            vix: f64::NAN,
            vix_level: VixLevel::Unknown,
            index_above_200ma: false,
            index_sma_200: 0.0,
            distance_to_200ma_pct: 0.0,
            reduce_position_size: true,
        }
    }
}

/// Classifies from index closes (the 200-bar mean degrades to the full-series
/// mean on shorter histories). Never fails: bad input yields
/// [`RegimeContext::unknown`].
pub fn classify_regime(index_closes: &[f64], vix: f64) -> RegimeContext {
    let Some(&last) = index_closes.last() else {
        tracing::warn!("regime: empty index series, falling back to unknown");
        return RegimeContext::unknown();
    };
    if !vix.is_finite() {
        tracing::warn!(vix, "regime: non-finite VIX, falling back to unknown");
        return RegimeContext::unknown();
    }

    let sma_200 = trailing_mean(index_closes, SMA_WINDOW);
    if !sma_200.is_finite() || sma_200 <= 0.0 || !last.is_finite() {
        tracing::warn!(sma_200, last, "regime: unusable index mean, falling back to unknown");
        return RegimeContext::unknown();
    }

    let above = last > sma_200;
    let (regime, allow_new_longs, multiplier, trading_mode) = match (above, vix) {
        (true, v) if v < VIX_LOW => (Regime::Bullish, true, 1.0, TradingMode::AggressiveLong),
        (true, v) if v < VIX_MODERATE => {
            (Regime::CautiousBull, true, 0.75, TradingMode::SelectiveLong)
        }
        (true, _) => (Regime::VolatileBull, false, 0.5, TradingMode::ReduceExposure),
        (false, v) if v < VIX_MODERATE => {
            (Regime::Correction, false, 0.5, TradingMode::Sidelines)
        }
        (false, _) => (Regime::Bearish, false, 0.25, TradingMode::Defensive),
    };

    RegimeContext {
        regime,
        trading_mode,
        allow_new_longs,
        position_size_multiplier: multiplier,
        vix,
        vix_level: VixLevel::from_vix(vix),
        index_above_200ma: above,
        index_sma_200: sma_200,
        distance_to_200ma_pct: (last / sma_200 - 1.0) * 100.0,
        reduce_position_size: vix >= VIX_MODERATE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rising(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64).collect()
    }

    fn falling(n: usize) -> Vec<f64> {
        (0..n).map(|i| 400.0 - i as f64).collect()
    }

    #[test]
    fn above_ma_low_vix_is_bullish() {
        let ctx = classify_regime(&rising(250), 15.0);
        assert_eq!(ctx.regime, Regime::Bullish);
        assert!(ctx.allow_new_longs);
        assert_eq!(ctx.position_size_multiplier, 1.0);
        assert_eq!(ctx.trading_mode, TradingMode::AggressiveLong);
        assert_eq!(ctx.vix_level, VixLevel::Low);
        assert!(!ctx.reduce_position_size);
        assert!(ctx.distance_to_200ma_pct > 0.0);
    }

    #[test]
    fn regime_table() {
        let up = rising(250);
        let down = falling(250);
        let cases = [
            (&up, 22.0, Regime::CautiousBull, true, 0.75),
            (&up, 27.0, Regime::VolatileBull, false, 0.5),
            (&down, 18.0, Regime::Correction, false, 0.5),
            (&down, 24.9, Regime::Correction, false, 0.5),
            (&down, 25.0, Regime::Bearish, false, 0.25),
        ];
        for (closes, vix, regime, longs, mult) in cases {
            let ctx = classify_regime(closes, vix);
            assert_eq!(ctx.regime, regime, "vix {vix}");
            assert_eq!(ctx.allow_new_longs, longs);
            assert_eq!(ctx.position_size_multiplier, mult);
        }
    }

    #[test]
    fn vix_boundaries() {
        assert_eq!(classify_regime(&rising(250), 20.0).regime, Regime::CautiousBull);
        assert_eq!(classify_regime(&rising(250), 25.0).regime, Regime::VolatileBull);
        assert!(classify_regime(&rising(250), 25.0).reduce_position_size);
    }

    #[test]
    fn vix_levels() {
        assert_eq!(VixLevel::from_vix(19.9), VixLevel::Low);
        assert_eq!(VixLevel::from_vix(20.0), VixLevel::Moderate);
        assert_eq!(VixLevel::from_vix(25.0), VixLevel::High);
        assert_eq!(VixLevel::from_vix(30.0), VixLevel::Extreme);
        assert_eq!(VixLevel::from_vix(f64::NAN), VixLevel::Unknown);
    }

    #[test]
    fn short_index_uses_full_mean() {
        let ctx = classify_regime(&[100.0, 110.0, 120.0], 15.0);
        assert!((ctx.index_sma_200 - 110.0).abs() < 1e-12);
        assert!(ctx.index_above_200ma);
    }

    #[test]
    fn empty_index_is_unknown() {
        let ctx = classify_regime(&[], 15.0);
        assert_eq!(ctx.regime, Regime::Unknown);
        assert_eq!(ctx.trading_mode, TradingMode::Wait);
        assert!(!ctx.allow_new_longs);
        assert_eq!(ctx.position_size_multiplier, FALLBACK_MULTIPLIER);
        assert!(ctx.reduce_position_size);
    }

    #[test]
    fn nan_vix_is_unknown() {
        assert_eq!(classify_regime(&rising(250), f64::NAN).regime, Regime::Unknown);
    }

    #[test]
    fn multiplier_always_in_unit_interval() {
        for vix in [5.0, 19.0, 21.0, 26.0, 40.0] {
            for closes in [rising(220), falling(220)] {
                let m = classify_regime(&closes, vix).position_size_multiplier;
                assert!(m > 0.0 && m <= 1.0);
            }
        }
    }

    #[test]
    fn display_labels() {
        assert_eq!(Regime::CautiousBull.to_string(), "cautious_bull");
        assert_eq!(TradingMode::ReduceExposure.to_string(), "reduce exposure");
        assert_eq!(VixLevel::Extreme.to_string(), "extreme");
    }
}
