//! Golden/Death Cross detection on the 50- and 200-bar means.
//!
//! Fires only on the bar where the ordering flips, and only once both the
//! previous and the current bar have full 50- and 200-bar windows (201 bars).
//! Otherwise reports the current ordering; short histories order the degraded
//! means (mean of what exists) and never report a cross.

use crate::domain::indicator::sma::RollingMean;
use std::fmt;

pub const FAST_WINDOW: usize = 50;
pub const SLOW_WINDOW: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossoverSignal {
    GoldenCross,
    DeathCross,
    Bullish,
    Bearish,
}

impl CrossoverSignal {
    pub fn is_golden_cross(&self) -> bool {
        matches!(self, CrossoverSignal::GoldenCross)
    }

    pub fn is_death_cross(&self) -> bool {
        matches!(self, CrossoverSignal::DeathCross)
    }
}

impl fmt::Display for CrossoverSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CrossoverSignal::GoldenCross => "Golden Cross",
            CrossoverSignal::DeathCross => "Death Cross",
            CrossoverSignal::Bullish => "Bullish (50MA > 200MA)",
            CrossoverSignal::Bearish => "Bearish (50MA < 200MA)",
        };
        f.write_str(label)
    }
}

/// Classifies a (previous, current) pair of fast/slow means.
pub fn classify_cross(prev_fast: f64, prev_slow: f64, fast: f64, slow: f64) -> CrossoverSignal {
    if prev_fast <= prev_slow && fast > slow {
        CrossoverSignal::GoldenCross
    } else if prev_fast >= prev_slow && fast < slow {
        CrossoverSignal::DeathCross
    } else {
        ordering(fast, slow)
    }
}

fn ordering(fast: f64, slow: f64) -> CrossoverSignal {
    if fast > slow {
        CrossoverSignal::Bullish
    } else {
        CrossoverSignal::Bearish
    }
}

/// Signal at every bar from index 1 on; bar 0 has no previous pair.
pub fn crossover_series(closes: &[f64]) -> Vec<CrossoverSignal> {
    let mut fast = RollingMean::new(FAST_WINDOW);
    let mut slow = RollingMean::new(SLOW_WINDOW);
    // previous bar means, kept only once both windows were full
    let mut prev_full: Option<(f64, f64)> = None;
    let mut signals = Vec::with_capacity(closes.len().saturating_sub(1));

    for (i, &close) in closes.iter().enumerate() {
        let f = fast.push(close);
        let s = slow.push(close);
        if i > 0 {
            signals.push(match prev_full {
                Some((pf, ps)) => classify_cross(pf, ps, f, s),
                None => ordering(f, s),
            });
        }
        prev_full = (fast.is_full() && slow.is_full()).then_some((f, s));
    }
    signals
}

/// Signal at the last bar.
pub fn detect_crossover(closes: &[f64]) -> CrossoverSignal {
    crossover_series(closes)
        .last()
        .copied()
        .unwrap_or(CrossoverSignal::Bearish)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_golden_cross() {
        assert_eq!(classify_cross(9.0, 10.0, 11.0, 10.0), CrossoverSignal::GoldenCross);
        assert_eq!(classify_cross(10.0, 10.0, 10.5, 10.0), CrossoverSignal::GoldenCross);
    }

    #[test]
    fn classify_death_cross() {
        assert_eq!(classify_cross(11.0, 10.0, 9.0, 10.0), CrossoverSignal::DeathCross);
        assert_eq!(classify_cross(10.0, 10.0, 9.5, 10.0), CrossoverSignal::DeathCross);
    }

    #[test]
    fn classify_steady_ordering() {
        assert_eq!(classify_cross(11.0, 10.0, 12.0, 10.0), CrossoverSignal::Bullish);
        assert_eq!(classify_cross(9.0, 10.0, 8.0, 10.0), CrossoverSignal::Bearish);
        assert_eq!(classify_cross(10.0, 10.0, 10.0, 10.0), CrossoverSignal::Bearish);
    }

    #[test]
    fn golden_cross_fires_once_at_crossing_bar() {
        // long decline followed by a sharp rally drags the 50 mean over the 200
        let mut closes: Vec<f64> = (0..220).map(|i| 300.0 - i as f64).collect();
        closes.extend((0..120).map(|i| 80.0 + 4.0 * i as f64));

        let signals = crossover_series(&closes);
        let golden: Vec<usize> = signals
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_golden_cross())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(golden.len(), 1, "golden cross should fire exactly once");

        let at = golden[0];
        assert!(signals[at + 1..].iter().all(|s| *s == CrossoverSignal::Bullish));
        assert!(signals.iter().all(|s| !(s.is_golden_cross() && s.is_death_cross())));
    }

    #[test]
    fn display_labels() {
        assert_eq!(CrossoverSignal::GoldenCross.to_string(), "Golden Cross");
        assert_eq!(
            CrossoverSignal::Bearish.to_string(),
            "Bearish (50MA < 200MA)"
        );
    }

    #[test]
    fn warmup_never_reports_a_cross() {
        // 80 bars down then 40 up: the 50 window fills at bar 50 and the
        // degraded 200 mean flips later, neither is a real crossing
        let mut closes: Vec<f64> = (0..80).map(|i| 200.0 - i as f64).collect();
        closes.extend((0..40).map(|i| 121.0 + 3.0 * i as f64));

        let signals = crossover_series(&closes);
        assert_eq!(signals.len(), closes.len() - 1);
        assert!(
            signals
                .iter()
                .all(|s| !s.is_golden_cross() && !s.is_death_cross()),
            "{signals:?}"
        );
        assert_eq!(detect_crossover(&closes), CrossoverSignal::Bullish);

        let declining: Vec<f64> = (0..51).map(|i| 100.0 - i as f64).collect();
        assert_eq!(detect_crossover(&declining), CrossoverSignal::Bearish);
    }

    #[test]
    fn cross_needs_two_full_windows() {
        // flat history then a jump on the last bar lifts the 50 mean over the 200
        let mut at_200 = vec![100.0; 199];
        at_200.push(200.0);
        assert_eq!(detect_crossover(&at_200), CrossoverSignal::Bullish);

        let mut at_201 = vec![100.0; 200];
        at_201.push(200.0);
        assert_eq!(detect_crossover(&at_201), CrossoverSignal::GoldenCross);

        let mut drop = vec![100.0; 200];
        drop.push(50.0);
        assert_eq!(detect_crossover(&drop), CrossoverSignal::DeathCross);
    }

    #[test]
    fn detect_on_single_bar_is_bearish() {
        assert_eq!(detect_crossover(&[100.0]), CrossoverSignal::Bearish);
    }
}
