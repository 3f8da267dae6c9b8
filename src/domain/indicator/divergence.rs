//! RSI divergence over the trailing 20 bars.
//!
//! Peaks and troughs use a plain 3-point test (strictly above or below both
//! neighbours) with no smoothing. Bearish: the two latest peaks make a higher
//! high in price and a lower high in RSI. Bullish: the two latest troughs make
//! a lower low in price and a higher low in RSI.

pub const LOOKBACK: usize = 20;
/// Bars required before divergence is evaluated at all.
pub const MIN_BARS: usize = LOOKBACK + 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsiDivergence {
    pub bullish: bool,
    pub bearish: bool,
    pub insufficient_data: bool,
}

impl RsiDivergence {
    pub fn description(&self) -> &'static str {
        if self.insufficient_data {
            "Insufficient data"
        } else if self.bearish {
            "Bearish Divergence: Price higher highs, RSI lower highs - Reversal signal"
        } else if self.bullish {
            "Bullish Divergence: Price lower lows, RSI higher lows - Reversal signal"
        } else {
            "No significant divergence"
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Extremum {
    price: f64,
    rsi: f64,
}

fn local_extrema(closes: &[f64], rsi: &[f64], is_extreme: fn(f64, f64, f64) -> bool) -> Vec<Extremum> {
    (1..closes.len().saturating_sub(1))
        .filter(|&i| is_extreme(closes[i - 1], closes[i], closes[i + 1]))
        .map(|i| Extremum {
            price: closes[i],
            rsi: rsi[i],
        })
        .collect()
}

/// `rsi` must be aligned bar-for-bar with `closes`.
pub fn detect_rsi_divergence(closes: &[f64], rsi: &[f64]) -> RsiDivergence {
    if closes.len() < MIN_BARS || rsi.len() != closes.len() {
        return RsiDivergence {
            bullish: false,
            bearish: false,
            insufficient_data: true,
        };
    }

    let start = closes.len() - LOOKBACK;
    let recent_close = &closes[start..];
    let recent_rsi = &rsi[start..];

    let peaks = local_extrema(recent_close, recent_rsi, |prev, cur, next| {
        cur > prev && cur > next
    });
    let troughs = local_extrema(recent_close, recent_rsi, |prev, cur, next| {
        cur < prev && cur < next
    });

    let bearish = match peaks.as_slice() {
        [.., older, latest] => latest.price > older.price && latest.rsi < older.rsi,
        _ => false,
    };
    let bullish = match troughs.as_slice() {
        [.., older, latest] => latest.price < older.price && latest.rsi > older.rsi,
        _ => false,
    };

    RsiDivergence {
        bullish,
        bearish,
        insufficient_data: false,
    }
}
