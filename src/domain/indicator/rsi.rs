//! RSI (Relative Strength Index).
//!
//! Average gain and loss are smoothed with Wilder's recurrence (alpha = 1/period),
//! each seeded by the raw value of the first close-to-close change:
//!
//! RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//!
//! avg_loss == 0 with gains gives 100, avg_gain == 0 with losses gives 0, and a
//! flat series (both zero) gives the neutral 50.

use crate::domain::indicator::ema::ExponentialSmoother;

pub const DEFAULT_PERIOD: usize = 14;
pub const NEUTRAL_RSI: f64 = 50.0;

pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain > 0.0 { 100.0 } else { NEUTRAL_RSI }
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}

/// RSI for every bar. Bar 0 has no prior close and carries [`NEUTRAL_RSI`].
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<f64> {
    if closes.is_empty() {
        return Vec::new();
    }

    let mut gains = ExponentialSmoother::wilder(period.max(1));
    let mut losses = ExponentialSmoother::wilder(period.max(1));

    let mut values = Vec::with_capacity(closes.len());
    values.push(NEUTRAL_RSI);

    for w in closes.windows(2) {
        let change = w[1] - w[0];
        let avg_gain = gains.update(change.max(0.0));
        let avg_loss = losses.update((-change).max(0.0));
        values.push(rsi_from_averages(avg_gain, avg_loss));
    }

    values
}
