//! Bollinger band width and z-score over the trailing 20 closes.
//!
//! width = (2 * stddev20 / mean20) * 100
//! z     = (close - mean20) / stddev20
//!
//! stddev20 is the sample standard deviation. Width is 0 when mean20 is 0 and
//! z is 0 when stddev20 is 0.

use crate::domain::indicator::stddev::sample_stddev;
use crate::domain::indicator::{mean, tail};

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerReading {
    pub middle: f64,
    pub stddev: f64,
    pub width: f64,
    pub z_score: f64,
}

pub fn calculate_bollinger(closes: &[f64], period: usize) -> Option<BollingerReading> {
    let window = tail(closes, period);
    let last = *window.last()?;
    let middle = mean(window)?;
    let stddev = sample_stddev(window).unwrap_or(0.0);

    let width = if middle != 0.0 {
        DEFAULT_MULTIPLIER * stddev / middle * 100.0
    } else {
        0.0
    };
    let z_score = if stddev != 0.0 {
        (last - middle) / stddev
    } else {
        0.0
    };

    Some(BollingerReading {
        middle,
        stddev,
        width,
        z_score,
    })
}
