//! Simple moving average over a fixed window.
//!
//! While fewer than `window` samples have been seen the mean of all samples so
//! far is emitted, which is the degraded-window fallback SMA50/SMA200 need on
//! short histories.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct RollingMean {
    window: usize,
    buf: VecDeque<f64>,
    sum: f64,
}

impl RollingMean {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            buf: VecDeque::with_capacity(window),
            sum: 0.0,
        }
    }

    pub fn push(&mut self, value: f64) -> f64 {
        if self.buf.len() == self.window {
            if let Some(old) = self.buf.pop_front() {
                self.sum -= old;
            }
        }
        self.buf.push_back(value);
        self.sum += value;
        self.sum / self.buf.len() as f64
    }

    /// True once a full window has been accumulated.
    pub fn is_full(&self) -> bool {
        self.buf.len() == self.window
    }
}

pub fn rolling_mean_series(values: &[f64], window: usize) -> Vec<f64> {
    let mut acc = RollingMean::new(window);
    values.iter().map(|&v| acc.push(v)).collect()
}

/// Mean of the trailing `window` values (all values when fewer); 0 when empty.
pub fn trailing_mean(values: &[f64], window: usize) -> f64 {
    super::mean(super::tail(values, window)).unwrap_or(0.0)
}
