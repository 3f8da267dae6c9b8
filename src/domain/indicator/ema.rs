//! Exponential smoothing recurrences.
//!
//! Both variants share one recurrence, `avg = avg_prev + alpha * (value - avg_prev)`,
//! seeded by the first sample rather than by an initial SMA:
//! - span EMA: alpha = 2/(span+1) (MACD uses spans 12, 26 and 9)
//! - Wilder: alpha = 1/period (RSI uses period 14)

#[derive(Debug, Clone, Copy)]
pub struct ExponentialSmoother {
    alpha: f64,
    value: Option<f64>,
}

impl ExponentialSmoother {
    pub fn with_span(span: usize) -> Self {
        Self {
            alpha: 2.0 / (span as f64 + 1.0),
            value: None,
        }
    }

    pub fn wilder(period: usize) -> Self {
        Self {
            alpha: 1.0 / period as f64,
            value: None,
        }
    }

    /// Feeds one sample and returns the smoothed value.
    pub fn update(&mut self, sample: f64) -> f64 {
        let next = match self.value {
            None => sample,
            Some(prev) => prev + self.alpha * (sample - prev),
        };
        self.value = Some(next);
        next
    }
}

pub fn ema_series(values: &[f64], span: usize) -> Vec<f64> {
    let mut smoother = ExponentialSmoother::with_span(span);
    values.iter().map(|&v| smoother.update(v)).collect()
}

pub fn wilder_series(values: &[f64], period: usize) -> Vec<f64> {
    let mut smoother = ExponentialSmoother::wilder(period);
    values.iter().map(|&v| smoother.update(v)).collect()
}
