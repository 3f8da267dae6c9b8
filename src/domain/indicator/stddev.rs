//! Sample standard deviation (divides by N-1).
//!
//! Volatility, Sharpe/Sortino and the 20-bar Bollinger/z-score readings all use
//! the sample estimator. Fewer than two values have no defined deviation.

pub fn sample_stddev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / (n - 1.0);
    Some(variance.sqrt())
}
