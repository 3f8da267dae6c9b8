//! Return-based risk metrics: annualized volatility, Sharpe, Sortino, max drawdown.

use crate::domain::indicator::stddev::sample_stddev;
use crate::domain::indicator::{finite_or, mean};

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Sharpe and Sortino need more than this many return observations.
pub const MIN_RATIO_OBSERVATIONS: usize = 30;

/// Downside deviation used when no return is negative.
pub const DOWNSIDE_FLOOR: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskMetrics {
    /// Annualized, in percent.
    pub volatility: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    /// Most negative peak-to-trough move, in percent (<= 0).
    pub max_drawdown: f64,
}

impl RiskMetrics {
    pub fn compute(returns: &[f64]) -> Self {
        let annualizer = TRADING_DAYS_PER_YEAR.sqrt();
        let stddev = sample_stddev(returns);
        let volatility = stddev.map(|sd| sd * annualizer * 100.0).unwrap_or(0.0);
        let (sharpe_ratio, sortino_ratio) = compute_risk_adjusted(returns);

        RiskMetrics {
            volatility: finite_or(volatility, 0.0),
            sharpe_ratio,
            sortino_ratio,
            max_drawdown: compute_drawdown(returns),
        }
    }
}

fn compute_risk_adjusted(returns: &[f64]) -> (f64, f64) {
    if returns.len() <= MIN_RATIO_OBSERVATIONS {
        return (0.0, 0.0);
    }

    let annualizer = TRADING_DAYS_PER_YEAR.sqrt();
    let mean = mean(returns).unwrap_or(0.0);

    let sharpe = match sample_stddev(returns) {
        Some(sd) if sd != 0.0 => annualizer * mean / sd,
        _ => 0.0,
    };

    let downside: Vec<f64> = returns.iter().copied().filter(|&r| r < 0.0).collect();
    let downside_dev = if downside.is_empty() {
        Some(DOWNSIDE_FLOOR)
    } else {
        // a single negative return has no sample deviation
        sample_stddev(&downside).map(|sd| sd * annualizer)
    };

    let sortino = match downside_dev {
        Some(dd) if dd != 0.0 => annualizer * mean / dd,
        _ => 0.0,
    };

    (finite_or(sharpe, 0.0), finite_or(sortino, 0.0))
}

/// min over (cumulative / running_max - 1) * 100 of the compounded returns.
fn compute_drawdown(returns: &[f64]) -> f64 {
    let mut cumulative = 1.0_f64;
    let mut peak = f64::NEG_INFINITY;
    let mut max_dd = 0.0_f64;

    for r in returns {
        cumulative *= 1.0 + r;
        if cumulative > peak {
            peak = cumulative;
        }
        if peak > 0.0 {
            let dd = cumulative / peak - 1.0;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::pct_returns;

    #[test]
    fn risk_empty_returns() {
        let m = RiskMetrics::compute(&[]);
        assert_eq!(m.volatility, 0.0);
        assert_eq!(m.sharpe_ratio, 0.0);
        assert_eq!(m.sortino_ratio, 0.0);
        assert_eq!(m.max_drawdown, 0.0);
    }

    #[test]
    fn ratios_need_more_than_thirty_returns() {
        let returns = vec![0.01; 30];
        let m = RiskMetrics::compute(&returns);
        assert_eq!(m.sharpe_ratio, 0.0);
        assert_eq!(m.sortino_ratio, 0.0);
    }

    #[test]
    fn sharpe_zero_when_stddev_zero() {
        let returns = vec![0.01; 40];
        let m = RiskMetrics::compute(&returns);
        assert_eq!(m.sharpe_ratio, 0.0);
    }

    #[test]
    fn sortino_uses_floor_without_losses() {
        let returns: Vec<f64> = (0..40).map(|i| 0.001 * (1 + i % 3) as f64).collect();
        let m = RiskMetrics::compute(&returns);
        let mean = returns.iter().sum::<f64>() / returns.len() as f64;
        let expected = TRADING_DAYS_PER_YEAR.sqrt() * mean / DOWNSIDE_FLOOR;
        assert!((m.sortino_ratio - expected).abs() < 1e-9);
        assert!(m.sharpe_ratio > 0.0);
    }

    #[test]
    fn sortino_single_loss_falls_back_to_zero() {
        let mut returns = vec![0.01; 39];
        returns.push(-0.02);
        let m = RiskMetrics::compute(&returns);
        assert_eq!(m.sortino_ratio, 0.0);
    }

    #[test]
    fn sortino_with_losses() {
        let returns: Vec<f64> = (0..60)
            .map(|i| if i % 4 == 0 { -0.01 - 0.001 * i as f64 } else { 0.012 })
            .collect();
        let m = RiskMetrics::compute(&returns);
        let downside: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();
        let dd = sample_stddev(&downside).unwrap() * TRADING_DAYS_PER_YEAR.sqrt();
        let mean = returns.iter().sum::<f64>() / returns.len() as f64;
        assert!((m.sortino_ratio - TRADING_DAYS_PER_YEAR.sqrt() * mean / dd).abs() < 1e-9);
    }

    #[test]
    fn volatility_is_annualized_percent() {
        let returns = [0.01, -0.01, 0.01, -0.01];
        let m = RiskMetrics::compute(&returns);
        let sd = sample_stddev(&returns).unwrap();
        assert!((m.volatility - sd * TRADING_DAYS_PER_YEAR.sqrt() * 100.0).abs() < 1e-9);
    }

    #[test]
    fn max_drawdown_from_closes() {
        let closes = [100.0, 110.0, 90.0, 95.0, 80.0, 100.0];
        let dd = compute_drawdown(&pct_returns(&closes));
        assert!((dd - ((80.0 / 110.0) - 1.0) * 100.0).abs() < 1e-9);
    }

    #[test]
    fn max_drawdown_zero_for_rising_series() {
        let closes: Vec<f64> = (1..=30).map(|i| i as f64).collect();
        assert_eq!(compute_drawdown(&pct_returns(&closes)), 0.0);
    }
}
