//! Asset performance over fixed horizons and deltas against benchmarks.

use crate::domain::indicator::{finite_or, mean};

pub const HORIZONS: [usize; 4] = [5, 20, 60, 180];

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HorizonReturns {
    pub d5: f64,
    pub d20: f64,
    pub d60: f64,
    pub d180: f64,
}

/// Percent change from the bar `n` back from the end (the earliest bar when the
/// history is shorter) to the last bar. `n` of 0 or 1 compares the last bar
/// with itself.
pub fn percent_change(closes: &[f64], n: usize) -> f64 {
    let Some(&current) = closes.last() else {
        return 0.0;
    };
    let past = closes[closes.len().saturating_sub(n.max(1))];
    finite_or((current / past - 1.0) * 100.0, 0.0)
}

impl HorizonReturns {
    pub fn from_closes(closes: &[f64]) -> Self {
        HorizonReturns {
            d5: percent_change(closes, HORIZONS[0]),
            d20: percent_change(closes, HORIZONS[1]),
            d60: percent_change(closes, HORIZONS[2]),
            d180: percent_change(closes, HORIZONS[3]),
        }
    }

    fn minus(&self, other: &HorizonReturns) -> HorizonReturns {
        HorizonReturns {
            d5: self.d5 - other.d5,
            d20: self.d20 - other.d20,
            d60: self.d60 - other.d60,
            d180: self.d180 - other.d180,
        }
    }
}

/// A named benchmark with its horizon returns resolved once per pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Benchmark {
    pub name: String,
    pub returns: HorizonReturns,
}

impl Benchmark {
    pub fn new(name: impl Into<String>, returns: HorizonReturns) -> Self {
        Benchmark {
            name: name.into(),
            returns,
        }
    }

    pub fn from_closes(name: impl Into<String>, closes: &[f64]) -> Self {
        Self::new(name, HorizonReturns::from_closes(closes))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkDelta {
    pub name: String,
    /// Own minus benchmark, per horizon.
    pub delta: HorizonReturns,
    /// Beats the benchmark on each of 5/20/60 days.
    pub outperforms: bool,
}

impl BenchmarkDelta {
    fn against(own: &HorizonReturns, bench: &Benchmark) -> Self {
        let delta = own.minus(&bench.returns);
        BenchmarkDelta {
            name: bench.name.clone(),
            delta,
            outperforms: delta.d5 > 0.0 && delta.d20 > 0.0 && delta.d60 > 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelativePerformance {
    pub own: HorizonReturns,
    pub primary: Option<BenchmarkDelta>,
    pub secondary: Option<BenchmarkDelta>,
    pub outperforms_all: bool,
    /// mean(own 20d, 60d) minus mean(primary 20d, 60d).
    pub primary_rs: f64,
}

impl RelativePerformance {
    /// Deltas against the primary benchmark; a missing primary counts as flat.
    pub fn primary_delta(&self) -> HorizonReturns {
        self.primary
            .as_ref()
            .map(|p| p.delta)
            .unwrap_or(self.own)
    }
}

pub fn relative_performance(
    closes: &[f64],
    primary: Option<&Benchmark>,
    secondary: Option<&Benchmark>,
) -> RelativePerformance {
    let own = HorizonReturns::from_closes(closes);
    let primary_delta = primary.map(|b| BenchmarkDelta::against(&own, b));
    let secondary_delta = secondary.map(|b| BenchmarkDelta::against(&own, b));

    let supplied: Vec<&BenchmarkDelta> = primary_delta.iter().chain(&secondary_delta).collect();
    let outperforms_all = !supplied.is_empty() && supplied.iter().all(|d| d.outperforms);

    let bench = primary.map(|b| b.returns).unwrap_or_default();
    let own_strength = mean(&[own.d20, own.d60]).unwrap_or(0.0);
    let bench_strength = mean(&[bench.d20, bench.d60]).unwrap_or(0.0);

    RelativePerformance {
        own,
        primary: primary_delta,
        secondary: secondary_delta,
        outperforms_all,
        primary_rs: own_strength - bench_strength,
    }
}
