//! Sector composition of the assets scored so far in one ranking pass.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectorTally {
    counts: BTreeMap<String, usize>,
    total: usize,
}

impl SectorTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, sector: &str) {
        *self.counts.entry(sector.to_string()).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn count(&self, sector: &str) -> usize {
        self.counts.get(sector).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// count / total, or `None` while nothing has been recorded.
    pub fn share(&self, sector: &str) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.count(sector) as f64 / self.total as f64)
        }
    }

    /// Sectors in name order with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(s, &c)| (s.as_str(), c))
    }

    pub fn reset(&mut self) {
        self.counts.clear();
        self.total = 0;
    }
}
