#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use tactical::domain::error::TacticalError;
pub use tactical::domain::ohlcv::{OhlcvBar, PriceSeries};
use tactical::domain::ranking::AssetProfile;
use tactical::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
    pub universe: Vec<AssetProfile>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            universe: Vec::new(),
        }
    }

    pub fn with_bars(mut self, code: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(code.to_string(), bars);
        self
    }

    pub fn with_error(mut self, code: &str, reason: &str) -> Self {
        self.errors.insert(code.to_string(), reason.to_string());
        self
    }

    pub fn with_asset(mut self, profile: AssetProfile) -> Self {
        self.universe.push(profile);
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_series(&self, code: &str) -> Result<PriceSeries, TacticalError> {
        if let Some(reason) = self.errors.get(code) {
            return Err(TacticalError::Data {
                reason: reason.clone(),
            });
        }
        match self.data.get(code) {
            Some(bars) if !bars.is_empty() => {
                PriceSeries::new(code, bars.clone()).map_err(|source| TacticalError::Series {
                    code: code.to_string(),
                    source,
                })
            }
            _ => Err(TacticalError::NoData {
                code: code.to_string(),
            }),
        }
    }

    fn list_universe(&self) -> Result<Vec<AssetProfile>, TacticalError> {
        Ok(self.universe.clone())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Daily bars from `closes`, one calendar day apart starting 2023-01-02.
pub fn bars_from_closes(closes: &[f64], volume: i64) -> Vec<OhlcvBar> {
    let start = date(2023, 1, 2);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| OhlcvBar {
            date: start + chrono::Duration::days(i as i64),
            open: Some(close),
            high: Some(close * 1.01),
            low: Some(close * 0.99),
            close,
            volume,
        })
        .collect()
}

pub fn series_from_closes(code: &str, closes: &[f64]) -> PriceSeries {
    PriceSeries::new(code, bars_from_closes(closes, 1_000_000)).unwrap()
}

/// Compounding at `daily_pct` percent per bar from 100.
pub fn trending_closes(count: usize, daily_pct: f64) -> Vec<f64> {
    (0..count)
        .map(|i| 100.0 * (1.0 + daily_pct / 100.0).powi(i as i32))
        .collect()
}

/// Upward drift with a deterministic wobble, so returns have both signs.
pub fn wavy_closes(count: usize, drift: f64, amplitude: f64) -> Vec<f64> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            100.0 + drift * t + amplitude * (t * 0.9).sin()
        })
        .collect()
}

pub fn generate_bars(count: usize, start_price: f64, step: f64) -> Vec<OhlcvBar> {
    let closes: Vec<f64> = (0..count).map(|i| start_price + step * i as f64).collect();
    bars_from_closes(&closes, 1000)
}
