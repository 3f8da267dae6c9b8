//! Daily bars and the validated price series the calculator consumes.

use crate::domain::error::SeriesError;
use chrono::NaiveDate;

/// One daily bar. Open, high and low are optional; only close and volume feed
/// the indicator calculations.
#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: i64,
}

impl OhlcvBar {
    /// A bar carrying only close and volume.
    pub fn close_only(date: NaiveDate, close: f64, volume: i64) -> Self {
        Self {
            date,
            open: None,
            high: None,
            low: None,
            close,
            volume,
        }
    }
}

/// Ascending-by-date bars for one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<OhlcvBar>,
}

impl PriceSeries {
    /// Validates strictly increasing dates, positive closes and non-negative volume.
    pub fn new(symbol: impl Into<String>, bars: Vec<OhlcvBar>) -> Result<Self, SeriesError> {
        for (index, bar) in bars.iter().enumerate() {
            if !bar.close.is_finite() || bar.close <= 0.0 {
                return Err(SeriesError::NonPositiveClose {
                    index,
                    close: bar.close,
                });
            }
            if bar.volume < 0 {
                return Err(SeriesError::NegativeVolume {
                    index,
                    volume: bar.volume,
                });
            }
            if index > 0 && bar.date <= bars[index - 1].date {
                return Err(SeriesError::DateOrder {
                    index,
                    date: bar.date,
                });
            }
        }

        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[OhlcvBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume as f64).collect()
    }

    pub fn last(&self) -> Option<&OhlcvBar> {
        self.bars.last()
    }
}
