//! CSV file data adapter.
//!
//! One file per symbol, `<dir>/<CODE>.csv`, with header
//! `date,open,high,low,close,volume`. open/high/low may be left empty.
//! The universe file has header `code,name,sector,industry,recommendation`.

use crate::domain::error::TacticalError;
use crate::domain::ohlcv::{OhlcvBar, PriceSeries};
use crate::domain::ranking::{AssetProfile, UNKNOWN_SECTOR};
use crate::domain::scoring::Recommendation;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
    universe_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf, universe_path: PathBuf) -> Self {
        Self {
            base_path,
            universe_path,
        }
    }

    fn csv_path(&self, code: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", code))
    }
}

fn data_error(reason: String) -> TacticalError {
    TacticalError::Data { reason }
}

fn parse_optional_price(value: Option<&str>, column: &str) -> Result<Option<f64>, TacticalError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|e| data_error(format!("invalid {} value '{}': {}", column, s, e))),
    }
}

fn parse_volume(value: &str) -> Result<i64, TacticalError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }
    value
        .parse::<i64>()
        .or_else(|_| value.parse::<f64>().map(|v| v.round() as i64))
        .map_err(|e| data_error(format!("invalid volume value '{}': {}", value, e)))
}

impl DataPort for CsvAdapter {
    fn fetch_series(&self, code: &str) -> Result<PriceSeries, TacticalError> {
        let path = self.csv_path(code);
        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => TacticalError::NoData {
                code: code.to_string(),
            },
            _ => data_error(format!("failed to read {}: {}", path.display(), e)),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| data_error(format!("CSV parse error: {}", e)))?;

            let date_str = record
                .get(0)
                .ok_or_else(|| data_error("missing date column".into()))?;
            let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
                .map_err(|e| data_error(format!("invalid date format: {}", e)))?;

            let close: f64 = record
                .get(4)
                .ok_or_else(|| data_error("missing close column".into()))?
                .trim()
                .parse()
                .map_err(|e| data_error(format!("invalid close value: {}", e)))?;

            let volume = parse_volume(
                record
                    .get(5)
                    .ok_or_else(|| data_error("missing volume column".into()))?,
            )?;

            bars.push(OhlcvBar {
                date,
                open: parse_optional_price(record.get(1), "open")?,
                high: parse_optional_price(record.get(2), "high")?,
                low: parse_optional_price(record.get(3), "low")?,
                close,
                volume,
            });
        }

        if bars.is_empty() {
            return Err(TacticalError::NoData {
                code: code.to_string(),
            });
        }

        bars.sort_by_key(|b| b.date);
        tracing::debug!(code, bars = bars.len(), "loaded series");
        PriceSeries::new(code, bars).map_err(|source| TacticalError::Series {
            code: code.to_string(),
            source,
        })
    }

    fn list_universe(&self) -> Result<Vec<AssetProfile>, TacticalError> {
        let content = fs::read_to_string(&self.universe_path).map_err(|e| {
            data_error(format!(
                "failed to read universe {}: {}",
                self.universe_path.display(),
                e
            ))
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());
        let mut profiles = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| data_error(format!("CSV parse error: {}", e)))?;
            let field = |i: usize| {
                record
                    .get(i)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            };

            let Some(code) = field(0) else {
                continue;
            };
            let recommendation = field(4)
                .and_then(|r| r.parse::<Recommendation>().ok())
                .unwrap_or_default();

            profiles.push(AssetProfile {
                name: field(1).unwrap_or_else(|| code.clone()),
                sector: field(2).unwrap_or_else(|| UNKNOWN_SECTOR.to_string()),
                industry: field(3).unwrap_or_else(|| UNKNOWN_SECTOR.to_string()),
                recommendation,
                code,
            });
        }

        Ok(profiles)
    }
}
