//! Configuration validation.
//!
//! Validates every field a ranking run needs and resolves them into a
//! [`TacticalConfig`].

use crate::domain::error::TacticalError;
use crate::ports::config_port::ConfigPort;
use std::path::PathBuf;

pub const DEFAULT_TOP: usize = 25;
pub const DEFAULT_UNIVERSE: &str = "universe.csv";

/// Where the VIX reading comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum VixSource {
    Level(f64),
    /// Last close of this series in the data directory.
    Series(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TacticalConfig {
    pub data_dir: PathBuf,
    pub universe: PathBuf,
    pub index: String,
    pub vix: VixSource,
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub top: usize,
}

pub fn validate_config(config: &dyn ConfigPort) -> Result<TacticalConfig, TacticalError> {
    let data_dir = PathBuf::from(required(config, "data", "dir")?);
    let universe = optional(config, "data", "universe")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_UNIVERSE));
    let universe = if universe.is_absolute() {
        universe
    } else {
        data_dir.join(universe)
    };

    Ok(TacticalConfig {
        index: required(config, "market", "index")?,
        vix: validate_vix(config)?,
        primary: optional(config, "benchmarks", "primary"),
        secondary: optional(config, "benchmarks", "secondary"),
        top: validate_top(config)?,
        data_dir,
        universe,
    })
}

fn optional(config: &dyn ConfigPort, section: &str, key: &str) -> Option<String> {
    config
        .get_string(section, key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn required(config: &dyn ConfigPort, section: &str, key: &str) -> Result<String, TacticalError> {
    optional(config, section, key).ok_or_else(|| TacticalError::ConfigMissing {
        section: section.to_string(),
        key: key.to_string(),
    })
}

fn validate_vix(config: &dyn ConfigPort) -> Result<VixSource, TacticalError> {
    if let Some(raw) = optional(config, "market", "vix") {
        let value: f64 = raw.parse().map_err(|_| TacticalError::ConfigInvalid {
            section: "market".to_string(),
            key: "vix".to_string(),
            reason: format!("'{}' is not a number", raw),
        })?;
        if !value.is_finite() || value <= 0.0 {
            return Err(TacticalError::ConfigInvalid {
                section: "market".to_string(),
                key: "vix".to_string(),
                reason: "vix must be positive".to_string(),
            });
        }
        return Ok(VixSource::Level(value));
    }

    match optional(config, "market", "vix_code") {
        Some(code) => Ok(VixSource::Series(code)),
        None => Err(TacticalError::ConfigMissing {
            section: "market".to_string(),
            key: "vix".to_string(),
        }),
    }
}

fn validate_top(config: &dyn ConfigPort) -> Result<usize, TacticalError> {
    let value = config.get_int("ranking", "top", DEFAULT_TOP as i64);
    if value < 1 {
        return Err(TacticalError::ConfigInvalid {
            section: "ranking".to_string(),
            key: "top".to_string(),
            reason: "top must be at least 1".to_string(),
        });
    }
    Ok(value as usize)
}
