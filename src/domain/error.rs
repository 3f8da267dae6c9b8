//! Domain error types.

/// Returned by the indicator calculator when a series is too short to score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("insufficient data: have {bars} bars, need {minimum}")]
pub struct InsufficientData {
    pub bars: usize,
    pub minimum: usize,
}

/// A price series that violates its ordering or value invariants.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    #[error("bar {index}: date {date} is not after the previous bar")]
    DateOrder { index: usize, date: chrono::NaiveDate },

    #[error("bar {index}: close must be positive, got {close}")]
    NonPositiveClose { index: usize, close: f64 },

    #[error("bar {index}: volume must be non-negative, got {volume}")]
    NegativeVolume { index: usize, volume: i64 },
}

/// Top-level error type for tactical.
#[derive(Debug, thiserror::Error)]
pub enum TacticalError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("no data for {code}")]
    NoData { code: String },

    #[error("insufficient data for {code}: have {bars} bars, need {minimum}")]
    InsufficientData {
        code: String,
        bars: usize,
        minimum: usize,
    },

    #[error("invalid series for {code}: {source}")]
    Series {
        code: String,
        #[source]
        source: SeriesError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TacticalError {
    pub fn insufficient(code: &str, err: InsufficientData) -> Self {
        TacticalError::InsufficientData {
            code: code.to_string(),
            bars: err.bars,
            minimum: err.minimum,
        }
    }
}

impl From<&TacticalError> for std::process::ExitCode {
    fn from(err: &TacticalError) -> Self {
        let code: u8 = match err {
            TacticalError::Io(_) => 1,
            TacticalError::ConfigParse { .. }
            | TacticalError::ConfigMissing { .. }
            | TacticalError::ConfigInvalid { .. } => 2,
            TacticalError::Data { .. } | TacticalError::Series { .. } => 3,
            TacticalError::NoData { .. } | TacticalError::InsufficientData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
