//! INI file configuration adapter.

use crate::domain::error::TacticalError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TacticalError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| TacticalError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        tracing::debug!(file = %path.display(), "loaded config");
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, TacticalError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| TacticalError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_float(&self, section: &str, key: &str) -> Option<f64> {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .filter(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn from_string_parses_sections() {
        let content = r#"
[data]
dir = ./prices
universe = semis.csv

[market]
index = SPY
vix = 18.5

[benchmarks]
primary = SMH
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(adapter.get_string("data", "dir"), Some("./prices".to_string()));
        assert_eq!(adapter.get_string("market", "index"), Some("SPY".to_string()));
        assert_eq!(adapter.get_float("market", "vix"), Some(18.5));
        assert_eq!(
            adapter.get_string("benchmarks", "primary"),
            Some("SMH".to_string())
        );
    }

    #[test]
    fn missing_keys_fall_back() {
        let adapter = FileConfigAdapter::from_string("[ranking]\ntop = abc\n").unwrap();
        assert_eq!(adapter.get_string("ranking", "missing"), None);
        assert_eq!(adapter.get_string("nowhere", "key"), None);
        assert_eq!(adapter.get_int("ranking", "top", 25), 25);
        assert_eq!(adapter.get_float("market", "vix"), None);
    }

    #[test]
    fn get_int_returns_value() {
        let adapter = FileConfigAdapter::from_string("[ranking]\ntop = 10\n").unwrap();
        assert_eq!(adapter.get_int("ranking", "top", 0), 10);
    }

    #[test]
    fn get_float_rejects_text_and_non_finite() {
        let adapter = FileConfigAdapter::from_string(
            "[market]\nvix_3m = 19.75\nfear_greed = greedy\nvix_6m = inf\n",
        )
        .unwrap();
        assert_eq!(adapter.get_float("market", "vix_3m"), Some(19.75));
        assert_eq!(adapter.get_float("market", "fear_greed"), None);
        assert_eq!(adapter.get_float("market", "vix_6m"), None);
        assert_eq!(adapter.get_float("market", "vix_9d"), None);
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[market]\nvix_code = VIX\n").unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("market", "vix_code"),
            Some("VIX".to_string())
        );
    }

    #[test]
    fn from_file_missing_is_parse_error() {
        let err = FileConfigAdapter::from_file("/nonexistent/path/config.ini").unwrap_err();
        assert!(matches!(err, TacticalError::ConfigParse { file, .. } if file.contains("config.ini")));
    }
}
