//! Read access to `[section] key` settings.
//!
//! Keys are optional throughout; validation of required keys lives in
//! `domain::config_validation`.

pub trait ConfigPort {
    /// Raw value, `None` when the section or key is absent.
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    /// Integer value, or `default` when absent or not an integer.
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    /// Numeric value, `None` when absent, unparsable or non-finite.
    fn get_float(&self, section: &str, key: &str) -> Option<f64>;
}
