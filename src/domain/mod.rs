//! Core domain types and logic.

pub mod ohlcv;
pub mod indicator;
pub mod regime;
pub mod performance;
pub mod scoring;
pub mod ranking;
pub mod market;
pub mod config_validation;
pub mod error;
