//! tactical: technical indicator and composite scoring engine for daily
//! equity/ETF series.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`], and the command-line shell in
//! [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
