//! Composite 0-100 score and letter rating.

pub mod scorer;
pub mod tally;
pub mod thresholds;

pub use scorer::{Factor, FactorContribution, ScoreResult, score_asset};
pub use tally::SectorTally;

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Recommendation {
    StrongBuy,
    Buy,
    #[default]
    Hold,
    Sell,
    StrongSell,
}

impl FromStr for Recommendation {
    type Err = Infallible;

    /// Unrecognised labels map to `Hold`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        Ok(match key.as_str() {
            "strong_buy" => Recommendation::StrongBuy,
            "buy" => Recommendation::Buy,
            "sell" => Recommendation::Sell,
            "strong_sell" => Recommendation::StrongSell,
            _ => Recommendation::Hold,
        })
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Recommendation::StrongBuy => "Strong Buy",
            Recommendation::Buy => "Buy",
            Recommendation::Hold => "Hold",
            Recommendation::Sell => "Sell",
            Recommendation::StrongSell => "Strong Sell",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rating {
    S,
    A,
    B,
    C,
    D,
}

impl Rating {
    pub fn from_score(score: f64) -> Self {
        if score >= thresholds::RATING_S {
            Rating::S
        } else if score >= thresholds::RATING_A {
            Rating::A
        } else if score >= thresholds::RATING_B {
            Rating::B
        } else if score >= thresholds::RATING_C {
            Rating::C
        } else {
            Rating::D
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rating::S => "S",
            Rating::A => "A",
            Rating::B => "B",
            Rating::C => "C",
            Rating::D => "D",
        };
        f.pad(label)
    }
}
