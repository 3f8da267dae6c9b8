//! One ranking pass over a candidate universe.
//!
//! A pass owns its [`SectorTally`]. Candidates are scored one at a time in
//! input order: each score reads the tally as it stood before that candidate,
//! and the candidate's sector is recorded only after it scored.

use crate::domain::error::InsufficientData;
use crate::domain::indicator::{IndicatorBundle, compute_indicators};
use crate::domain::ohlcv::PriceSeries;
use crate::domain::performance::{Benchmark, RelativePerformance, relative_performance};
use crate::domain::regime::RegimeContext;
use crate::domain::scoring::{Recommendation, ScoreResult, SectorTally, score_asset};

pub const UNKNOWN_SECTOR: &str = "Unknown";

#[derive(Debug, Clone, PartialEq)]
pub struct AssetProfile {
    pub code: String,
    pub name: String,
    pub sector: String,
    pub industry: String,
    pub recommendation: Recommendation,
}

impl AssetProfile {
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        AssetProfile {
            name: code.clone(),
            code,
            sector: UNKNOWN_SECTOR.to_string(),
            industry: UNKNOWN_SECTOR.to_string(),
            recommendation: Recommendation::Hold,
        }
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = sector.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct Candidate {
    pub profile: AssetProfile,
    pub series: PriceSeries,
}

#[derive(Debug, Clone)]
pub struct RankedAsset {
    pub profile: AssetProfile,
    pub indicators: IndicatorBundle,
    pub performance: RelativePerformance,
    pub result: ScoreResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedAsset {
    pub code: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Ranking {
    /// Score descending; ties keep scoring order.
    pub ranked: Vec<RankedAsset>,
    pub skipped: Vec<SkippedAsset>,
    pub sectors: SectorTally,
}

pub struct RankingPass<'a> {
    regime: &'a RegimeContext,
    primary: Option<&'a Benchmark>,
    secondary: Option<&'a Benchmark>,
    tally: SectorTally,
    ranked: Vec<RankedAsset>,
    skipped: Vec<SkippedAsset>,
}

impl<'a> RankingPass<'a> {
    pub fn new(
        regime: &'a RegimeContext,
        primary: Option<&'a Benchmark>,
        secondary: Option<&'a Benchmark>,
    ) -> Self {
        RankingPass {
            regime,
            primary,
            secondary,
            tally: SectorTally::new(),
            ranked: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn tally(&self) -> &SectorTally {
        &self.tally
    }

    /// Scores one candidate. Insufficient history leaves the tally untouched.
    pub fn score(&mut self, candidate: &Candidate) -> Result<&ScoreResult, InsufficientData> {
        let profile = &candidate.profile;
        let indicators = compute_indicators(&candidate.series)?;
        let closes = candidate.series.closes();
        let performance = relative_performance(&closes, self.primary, self.secondary);
        let result = score_asset(
            &indicators,
            &performance,
            profile.recommendation,
            &profile.sector,
            self.regime,
            &self.tally,
        );
        tracing::debug!(
            code = %profile.code,
            sector = %profile.sector,
            score = result.score,
            raw = result.raw_score,
            "scored"
        );
        self.tally.record(&profile.sector);

        self.ranked.push(RankedAsset {
            profile: profile.clone(),
            indicators,
            performance,
            result,
        });
        let last = self.ranked.len() - 1;
        Ok(&self.ranked[last].result)
    }

    /// Records a candidate that could not be scored.
    pub fn skip(&mut self, code: impl Into<String>, reason: impl Into<String>) {
        let skipped = SkippedAsset {
            code: code.into(),
            reason: reason.into(),
        };
        tracing::warn!(code = %skipped.code, reason = %skipped.reason, "skipping candidate");
        self.skipped.push(skipped);
    }

    pub fn finish(self) -> Ranking {
        let mut ranked = self.ranked;
        ranked.sort_by(|a, b| b.result.score.total_cmp(&a.result.score));
        Ranking {
            ranked,
            skipped: self.skipped,
            sectors: self.tally,
        }
    }
}

/// Runs a full pass over `candidates` in order.
pub fn rank_candidates(
    candidates: &[Candidate],
    regime: &RegimeContext,
    primary: Option<&Benchmark>,
    secondary: Option<&Benchmark>,
) -> Ranking {
    let mut pass = RankingPass::new(regime, primary, secondary);
    for candidate in candidates {
        if let Err(e) = pass.score(candidate) {
            pass.skip(candidate.profile.code.clone(), e.to_string());
        }
    }
    pass.finish()
}
