mod domain;
mod intake;
mod policy;
mod rules;

pub use domain::{
    ApplicantProfile, EducationLevel, ScoreCategory, ScoreComponent, ScoreFactor, ScoreResult,
    UnknownLabel, BASE_SCORE, MAX_SCORE, MIN_SCORE,
};
pub use intake::{load_submissions, ProfileSubmission, AFFIRMATIVE, OWNED_HOUSING};
pub use policy::{MarketOutlook, RateRange, BANK_ELIGIBILITY_SCORE};

use chrono::{Datelike, Local};
use policy::clamp_score;

/// Stateless evaluator applying the scoring rule tables to a profile.
///
/// Ages are measured against `reference_year`; when unset the current
/// calendar year is read at evaluation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreEngine {
    reference_year: Option<i32>,
}

impl ScoreEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin age calculations to a fixed year.
    pub fn at_year(reference_year: i32) -> Self {
        Self {
            reference_year: Some(reference_year),
        }
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year.unwrap_or_else(|| Local::now().year())
    }

    pub fn score(&self, profile: &ApplicantProfile) -> ScoreResult {
        let (breakdown, raw_total) = rules::score_profile(profile, self.reference_year());
        let score = clamp_score(raw_total);

        ScoreResult {
            score,
            category: ScoreCategory::from_score(score),
            breakdown,
        }
    }
}

/// Score a profile against the current calendar year.
pub fn compute_score(profile: &ApplicantProfile) -> ScoreResult {
    ScoreEngine::new().score(profile)
}
