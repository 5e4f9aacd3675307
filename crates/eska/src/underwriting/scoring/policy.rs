use serde::{Deserialize, Serialize};

use super::domain::{ScoreCategory, MAX_SCORE, MIN_SCORE};

/// Upper (exclusive) score bound for each category, lowest first.
const CATEGORY_THRESHOLDS: [(u16, ScoreCategory); 4] = [
    (500, ScoreCategory::HighRisk),
    (600, ScoreCategory::Fair),
    (700, ScoreCategory::Good),
    (800, ScoreCategory::VeryGood),
];

/// Scores at or above this line qualify for a traditional bank loan.
pub const BANK_ELIGIBILITY_SCORE: u16 = 700;
/// Traditional bureaus rate the same applicant lower than the platform does.
const BANK_SCORE_FACTOR: f64 = 0.8;
/// Rate charged by informal lenders to applicants banks turn away.
const INFORMAL_LENDER_RATE: f64 = 0.55;

pub(crate) fn clamp_score(raw: i32) -> u16 {
    raw.clamp(i32::from(MIN_SCORE), i32::from(MAX_SCORE)) as u16
}

impl ScoreCategory {
    /// Category thresholds are inclusive on their lower edge.
    pub fn from_score(score: u16) -> Self {
        CATEGORY_THRESHOLDS
            .iter()
            .find(|(upper, _)| score < *upper)
            .map(|(_, category)| *category)
            .unwrap_or(ScoreCategory::Excellent)
    }
}

/// Annual rate range shown to an applicant, as fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateRange {
    pub min: f64,
    pub max: f64,
}

impl RateRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn label(&self) -> String {
        format!("{:.0}-{:.0}%", self.min * 100.0, self.max * 100.0)
    }
}

/// How the applicant's score plays out across the lending market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOutlook {
    pub bank_eligible: bool,
    /// Score a traditional bureau would likely assign.
    pub simulated_bank_score: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_rate: Option<RateRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub informal_lender_rate: Option<f64>,
    pub platform_rate: RateRange,
}

impl MarketOutlook {
    pub fn for_score(score: u16) -> Self {
        let bank_eligible = score >= BANK_ELIGIBILITY_SCORE;
        let simulated = (f64::from(score) * BANK_SCORE_FACTOR).round() as u16;
        let simulated_bank_score = simulated.max(MIN_SCORE);

        if bank_eligible {
            Self {
                bank_eligible,
                simulated_bank_score,
                bank_rate: Some(RateRange::new(0.15, 0.25)),
                informal_lender_rate: None,
                platform_rate: RateRange::new(0.10, 0.15),
            }
        } else {
            Self {
                bank_eligible,
                simulated_bank_score,
                bank_rate: None,
                informal_lender_rate: Some(INFORMAL_LENDER_RATE),
                platform_rate: RateRange::new(0.12, 0.18),
            }
        }
    }

    pub fn summary(&self) -> String {
        if self.bank_eligible {
            format!(
                "bank eligible at {}; platform offers {}",
                self.bank_rate
                    .map(|range| range.label())
                    .unwrap_or_default(),
                self.platform_rate.label()
            )
        } else {
            format!(
                "not bank eligible (bureau score {}); informal lenders charge {:.0}%, platform offers {}",
                self.simulated_bank_score,
                self.informal_lender_rate.unwrap_or_default() * 100.0,
                self.platform_rate.label()
            )
        }
    }
}
