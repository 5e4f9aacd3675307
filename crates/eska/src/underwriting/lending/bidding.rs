use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A lender's offer to fund a loan or pool at a given annual rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub bid_id: u64,
    pub lender_id: String,
    pub annual_rate: f64,
    pub created_at: DateTime<Utc>,
}

/// Outcome of closing bidding on a loan or pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BidResolution {
    Funded { winning_bid: Bid },
    /// No usable bids were placed.
    Closed,
}

impl BidResolution {
    pub fn summary(&self) -> String {
        match self {
            BidResolution::Funded { winning_bid } => format!(
                "funded at {:.2}% by lender {}",
                winning_bid.annual_rate * 100.0,
                winning_bid.lender_id
            ),
            BidResolution::Closed => "closed without bids".to_string(),
        }
    }
}

/// Lowest rate wins; equal rates go to whoever bid first, then to the lower id.
///
/// Bids with a negative or non-finite rate are ignored.
pub fn select_winning_bid(bids: &[Bid]) -> Option<&Bid> {
    bids.iter()
        .filter(|bid| bid.annual_rate.is_finite() && bid.annual_rate >= 0.0)
        .min_by(|left, right| {
            left.annual_rate
                .partial_cmp(&right.annual_rate)
                .unwrap_or(Ordering::Equal)
                .then_with(|| left.created_at.cmp(&right.created_at))
                .then_with(|| left.bid_id.cmp(&right.bid_id))
        })
}

pub fn resolve_bidding(bids: &[Bid]) -> BidResolution {
    match select_winning_bid(bids) {
        Some(bid) => BidResolution::Funded {
            winning_bid: bid.clone(),
        },
        None => BidResolution::Closed,
    }
}

/// Score assumed for borrowers whose profile has not been scored yet.
pub const UNSCORED_BORROWER_SCORE: u16 = 500;

/// Minimum score (inclusive) for each asking-rate tier, best tier first.
const RATE_TIERS: [(u16, f64); 2] = [(700, 0.12), (600, 0.18)];
const FALLBACK_RATE: f64 = 0.25;

/// Annual rate a new loan request asks for, given the borrower's score.
pub fn rate_for_score(score: Option<u16>) -> f64 {
    let score = score.unwrap_or(UNSCORED_BORROWER_SCORE);
    RATE_TIERS
        .iter()
        .find(|(floor, _)| score >= *floor)
        .map(|(_, rate)| *rate)
        .unwrap_or(FALLBACK_RATE)
}

/// What a lender is bidding on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BidTarget {
    /// A single request; its asking rate caps the first bid.
    Loan { asking_rate: f64 },
    /// A pool of requests; the first bid is uncapped.
    Pool,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BidError {
    #[error("bid rate must be a non-negative fraction (found {0})")]
    InvalidRate(f64),
    #[error("bid rate {offered} must be below the current best rate {best}")]
    NotBelowBest { offered: f64, best: f64 },
}

/// Rate a new bid has to undercut, if any.
pub fn current_best_rate(target: BidTarget, bids: &[Bid]) -> Option<f64> {
    select_winning_bid(bids)
        .map(|bid| bid.annual_rate)
        .or(match target {
            BidTarget::Loan { asking_rate } => Some(asking_rate),
            BidTarget::Pool => None,
        })
}

/// Accept a bid only when it is strictly below the current best rate.
pub fn validate_bid(target: BidTarget, bids: &[Bid], annual_rate: f64) -> Result<(), BidError> {
    if !annual_rate.is_finite() || annual_rate < 0.0 {
        return Err(BidError::InvalidRate(annual_rate));
    }

    match current_best_rate(target, bids) {
        Some(best) if annual_rate >= best => Err(BidError::NotBelowBest {
            offered: annual_rate,
            best,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bid(bid_id: u64, lender: &str, rate: f64, minute: u32) -> Bid {
        Bid {
            bid_id,
            lender_id: lender.to_string(),
            annual_rate: rate,
            created_at: Utc
                .with_ymd_and_hms(2025, 3, 1, 12, minute, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[test]
    fn lowest_rate_wins() {
        let bids = vec![
            bid(1, "lender-a", 0.18, 0),
            bid(2, "lender-b", 0.12, 5),
            bid(3, "lender-c", 0.14, 1),
        ];

        let winner = select_winning_bid(&bids).expect("winner");
        assert_eq!(winner.lender_id, "lender-b");
    }

    #[test]
    fn ties_go_to_earliest_bid() {
        let bids = vec![bid(7, "late", 0.12, 30), bid(9, "early", 0.12, 10)];

        let winner = select_winning_bid(&bids).expect("winner");
        assert_eq!(winner.lender_id, "early");
    }

    #[test]
    fn no_bids_closes_the_pool() {
        assert_eq!(resolve_bidding(&[]), BidResolution::Closed);
        assert_eq!(
            resolve_bidding(&[bid(1, "broken", f64::NAN, 0)]),
            BidResolution::Closed
        );
    }

    #[test]
    fn asking_rate_follows_score_tiers() {
        assert_eq!(rate_for_score(Some(850)), 0.12);
        assert_eq!(rate_for_score(Some(700)), 0.12);
        assert_eq!(rate_for_score(Some(699)), 0.18);
        assert_eq!(rate_for_score(Some(600)), 0.18);
        assert_eq!(rate_for_score(Some(599)), 0.25);
        assert_eq!(rate_for_score(None), 0.25);
    }

    #[test]
    fn first_loan_bid_must_undercut_asking_rate() {
        let loan = BidTarget::Loan { asking_rate: 0.18 };

        assert_eq!(validate_bid(loan, &[], 0.17), Ok(()));
        assert_eq!(
            validate_bid(loan, &[], 0.18),
            Err(BidError::NotBelowBest {
                offered: 0.18,
                best: 0.18
            })
        );
    }

    #[test]
    fn later_bids_must_undercut_the_best_bid() {
        let bids = vec![bid(1, "lender-a", 0.16, 0), bid(2, "lender-b", 0.14, 5)];
        let loan = BidTarget::Loan { asking_rate: 0.25 };

        assert_eq!(current_best_rate(loan, &bids), Some(0.14));
        assert!(validate_bid(loan, &bids, 0.15).is_err());
        assert_eq!(validate_bid(BidTarget::Pool, &bids, 0.139), Ok(()));
    }

    #[test]
    fn empty_pool_accepts_any_valid_rate() {
        assert_eq!(current_best_rate(BidTarget::Pool, &[]), None);
        assert_eq!(validate_bid(BidTarget::Pool, &[], 0.9), Ok(()));
        assert_eq!(
            validate_bid(BidTarget::Pool, &[], -0.01),
            Err(BidError::InvalidRate(-0.01))
        );
        assert!(matches!(
            validate_bid(BidTarget::Pool, &[], f64::NAN),
            Err(BidError::InvalidRate(_))
        ));
    }

    #[test]
    fn funded_summary_reports_rate() {
        let resolution = resolve_bidding(&[bid(1, "lender-a", 0.125, 0)]);
        assert_eq!(resolution.summary(), "funded at 12.50% by lender lender-a");
    }
}
