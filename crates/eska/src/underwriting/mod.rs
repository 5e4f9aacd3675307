//! Applicant scoring, loan-cost estimation, and bid resolution.
//!
//! Both engines are pure: they take a fully formed input and return a value,
//! so the service and router layers share them behind an `Arc` without locks.

pub mod lending;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use lending::{
    compare_loan_cost, monthly_payment, rate_for_score, resolve_bidding, select_winning_bid,
    validate_bid, Bid, BidError, BidResolution, BidTarget, LoanCostError, LoanCostEstimator,
    LoanCostInput, LoanCostResult,
};
pub use router::underwriting_router;
pub use scoring::{
    compute_score, ApplicantProfile, MarketOutlook, ProfileSubmission, ScoreCategory,
    ScoreEngine, ScoreResult,
};
pub use service::{
    BidCheck, BidProposal, QuoteRequest, SavingsQuote, ScoreReport, UnderwritingService,
};
