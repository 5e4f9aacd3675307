mod bidding;
mod estimator;

pub use bidding::{
    current_best_rate, rate_for_score, resolve_bidding, select_winning_bid, validate_bid, Bid,
    BidError, BidResolution, BidTarget, UNSCORED_BORROWER_SCORE,
};
pub use estimator::{
    compare_loan_cost, monthly_payment, LoanCostError, LoanCostEstimator, LoanCostInput,
    LoanCostResult, RateSide,
};
