use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::lending::{
    current_best_rate, rate_for_score, resolve_bidding, validate_bid, Bid, BidError,
    BidResolution, BidTarget, LoanCostError, LoanCostEstimator, LoanCostInput, LoanCostResult,
};
use super::scoring::{MarketOutlook, ProfileSubmission, ScoreEngine, ScoreResult};
use crate::config::MarketConfig;

/// Score, market outlook, and the submission payload ready for the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub result: ScoreResult,
    pub outlook: MarketOutlook,
    /// Rate a loan request from this applicant would ask for.
    pub asking_rate: f64,
    pub submission: ProfileSubmission,
}

/// Request for a platform-versus-bank savings estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub principal: f64,
    pub term_months: u32,
}

/// Savings of the configured platform rate over the configured bank rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsQuote {
    pub principal: f64,
    pub term_months: u32,
    pub platform_rate: f64,
    pub bank_rate: f64,
    pub platform_monthly_payment: f64,
    pub bank_monthly_payment: f64,
    pub platform_total_cost: f64,
    pub bank_total_cost: f64,
    pub savings: f64,
}

impl SavingsQuote {
    fn from_comparison(
        request: QuoteRequest,
        market: &MarketConfig,
        cost: LoanCostResult,
    ) -> Self {
        Self {
            principal: request.principal,
            term_months: request.term_months,
            platform_rate: market.platform_rate,
            bank_rate: market.bank_rate,
            platform_monthly_payment: cost.monthly_payment_a,
            bank_monthly_payment: cost.monthly_payment_b,
            platform_total_cost: cost.total_cost_a,
            bank_total_cost: cost.total_cost_b,
            savings: cost.savings,
        }
    }
}

/// A lender's proposed rate against the bids already on a loan or pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidProposal {
    pub target: BidTarget,
    #[serde(default)]
    pub bids: Vec<Bid>,
    pub annual_rate: f64,
}

/// Accepted bid together with the rate it undercut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BidCheck {
    pub annual_rate: f64,
    pub previous_best: Option<f64>,
}

/// Service composing the score engine, the cost estimator, and market settings.
#[derive(Debug, Clone)]
pub struct UnderwritingService {
    engine: ScoreEngine,
    estimator: LoanCostEstimator,
    market: MarketConfig,
}

impl UnderwritingService {
    pub fn new(market: MarketConfig) -> Self {
        Self::with_engine(ScoreEngine::new(), market)
    }

    pub fn with_engine(engine: ScoreEngine, market: MarketConfig) -> Self {
        Self {
            engine,
            estimator: LoanCostEstimator::new(),
            market,
        }
    }

    pub fn market(&self) -> &MarketConfig {
        &self.market
    }

    /// Score a raw submission and stamp the result onto the outbound payload.
    pub fn score(&self, submission: ProfileSubmission) -> ScoreReport {
        let profile = submission.to_profile();
        let result = self.engine.score(&profile);
        let outlook = MarketOutlook::for_score(result.score);
        let asking_rate = self.asking_rate(Some(result.score));

        debug!(
            score = result.score,
            category = result.category.label(),
            factors = result.breakdown.len(),
            "profile scored"
        );

        let submission = submission.with_score(&result);
        ScoreReport {
            result,
            outlook,
            asking_rate,
            submission,
        }
    }

    pub fn compare(&self, input: &LoanCostInput) -> Result<LoanCostResult, LoanCostError> {
        self.estimator.compare(input).inspect_err(|error| {
            warn!(
                %error,
                principal = input.principal,
                term = input.term_months,
                "comparison rejected"
            );
        })
    }

    /// Quote only the terms the marketplace offers.
    pub fn quote(&self, request: QuoteRequest) -> Result<SavingsQuote, LoanCostError> {
        if !self.market.offers_term(request.term_months) {
            warn!(term = request.term_months, "quote requested for unsupported term");
            return Err(LoanCostError::UnsupportedTerm(
                request.term_months,
                self.market.terms.clone(),
            ));
        }

        let cost = self.compare(&LoanCostInput {
            principal: request.principal,
            term_months: request.term_months,
            annual_rate_a: self.market.platform_rate,
            annual_rate_b: self.market.bank_rate,
        })?;

        debug!(savings = cost.savings, "savings quote computed");
        Ok(SavingsQuote::from_comparison(request, &self.market, cost))
    }

    pub fn resolve_bids(&self, bids: &[Bid]) -> BidResolution {
        let resolution = resolve_bidding(bids);
        debug!(bids = bids.len(), outcome = %resolution.summary(), "bidding resolved");
        resolution
    }

    /// Asking rate for a new loan request from the borrower's latest score.
    pub fn asking_rate(&self, score: Option<u16>) -> f64 {
        rate_for_score(score)
    }

    pub fn check_bid(&self, proposal: &BidProposal) -> Result<BidCheck, BidError> {
        let previous_best = current_best_rate(proposal.target, &proposal.bids);
        validate_bid(proposal.target, &proposal.bids, proposal.annual_rate).inspect_err(
            |error| {
                warn!(%error, bids = proposal.bids.len(), "bid rejected");
            },
        )?;

        Ok(BidCheck {
            annual_rate: proposal.annual_rate,
            previous_best,
        })
    }
}
