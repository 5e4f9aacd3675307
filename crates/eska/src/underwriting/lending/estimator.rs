use serde::{Deserialize, Serialize};

/// Identifies which side of a comparison an invalid rate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSide {
    A,
    B,
}

/// Inputs rejected by the estimator instead of producing `NaN` or infinities.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoanCostError {
    #[error("principal must be a positive amount (found {0})")]
    InvalidPrincipal(f64),
    #[error("term must be at least one month")]
    InvalidTerm,
    #[error("annual rate {side:?} must be a non-negative fraction (found {value})")]
    InvalidRate { side: RateSide, value: f64 },
    #[error("term of {0} months is not offered (choose one of {1:?})")]
    UnsupportedTerm(u32, Vec<u32>),
}

/// Loan parameters for a side-by-side cost comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanCostInput {
    pub principal: f64,
    pub term_months: u32,
    pub annual_rate_a: f64,
    pub annual_rate_b: f64,
}

/// Fixed monthly payments and total repayment for both rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanCostResult {
    pub monthly_payment_a: f64,
    pub monthly_payment_b: f64,
    pub total_cost_a: f64,
    pub total_cost_b: f64,
    /// `total_cost_b - total_cost_a`; positive when rate A is cheaper.
    pub savings: f64,
}

/// Fixed-rate, fixed-term amortization calculator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoanCostEstimator;

impl LoanCostEstimator {
    pub fn new() -> Self {
        Self
    }

    pub fn compare(&self, input: &LoanCostInput) -> Result<LoanCostResult, LoanCostError> {
        validate_loan(input.principal, input.term_months)?;
        validate_rate(RateSide::A, input.annual_rate_a)?;
        validate_rate(RateSide::B, input.annual_rate_b)?;

        let monthly_payment_a =
            amortized_payment(input.principal, input.term_months, input.annual_rate_a);
        let monthly_payment_b =
            amortized_payment(input.principal, input.term_months, input.annual_rate_b);
        let term = f64::from(input.term_months);
        let total_cost_a = monthly_payment_a * term;
        let total_cost_b = monthly_payment_b * term;

        Ok(LoanCostResult {
            monthly_payment_a,
            monthly_payment_b,
            total_cost_a,
            total_cost_b,
            savings: total_cost_b - total_cost_a,
        })
    }
}

/// Fixed monthly installment for a single rate.
pub fn monthly_payment(
    principal: f64,
    term_months: u32,
    annual_rate: f64,
) -> Result<f64, LoanCostError> {
    validate_loan(principal, term_months)?;
    validate_rate(RateSide::A, annual_rate)?;
    Ok(amortized_payment(principal, term_months, annual_rate))
}

/// Compare the cost of the same loan at two annual rates.
pub fn compare_loan_cost(
    principal: f64,
    term_months: u32,
    annual_rate_a: f64,
    annual_rate_b: f64,
) -> Result<LoanCostResult, LoanCostError> {
    LoanCostEstimator::new().compare(&LoanCostInput {
        principal,
        term_months,
        annual_rate_a,
        annual_rate_b,
    })
}

fn validate_loan(principal: f64, term_months: u32) -> Result<(), LoanCostError> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(LoanCostError::InvalidPrincipal(principal));
    }
    if term_months == 0 {
        return Err(LoanCostError::InvalidTerm);
    }
    Ok(())
}

fn validate_rate(side: RateSide, value: f64) -> Result<(), LoanCostError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LoanCostError::InvalidRate { side, value })
    }
}

/// Inputs must already be validated. A zero rate repays the principal linearly.
///
/// `1 - (1 + r)^-n` is evaluated through `ln_1p`/`exp_m1` so rates too small
/// to move `1 + r` off one still yield a finite installment.
fn amortized_payment(principal: f64, term_months: u32, annual_rate: f64) -> f64 {
    let term = f64::from(term_months);
    let monthly_rate = annual_rate / 12.0;
    if monthly_rate == 0.0 {
        return principal / term;
    }

    let discount = -(-term * monthly_rate.ln_1p()).exp_m1();
    if discount == 0.0 || !discount.is_finite() {
        return principal / term;
    }
    principal * monthly_rate / discount
}
