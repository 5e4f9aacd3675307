use clap::Args;
use eska::config::AppConfig;
use eska::error::AppError;
use eska::underwriting::scoring::load_submissions;
use eska::underwriting::{
    LoanCostInput, LoanCostResult, ProfileSubmission, QuoteRequest, ScoreEngine, ScoreReport,
    UnderwritingService,
};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// CSV export with one applicant per row (payload column names)
    #[arg(long, conflicts_with_all = ["monthly_income", "total_debts", "dob_year"])]
    pub(crate) csv: Option<PathBuf>,
    /// Measure ages against this year instead of the current one
    #[arg(long)]
    pub(crate) reference_year: Option<i32>,
    #[arg(long)]
    pub(crate) monthly_income: Option<String>,
    #[arg(long)]
    pub(crate) total_debts: Option<String>,
    #[arg(long)]
    pub(crate) seniority_years: Option<String>,
    #[arg(long)]
    pub(crate) seniority_months: Option<String>,
    #[arg(long)]
    pub(crate) dob_year: Option<String>,
    /// Secundaria, Técnica/Terciaria, Universitaria or Postgrado
    #[arg(long)]
    pub(crate) education_level: Option<String>,
    /// "Propia" counts as home ownership
    #[arg(long)]
    pub(crate) housing_type: Option<String>,
    /// "Sí" or "No"
    #[arg(long)]
    pub(crate) has_credit_card: Option<String>,
    /// "Sí" or "No"
    #[arg(long)]
    pub(crate) has_debts: Option<String>,
}

impl ScoreArgs {
    fn submission(&self) -> ProfileSubmission {
        ProfileSubmission {
            monthly_income: self.monthly_income.clone(),
            total_debts: self.total_debts.clone(),
            seniority_years: self.seniority_years.clone(),
            seniority_months: self.seniority_months.clone(),
            dob_year: self.dob_year.clone(),
            education_level: self.education_level.clone(),
            housing_type: self.housing_type.clone(),
            has_credit_card: self.has_credit_card.clone(),
            has_debts: self.has_debts.clone(),
            ..ProfileSubmission::default()
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// Loan principal
    #[arg(long)]
    pub(crate) principal: f64,
    /// Term in months
    #[arg(long)]
    pub(crate) term: u32,
    /// Annual rate A as a fraction (defaults to the platform rate)
    #[arg(long)]
    pub(crate) rate_a: Option<f64>,
    /// Annual rate B as a fraction (defaults to the bank rate)
    #[arg(long)]
    pub(crate) rate_b: Option<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Principal used for the savings quote
    #[arg(long, default_value_t = 1_000_000.0)]
    pub(crate) principal: f64,
    /// Term used for the savings quote
    #[arg(long, default_value_t = 24)]
    pub(crate) term: u32,
}

fn engine_for(reference_year: Option<i32>) -> ScoreEngine {
    reference_year.map(ScoreEngine::at_year).unwrap_or_default()
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = UnderwritingService::with_engine(engine_for(args.reference_year), config.market);

    let submissions = match &args.csv {
        Some(path) => load_submissions(BufReader::new(File::open(path)?))?,
        None => vec![args.submission()],
    };

    for (index, submission) in submissions.into_iter().enumerate() {
        if index > 0 {
            println!();
        }
        render_score_report(&service.score(submission));
    }

    Ok(())
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let input = LoanCostInput {
        principal: args.principal,
        term_months: args.term,
        annual_rate_a: args.rate_a.unwrap_or(config.market.platform_rate),
        annual_rate_b: args.rate_b.unwrap_or(config.market.bank_rate),
    };

    let service = UnderwritingService::new(config.market);
    let result = service.compare(&input)?;
    render_comparison(&input, &result);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = UnderwritingService::new(config.market);

    println!("Eska underwriting demo");
    println!("\nSample applicant");
    let report = service.score(sample_submission());
    render_score_report(&report);

    let quote = service.quote(QuoteRequest {
        principal: args.principal,
        term_months: args.term,
    })?;
    println!("\nSavings quote");
    println!(
        "  {:.0} over {} months: platform {:.0}% pays {:.2}/month, bank {:.0}% pays {:.2}/month",
        quote.principal,
        quote.term_months,
        quote.platform_rate * 100.0,
        quote.platform_monthly_payment,
        quote.bank_rate * 100.0,
        quote.bank_monthly_payment
    );
    println!(
        "  total {:.2} vs {:.2}; savings {:.2}",
        quote.platform_total_cost, quote.bank_total_cost, quote.savings
    );

    Ok(())
}

fn sample_submission() -> ProfileSubmission {
    ProfileSubmission {
        dob_year: Some("1996".to_string()),
        seniority_years: Some("1".to_string()),
        seniority_months: Some("4".to_string()),
        monthly_income: Some("780".to_string()),
        has_debts: Some("No".to_string()),
        total_debts: Some("0".to_string()),
        has_credit_card: Some("No".to_string()),
        housing_type: Some("Familiar".to_string()),
        education_level: Some("Técnica/Terciaria".to_string()),
        ..ProfileSubmission::default()
    }
}

fn render_score_report(report: &ScoreReport) {
    let result = &report.result;
    println!("Score {} ({})", result.score, result.category.label());
    for component in &result.breakdown {
        println!(
            "  {:<32} {:>5}  {}",
            component.factor.label(),
            component.points,
            component.detail
        );
    }
    println!("  outlook: {}", report.outlook.summary());
    println!("  asking rate: {:.0}%", report.asking_rate * 100.0);
}

fn render_comparison(input: &LoanCostInput, result: &LoanCostResult) {
    println!("Loan of {:.2} over {} months", input.principal, input.term_months);
    println!(
        "  rate A {:.2}%: {:.2}/month, {:.2} total",
        input.annual_rate_a * 100.0,
        result.monthly_payment_a,
        result.total_cost_a
    );
    println!(
        "  rate B {:.2}%: {:.2}/month, {:.2} total",
        input.annual_rate_b * 100.0,
        result.monthly_payment_b,
        result.total_cost_b
    );
    println!("  savings with rate A: {:.2}", result.savings);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_args_fill_only_given_answers() {
        let args = ScoreArgs {
            monthly_income: Some("1500".to_string()),
            has_credit_card: Some("Sí".to_string()),
            ..ScoreArgs::default()
        };

        let submission = args.submission();
        assert_eq!(submission.monthly_income.as_deref(), Some("1500"));
        assert_eq!(submission.has_credit_card.as_deref(), Some("Sí"));
        assert!(submission.dob_year.is_none());
        assert!(submission.score.is_none());
    }

    #[test]
    fn sample_applicant_has_thin_credit_file() {
        let service = UnderwritingService::with_engine(
            ScoreEngine::at_year(2026),
            eska::config::MarketConfig::default(),
        );

        let report = service.score(sample_submission());

        // 500 + 50 + 100 + 80 + 50 + 40 + 0 - 110
        assert_eq!(report.result.score, 710);
        assert_eq!(report.result.breakdown.len(), 7);
        assert_eq!(report.asking_rate, 0.12);
    }

    #[test]
    fn engine_pins_reference_year_when_given() {
        assert_eq!(engine_for(Some(2020)).reference_year(), 2020);
    }
}
