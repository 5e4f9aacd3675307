use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::config::MarketConfig;
use crate::underwriting::scoring::{ApplicantProfile, EducationLevel, ProfileSubmission};
use crate::underwriting::{underwriting_router, ScoreEngine, UnderwritingService};

pub(super) const REFERENCE_YEAR: i32 = 2024;

pub(super) fn engine() -> ScoreEngine {
    ScoreEngine::at_year(REFERENCE_YEAR)
}

/// Salaried homeowner with a card, born 1990.
pub(super) fn established_profile() -> ApplicantProfile {
    ApplicantProfile {
        monthly_income: 1500.0,
        total_monthly_debts: 0.0,
        seniority_years: 2,
        seniority_months: 0,
        birth_year: Some(1990),
        education_level: EducationLevel::Universitaria,
        owns_home: true,
        has_credit_card: true,
        has_debts: false,
    }
}

pub(super) fn thin_file_profile() -> ApplicantProfile {
    ApplicantProfile::default()
}

pub(super) fn submission() -> ProfileSubmission {
    ProfileSubmission {
        dob_day: Some("14".to_string()),
        dob_month: Some("3".to_string()),
        dob_year: Some("1990".to_string()),
        gender: Some("Femenino".to_string()),
        country: Some("Chile".to_string()),
        city: Some("Santiago".to_string()),
        work_situation: Some("Dependiente".to_string()),
        employer: Some("Comercial Andes".to_string()),
        seniority_years: Some("2".to_string()),
        seniority_months: Some("0".to_string()),
        monthly_income: Some("1500".to_string()),
        has_debts: Some("No".to_string()),
        total_debts: Some("0".to_string()),
        has_credit_card: Some("Sí".to_string()),
        housing_type: Some("Propia".to_string()),
        education_level: Some("Universitaria".to_string()),
        profession: Some("Contadora".to_string()),
        document_type: Some("RUT".to_string()),
        document_number: Some("12.345.678-5".to_string()),
        score: None,
        score_category: None,
    }
}

pub(super) fn service() -> Arc<UnderwritingService> {
    Arc::new(UnderwritingService::with_engine(engine(), MarketConfig::default()))
}

pub(super) fn router() -> axum::Router {
    underwriting_router(service())
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("response is json")
}
