use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::lending::{Bid, LoanCostInput};
use super::scoring::ProfileSubmission;
use super::service::{BidProposal, QuoteRequest, UnderwritingService};

/// Router builder exposing the scoring and loan-cost endpoints.
pub fn underwriting_router(service: Arc<UnderwritingService>) -> Router {
    Router::new()
        .route("/api/v1/scores", post(score_handler))
        .route("/api/v1/loan-cost/compare", post(compare_handler))
        .route("/api/v1/loan-cost/quote", post(quote_handler))
        .route("/api/v1/bids/winner", post(bid_winner_handler))
        .route("/api/v1/bids/validate", post(bid_validate_handler))
        .with_state(service)
}

pub(crate) async fn score_handler(
    State(service): State<Arc<UnderwritingService>>,
    axum::Json(submission): axum::Json<ProfileSubmission>,
) -> Response {
    let report = service.score(submission);
    (StatusCode::OK, axum::Json(report)).into_response()
}

pub(crate) async fn compare_handler(
    State(service): State<Arc<UnderwritingService>>,
    axum::Json(input): axum::Json<LoanCostInput>,
) -> Response {
    match service.compare(&input) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => rejection(error),
    }
}

pub(crate) async fn quote_handler(
    State(service): State<Arc<UnderwritingService>>,
    axum::Json(request): axum::Json<QuoteRequest>,
) -> Response {
    match service.quote(request) {
        Ok(quote) => (StatusCode::OK, axum::Json(quote)).into_response(),
        Err(error) => rejection(error),
    }
}

pub(crate) async fn bid_winner_handler(
    State(service): State<Arc<UnderwritingService>>,
    axum::Json(bids): axum::Json<Vec<Bid>>,
) -> Response {
    let resolution = service.resolve_bids(&bids);
    (StatusCode::OK, axum::Json(resolution)).into_response()
}

pub(crate) async fn bid_validate_handler(
    State(service): State<Arc<UnderwritingService>>,
    axum::Json(proposal): axum::Json<BidProposal>,
) -> Response {
    match service.check_bid(&proposal) {
        Ok(check) => (StatusCode::OK, axum::Json(check)).into_response(),
        Err(error) => rejection(error),
    }
}

fn rejection(error: impl std::error::Error) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}
