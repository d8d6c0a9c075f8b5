use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

use super::domain::AdvisoryRequest;
use super::generator::AdviceGenerator;
use super::service::{AdvisorReply, AdvisoryService};
use super::AdvisoryResult;
use crate::error::AppError;

/// Router builder exposing the advisor chat and dashboard evaluation.
pub fn advisory_router<G>(service: Arc<AdvisoryService<G>>) -> Router
where
    G: AdviceGenerator + 'static,
{
    Router::new()
        .route("/api/v1/advisor", post(advisor_handler::<G>))
        .route("/api/v1/advisor/rules", post(rules_handler::<G>))
        .route("/api/v1/advisor/evaluate", post(evaluate_handler::<G>))
        .with_state(service)
}

pub(crate) async fn advisor_handler<G>(
    State(service): State<Arc<AdvisoryService<G>>>,
    payload: Result<Json<AdvisoryRequest>, JsonRejection>,
) -> Result<Json<AdvisorReply>, AppError>
where
    G: AdviceGenerator + 'static,
{
    let Json(request) = payload?;
    let reply = service.consult(&request).await?;
    Ok(Json(reply))
}

pub(crate) async fn rules_handler<G>(
    State(service): State<Arc<AdvisoryService<G>>>,
    payload: Result<Json<AdvisoryRequest>, JsonRejection>,
) -> Result<Json<AdvisorReply>, AppError>
where
    G: AdviceGenerator + 'static,
{
    let Json(request) = payload?;
    Ok(Json(service.consult_rules(&request)?))
}

pub(crate) async fn evaluate_handler<G>(
    State(service): State<Arc<AdvisoryService<G>>>,
    payload: Result<Json<AdvisoryRequest>, JsonRejection>,
) -> Result<Json<AdvisoryResult>, AppError>
where
    G: AdviceGenerator + 'static,
{
    let Json(request) = payload?;
    Ok(Json(service.evaluate(&request)?))
}
