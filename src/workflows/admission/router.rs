use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::catalog::CatalogRepository;
use super::domain::ApplicantSubmission;
use super::recorder::{DecisionId, DecisionRecorder, RecorderError};
use super::service::{AdmissionService, AdmissionServiceError};

/// Router builder exposing HTTP endpoints for admission decisions.
pub fn admission_router<C, R>(service: Arc<AdmissionService<C, R>>) -> Router
where
    C: CatalogRepository + 'static,
    R: DecisionRecorder + 'static,
{
    Router::new()
        .route("/api/v1/admissions/decisions", post(decide_handler::<C, R>))
        .route(
            "/api/v1/admissions/decisions/:decision_id",
            get(decision_handler::<C, R>),
        )
        .with_state(service)
}

pub(crate) async fn decide_handler<C, R>(
    State(service): State<Arc<AdmissionService<C, R>>>,
    axum::Json(submission): axum::Json<ApplicantSubmission>,
) -> Response
where
    C: CatalogRepository + 'static,
    R: DecisionRecorder + 'static,
{
    match service.decide(submission) {
        Ok(recorded) => {
            let view = recorded.view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(AdmissionServiceError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn decision_handler<C, R>(
    State(service): State<Arc<AdmissionService<C, R>>>,
    Path(decision_id): Path<String>,
) -> Response
where
    C: CatalogRepository + 'static,
    R: DecisionRecorder + 'static,
{
    let id = DecisionId(decision_id);
    match service.get(&id) {
        Ok(recorded) => {
            let view = recorded.view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(AdmissionServiceError::Recorder(RecorderError::NotFound)) => {
            let payload = json!({
                "error": "decision not found",
                "decision_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
