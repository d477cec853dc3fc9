use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Form, Json, Router,
};

use super::batch::BatchScorer;
use super::features::ApplicantRecord;
use super::pipeline::{LoanApprovalPipeline, LoanAssessment, ModelInfo};
use crate::error::AppError;

/// Router builder exposing the prediction endpoints over a shared pipeline.
pub fn prediction_router(pipeline: Arc<LoanApprovalPipeline>) -> Router {
    Router::new()
        .route("/api/v1/loan/predict", post(predict_json_handler))
        .route("/api/v1/loan/batch", post(batch_handler))
        .route("/api/v1/model", get(model_info_handler))
        .route("/predict", post(predict_form_handler))
        .with_state(pipeline)
}

pub(crate) async fn predict_json_handler(
    State(pipeline): State<Arc<LoanApprovalPipeline>>,
    Json(record): Json<ApplicantRecord>,
) -> Result<Json<LoanAssessment>, AppError> {
    Ok(Json(pipeline.assess(record)?))
}

pub(crate) async fn predict_form_handler(
    State(pipeline): State<Arc<LoanApprovalPipeline>>,
    Form(record): Form<ApplicantRecord>,
) -> Result<Json<LoanAssessment>, AppError> {
    Ok(Json(pipeline.assess(record)?))
}

pub(crate) async fn batch_handler(
    State(pipeline): State<Arc<LoanApprovalPipeline>>,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    let mut scored = Vec::new();
    BatchScorer::new(&pipeline).score_reader(body.as_bytes(), &mut scored)?;

    Ok((
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        String::from_utf8_lossy(&scored).into_owned(),
    ))
}

pub(crate) async fn model_info_handler(
    State(pipeline): State<Arc<LoanApprovalPipeline>>,
) -> Json<ModelInfo> {
    Json(pipeline.info())
}
