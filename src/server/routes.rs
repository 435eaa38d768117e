//! HTTP handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use super::error::{ApiError, ErrorBody};
use super::extract::ValidatedJson;
use crate::model::ModelService;
use crate::types::{
    BatchPredictionInput, BatchPredictionOutput, HealthResponse, Prediction, PredictionInput,
};

/// Shared handler state.
pub type AppState = Arc<ModelService>;

/// Static service banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Banner {
    pub message: String,
    pub status: String,
    pub health: String,
    pub docs: String,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses(
        (status = 200, description = "Service banner", body = Banner)
    )
)]
#[tracing::instrument(name = "GET /")]
pub async fn root() -> Json<Banner> {
    Json(Banner {
        message: "Iris Classification API".to_string(),
        status: "running".to_string(),
        health: "/health".to_string(),
        docs: super::DOCS_PATH.to_string(),
        version: crate::version_string(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "service",
    responses(
        (status = 200, description = "Model load state and metadata", body = HealthResponse)
    )
)]
#[tracing::instrument(name = "GET /health", skip(service))]
pub async fn health(State(service): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::new(service.is_loaded(), service.metadata()))
}

#[utoipa::path(
    post,
    path = "/predict",
    tag = "prediction",
    request_body = PredictionInput,
    responses(
        (status = 200, description = "Predicted species", body = Prediction),
        (status = 422, description = "Measurement missing or outside [0, 10]", body = ErrorBody),
        (status = 503, description = "Model not loaded", body = ErrorBody),
        (status = 500, description = "Inference failed", body = ErrorBody)
    )
)]
#[tracing::instrument(name = "POST /predict", skip(service, input))]
pub async fn predict(
    State(service): State<AppState>,
    ValidatedJson(input): ValidatedJson<PredictionInput>,
) -> Result<Json<Prediction>, ApiError> {
    let features = input.features();
    info!(?features, "Predicting");

    let prediction = service.predict(&features)?;

    info!(
        predicted_class = %prediction.predicted_class,
        confidence = prediction.confidence,
        "Prediction complete"
    );
    Ok(Json(prediction))
}

#[utoipa::path(
    post,
    path = "/predict/batch",
    tag = "prediction",
    request_body = BatchPredictionInput,
    responses(
        (status = 200, description = "Predicted species in request order", body = BatchPredictionOutput),
        (status = 422, description = "An instance is missing a measurement or out of range", body = ErrorBody),
        (status = 503, description = "Model not loaded", body = ErrorBody),
        (status = 500, description = "Inference failed for an instance", body = ErrorBody)
    )
)]
#[tracing::instrument(name = "POST /predict/batch", skip(service, input))]
pub async fn predict_batch(
    State(service): State<AppState>,
    ValidatedJson(input): ValidatedJson<BatchPredictionInput>,
) -> Result<Json<BatchPredictionOutput>, ApiError> {
    let batch = input.features();
    info!(instances = batch.len(), "Batch prediction");

    let predictions = service.predict_batch(&batch)?;

    Ok(Json(BatchPredictionOutput { predictions }))
}
