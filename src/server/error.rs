//! HTTP error responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::IrisError;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Stable machine-readable kind, e.g. `invalid_input`.
    pub error: String,
    /// Human-readable detail, including the underlying error text.
    pub message: String,
}

/// An error that has been mapped to a status code and public kind.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl From<IrisError> for ApiError {
    fn from(err: IrisError) -> Self {
        let (status, code) = match &err {
            IrisError::InvalidInput(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_input"),
            IrisError::NotLoaded => (StatusCode::SERVICE_UNAVAILABLE, "model_not_loaded"),
            IrisError::Inference(_) => (StatusCode::INTERNAL_SERVER_ERROR, "inference_failed"),
            IrisError::ModelNotFound(_) | IrisError::Artifact(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "artifact_error")
            }
            IrisError::Training(_)
            | IrisError::Io(_)
            | IrisError::Json(_)
            | IrisError::Configuration(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };
        Self::new(status, code, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        // serde_json reports literals beyond f64 (e.g. 1e400) as syntax errors
        let status = match &rejection {
            JsonRejection::JsonSyntaxError(_) if message.contains("number out of range") => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => rejection.status(),
        };
        Self::new(status, "invalid_input", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = self.code, message = %self.message, "request failed");
        } else {
            tracing::warn!(code = self.code, message = %self.message, "request rejected");
        }
        let body = ErrorBody {
            error: self.code.to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
