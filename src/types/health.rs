//! Service status types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ModelMetadata;

/// Overall service health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Summary of the loaded model, echoed from its metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ModelInfo {
    /// Recorded training accuracy, `null` when unknown.
    pub accuracy: Option<f64>,
    pub features: Vec<String>,
    pub classes: Vec<String>,
    pub n_features: usize,
}

impl From<&ModelMetadata> for ModelInfo {
    fn from(metadata: &ModelMetadata) -> Self {
        Self {
            accuracy: metadata.accuracy,
            features: metadata.feature_names.clone(),
            classes: metadata.target_names.clone(),
            n_features: metadata.n_features,
        }
    }
}

/// Response of the health endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub model_loaded: bool,
    pub model_info: ModelInfo,
}

impl HealthResponse {
    /// Build a health report; the service is healthy exactly when a model is loaded.
    pub fn new(model_loaded: bool, metadata: &ModelMetadata) -> Self {
        Self {
            status: if model_loaded {
                HealthStatus::Healthy
            } else {
                HealthStatus::Unhealthy
            },
            model_loaded,
            model_info: metadata.into(),
        }
    }
}
