//! OpenAPI document for the prediction API.

use utoipa::OpenApi;

use super::error::ErrorBody;
use super::routes::Banner;
use crate::types::{
    BatchPredictionInput, BatchPredictionOutput, HealthResponse, HealthStatus, ModelInfo,
    Prediction, PredictionInput,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Iris Classification API",
        description = "Classify iris flowers into species from four measurements in centimetres."
    ),
    tags(
        (name = "service", description = "Banner and health endpoints"),
        (name = "prediction", description = "Single and batch classification")
    ),
    paths(
        super::routes::root,
        super::routes::health,
        super::routes::predict,
        super::routes::predict_batch,
    ),
    components(schemas(
        Banner,
        ErrorBody,
        HealthResponse,
        HealthStatus,
        ModelInfo,
        PredictionInput,
        BatchPredictionInput,
        Prediction,
        BatchPredictionOutput,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/health", "/predict", "/predict/batch"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn document_version_follows_package() {
        assert_eq!(ApiDoc::openapi().info.version, crate::PKG_VERSION);
    }
}
