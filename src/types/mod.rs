//! Public types for the iris-classifier API.

mod health;
mod input;
mod metadata;
mod prediction;

pub use health::{HealthResponse, HealthStatus, ModelInfo};
pub use input::{
    BatchPredictionInput, FEATURE_COUNT, Features, MAX_MEASUREMENT, MIN_MEASUREMENT,
    PredictionInput, Validate,
};
pub use metadata::ModelMetadata;
pub use prediction::{BatchPredictionOutput, Prediction};
