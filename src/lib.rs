//! iris-classifier - iris species classification over JSON/HTTP
//!
//! This crate trains a bootstrap-aggregated decision tree forest on the
//! bundled iris dataset, persists it as a pair of artifacts, and serves
//! predictions from a [`ModelService`] that is loaded once at startup and
//! shared read-only by every request.
//!
//! # Training Example (requires `train` feature)
//!
//! ```rust,no_run
//! use iris_classifier::train::{self, TrainConfig};
//!
//! fn main() -> iris_classifier::Result<()> {
//!     let run = train::train(&TrainConfig::default())?;
//!     println!("accuracy: {:.4}", run.accuracy());
//!     Ok(())
//! }
//! ```
//!
//! # Prediction Example
//!
//! ```rust,no_run
//! use iris_classifier::ModelService;
//!
//! fn main() -> iris_classifier::Result<()> {
//!     let service = ModelService::from_dir("model");
//!     service.load()?;
//!
//!     let prediction = service.predict(&[5.1, 3.5, 1.4, 0.2])?;
//!     println!("{} ({:.2})", prediction.predicted_class, prediction.confidence);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod model;
#[cfg(feature = "server")]
pub mod server;
pub mod telemetry;
#[cfg(feature = "train")]
pub mod train;
pub mod traits;
pub mod types;
mod version;

// Re-export main types at crate root
pub use error::{IrisError, Result};
pub use model::{ArtifactPaths, ForestParams, ModelService, RandomForest};
pub use traits::Classifier;
pub use version::{PKG_VERSION, version_string};

// Re-export all types
pub use types::{
    BatchPredictionInput, BatchPredictionOutput, FEATURE_COUNT, Features, HealthResponse,
    HealthStatus, ModelInfo, ModelMetadata, Prediction, PredictionInput,
};
