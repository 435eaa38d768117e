//! Model fitting, persistence and serving.

pub mod artifact;
pub mod forest;
pub mod service;

pub use artifact::{ArtifactPaths, METADATA_FILE_NAME, MODEL_FILE_NAME};
pub use forest::{ForestParams, RandomForest};
pub use service::ModelService;
