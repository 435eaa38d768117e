//! Offline training on the bundled iris dataset.
//!
//! Loads the 150-sample reference dataset, splits it (stratified), fits a
//! [`RandomForest`], evaluates it on the held-out rows, and writes the model
//! and metadata artifacts. A rerun overwrites earlier artifacts.

mod report;
mod split;

pub use report::{AverageReport, ClassReport, ClassificationReport};
pub use split::{Split, stratified_split};

use std::path::PathBuf;

use ndarray::{Array1, Array2};
use tracing::info;

use crate::error::Result;
use crate::model::{ArtifactPaths, ForestParams, RandomForest, artifact};
use crate::types::{FEATURE_COUNT, ModelMetadata};

/// Feature names of the reference dataset, in column order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "sepal length (cm)",
    "sepal width (cm)",
    "petal length (cm)",
    "petal width (cm)",
];

/// Class names of the reference dataset, in label order.
pub const TARGET_NAMES: [&str; 3] = ["setosa", "versicolor", "virginica"];

/// Training configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    /// Directory receiving the artifacts (default: `model`).
    pub output_dir: PathBuf,
    /// Fraction of each class held out for evaluation (default: 0.2).
    pub test_size: f64,
    /// Seed for the train/test split (default: 42).
    pub split_seed: u64,
    /// Forest hyperparameters (default: 100 trees, depth 5, seed 42).
    pub forest: ForestParams,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("model"),
            test_size: 0.2,
            split_seed: 42,
            forest: ForestParams::default(),
        }
    }
}

/// Everything produced by one training run.
#[derive(Debug, Clone)]
pub struct TrainingRun {
    pub forest: RandomForest,
    pub metadata: ModelMetadata,
    pub report: ClassificationReport,
    pub split: Split,
}

impl TrainingRun {
    /// Test-set accuracy.
    pub fn accuracy(&self) -> f64 {
        self.report.accuracy
    }
}

/// The bundled iris dataset as (records, class indices).
pub fn load_dataset() -> (Array2<f64>, Array1<usize>) {
    let dataset = linfa_datasets::iris();
    (dataset.records().clone(), dataset.targets().clone())
}

/// Split, fit and evaluate without touching the filesystem.
pub fn fit(config: &TrainConfig) -> Result<TrainingRun> {
    let (records, targets) = load_dataset();
    info!(
        samples = records.nrows(),
        features = records.ncols(),
        "Loaded iris dataset"
    );

    let split = stratified_split(&records, &targets, config.test_size, config.split_seed)?;
    info!(
        train = split.train_records.nrows(),
        test = split.test_records.nrows(),
        "Split dataset"
    );

    info!(
        n_trees = config.forest.n_trees,
        max_depth = config.forest.max_depth,
        "Training random forest"
    );
    let forest = config
        .forest
        .fit(&split.train_records, &split.train_targets)?;

    let predicted = forest.predict_classes(&split.test_records)?;
    let class_names: Vec<String> = TARGET_NAMES.iter().map(|name| name.to_string()).collect();
    let report = ClassificationReport::new(&class_names, &split.test_targets, &predicted);
    info!(accuracy = report.accuracy, "Evaluated on test set");

    let metadata = ModelMetadata {
        feature_names: FEATURE_NAMES.iter().map(|name| name.to_string()).collect(),
        target_names: class_names,
        accuracy: Some(report.accuracy),
        n_features: FEATURE_COUNT,
    };

    Ok(TrainingRun {
        forest,
        metadata,
        report,
        split,
    })
}

/// Fit, evaluate and write both artifacts under `config.output_dir`.
pub fn train(config: &TrainConfig) -> Result<TrainingRun> {
    let run = fit(config)?;
    let paths = ArtifactPaths::in_dir(&config.output_dir);
    artifact::save_artifacts(&paths, &run.forest, &run.metadata)?;
    info!(
        model = %paths.model.display(),
        metadata = %paths.metadata.display(),
        "Saved artifacts"
    );
    Ok(run)
}
