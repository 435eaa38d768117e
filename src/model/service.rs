//! Shared model service with one-time loading.
//!
//! The service is constructed explicitly at startup, loaded once, and then
//! shared by `Arc` with every request handler. Loading uses double-checked
//! locking so concurrent `load()` calls read the artifacts at most once;
//! after that, reads go through a `OnceLock` and take no lock.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use tracing::{debug, info, warn};

use super::artifact::{self, ArtifactPaths};
use crate::error::{IrisError, Result};
use crate::telemetry;
use crate::traits::{Classifier, arg_max};
use crate::types::{FEATURE_COUNT, Features, ModelMetadata, Prediction};

/// A classifier together with the metadata that names its classes.
struct LoadedModel {
    classifier: Box<dyn Classifier>,
    metadata: ModelMetadata,
}

impl LoadedModel {
    fn new(classifier: Box<dyn Classifier>, metadata: ModelMetadata) -> Result<Self> {
        if classifier.n_features() != FEATURE_COUNT {
            return Err(IrisError::Artifact(format!(
                "model expects {} features, service provides {FEATURE_COUNT}",
                classifier.n_features()
            )));
        }
        let mut seen = BTreeSet::new();
        if let Some(name) = metadata
            .target_names
            .iter()
            .find(|name| !seen.insert(name.as_str()))
        {
            return Err(IrisError::Artifact(format!(
                "metadata names class '{name}' more than once"
            )));
        }
        if !metadata.target_names.is_empty()
            && metadata.target_names.len() != classifier.n_classes()
        {
            warn!(
                metadata_classes = metadata.target_names.len(),
                model_classes = classifier.n_classes(),
                "Metadata class names do not match model classes"
            );
        }
        Ok(Self {
            classifier,
            metadata,
        })
    }

    fn predict(&self, features: &Features) -> Result<Prediction> {
        if let Some(position) = features.iter().position(|value| !value.is_finite()) {
            return Err(IrisError::InvalidInput(format!(
                "feature {position} is not a finite number"
            )));
        }

        let probabilities = self.classifier.class_probabilities(features)?;
        if probabilities.len() != self.classifier.n_classes() {
            return Err(IrisError::Inference(format!(
                "model returned {} probabilities for {} classes",
                probabilities.len(),
                self.classifier.n_classes()
            )));
        }
        let index = arg_max(&probabilities);
        let confidence = probabilities.get(index).copied().ok_or_else(|| {
            IrisError::Inference("model returned no probabilities".to_string())
        })?;

        let predicted_class = self.metadata.class_name(index);
        let probabilities: BTreeMap<String, f64> = probabilities
            .iter()
            .enumerate()
            .map(|(i, probability)| (self.metadata.class_name(i), *probability))
            .collect();

        metrics::counter!(telemetry::PREDICTED_CLASS_TOTAL, "class" => predicted_class.clone())
            .increment(1);

        Ok(Prediction {
            predicted_class,
            confidence,
            probabilities,
        })
    }
}

/// Process-wide holder of the loaded model and its metadata.
pub struct ModelService {
    paths: ArtifactPaths,
    loaded: OnceLock<LoadedModel>,
    load_lock: Mutex<()>,
    empty_metadata: ModelMetadata,
}

impl ModelService {
    /// Create an unloaded service reading from the given artifact paths.
    pub fn new(paths: ArtifactPaths) -> Self {
        Self {
            paths,
            loaded: OnceLock::new(),
            load_lock: Mutex::new(()),
            empty_metadata: ModelMetadata::default(),
        }
    }

    /// Create an unloaded service reading the standard file names under `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(ArtifactPaths::in_dir(dir))
    }

    /// Create an already-loaded service around an in-memory classifier.
    ///
    /// Later `load()` calls are no-ops.
    pub fn with_model(
        classifier: impl Classifier + 'static,
        metadata: ModelMetadata,
    ) -> Result<Self> {
        let service = Self::new(ArtifactPaths::default());
        let model = LoadedModel::new(Box::new(classifier), metadata)?;
        let _ = service.loaded.set(model);
        Ok(service)
    }

    /// Load the model and metadata artifacts.
    ///
    /// Idempotent: once loaded, further calls only log. A missing model file
    /// fails with `ModelNotFound`; a missing metadata file is logged and
    /// replaced by empty metadata.
    pub fn load(&self) -> Result<()> {
        // Fast path: already loaded
        if self.loaded.get().is_some() {
            info!("Model already loaded");
            return Ok(());
        }

        // Slow path: serialize loaders
        let _guard = self.load_lock.lock().map_err(|e| {
            IrisError::Configuration(format!("Failed to acquire load lock: {e}"))
        })?;

        // Double-check after acquiring the lock
        if self.loaded.get().is_some() {
            info!("Model already loaded");
            return Ok(());
        }

        info!(path = %self.paths.model.display(), "Loading model");
        let forest = artifact::load_model(&self.paths.model)?;

        let metadata = match artifact::load_metadata(&self.paths.metadata)? {
            Some(metadata) => {
                info!(?metadata, "Loaded metadata");
                metadata
            }
            None => {
                warn!(path = %self.paths.metadata.display(), "Metadata file not found");
                ModelMetadata::default()
            }
        };

        let model = LoadedModel::new(Box::new(forest), metadata)?;
        let _ = self.loaded.set(model);
        metrics::counter!(telemetry::MODEL_LOADS_TOTAL).increment(1);

        info!("Model loaded successfully");
        Ok(())
    }

    /// Whether a model has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }

    /// Metadata of the loaded model; empty before load or when none was found.
    pub fn metadata(&self) -> &ModelMetadata {
        self.loaded
            .get()
            .map_or(&self.empty_metadata, |model| &model.metadata)
    }

    /// Artifact locations this service loads from.
    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    /// Classify one feature vector.
    pub fn predict(&self, features: &Features) -> Result<Prediction> {
        let start = Instant::now();
        let result = self.model().and_then(|model| model.predict(features));
        Self::record_prediction("predict", start, result.is_ok());
        result
    }

    /// Classify several feature vectors in order.
    ///
    /// Each vector is classified independently; the first failure aborts the
    /// batch and no partial results are returned.
    pub fn predict_batch(&self, batch: &[Features]) -> Result<Vec<Prediction>> {
        let start = Instant::now();
        let result = self.model().and_then(|model| {
            batch
                .iter()
                .map(|features| model.predict(features))
                .collect::<Result<Vec<_>>>()
        });
        debug!(instances = batch.len(), ok = result.is_ok(), "batch prediction");
        Self::record_prediction("predict_batch", start, result.is_ok());
        result
    }

    fn model(&self) -> Result<&LoadedModel> {
        self.loaded.get().ok_or(IrisError::NotLoaded)
    }

    /// Record prediction outcome metrics (counter + histogram).
    fn record_prediction(operation: &'static str, start: Instant, ok: bool) {
        let status = if ok { "ok" } else { "error" };
        metrics::counter!(telemetry::PREDICTIONS_TOTAL,
            "operation" => operation,
            "status" => status,
        )
        .increment(1);
        metrics::histogram!(telemetry::PREDICTION_DURATION_SECONDS,
            "operation" => operation,
        )
        .record(start.elapsed().as_secs_f64());
    }
}

impl std::fmt::Debug for ModelService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelService")
            .field("paths", &self.paths)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<f64>);

    impl Classifier for Fixed {
        fn n_classes(&self) -> usize {
            self.0.len()
        }

        fn n_features(&self) -> usize {
            FEATURE_COUNT
        }

        fn class_probabilities(&self, _features: &[f64]) -> Result<Vec<f64>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn new_service_is_not_loaded() {
        let service = ModelService::from_dir("/nonexistent");
        assert!(!service.is_loaded());
        assert_eq!(service.metadata(), &ModelMetadata::default());
        assert!(matches!(
            service.predict(&[5.1, 3.5, 1.4, 0.2]),
            Err(IrisError::NotLoaded)
        ));
    }

    #[test]
    fn with_model_falls_back_to_synthetic_names() {
        let service =
            ModelService::with_model(Fixed(vec![0.1, 0.7, 0.2]), ModelMetadata::default())
                .unwrap();
        let prediction = service.predict(&[1.0, 1.0, 1.0, 1.0]).unwrap();
        assert_eq!(prediction.predicted_class, "class_1");
        assert_eq!(prediction.confidence, 0.7);
        assert_eq!(
            prediction.probabilities.keys().collect::<Vec<_>>(),
            vec!["class_0", "class_1", "class_2"]
        );
    }

    #[test]
    fn non_finite_features_are_invalid_input() {
        let service =
            ModelService::with_model(Fixed(vec![0.5, 0.5]), ModelMetadata::default()).unwrap();
        let err = service.predict(&[1.0, f64::INFINITY, 1.0, 1.0]).unwrap_err();
        assert!(matches!(err, IrisError::InvalidInput(_)));
    }

    #[test]
    fn wrong_feature_count_is_rejected_at_construction() {
        struct TwoFeatures;
        impl Classifier for TwoFeatures {
            fn n_classes(&self) -> usize {
                2
            }
            fn n_features(&self) -> usize {
                2
            }
            fn class_probabilities(&self, _features: &[f64]) -> Result<Vec<f64>> {
                Ok(vec![0.5, 0.5])
            }
        }
        let err = ModelService::with_model(TwoFeatures, ModelMetadata::default()).unwrap_err();
        assert!(matches!(err, IrisError::Artifact(_)));
    }

    #[test]
    fn duplicate_class_names_are_rejected_at_construction() {
        let metadata = ModelMetadata {
            target_names: vec!["setosa".into(), "setosa".into(), "virginica".into()],
            ..Default::default()
        };
        let err = ModelService::with_model(Fixed(vec![0.2, 0.3, 0.5]), metadata).unwrap_err();
        assert!(matches!(err, IrisError::Artifact(_)));
        assert!(err.to_string().contains("setosa"));
    }

    #[test]
    fn each_prediction_evaluates_the_model_once() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        struct Counting(Arc<AtomicUsize>);
        impl Classifier for Counting {
            fn n_classes(&self) -> usize {
                3
            }
            fn n_features(&self) -> usize {
                FEATURE_COUNT
            }
            fn class_probabilities(&self, _features: &[f64]) -> Result<Vec<f64>> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(vec![0.1, 0.2, 0.7])
            }
        }

        let calls = Arc::new(AtomicUsize::new(0));
        let service =
            ModelService::with_model(Counting(Arc::clone(&calls)), ModelMetadata::default())
                .unwrap();

        let prediction = service.predict(&[1.0; 4]).unwrap();
        assert_eq!(prediction.predicted_class, "class_2");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        service.predict_batch(&[[1.0; 4], [2.0; 4]]).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
