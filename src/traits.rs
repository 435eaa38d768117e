//! Core Classifier trait

use crate::Result;

/// A fitted multi-class model over fixed-length feature vectors.
///
/// This is the seam between the model service and whatever learner produced
/// the artifact. Implementations are read-only after construction and are
/// shared across request handlers.
pub trait Classifier: Send + Sync {
    /// Number of classes; probability vectors have this length.
    fn n_classes(&self) -> usize;

    /// Length of the feature vectors this model accepts.
    fn n_features(&self) -> usize;

    /// Probability of each class, indexed by class.
    fn class_probabilities(&self, features: &[f64]) -> Result<Vec<f64>>;

    /// Index of the most probable class.
    ///
    /// Ties resolve to the lowest class index.
    fn classify(&self, features: &[f64]) -> Result<usize> {
        let probabilities = self.class_probabilities(features)?;
        Ok(arg_max(&probabilities))
    }
}

/// Index of the largest value, first one wins on ties. Empty input yields 0.
pub(crate) fn arg_max(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best, best_value), (index, &value)| {
            if value > best_value {
                (index, value)
            } else {
                (best, best_value)
            }
        })
        .0
}
