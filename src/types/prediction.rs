//! Prediction result types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Classification of a single instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Prediction {
    /// Name of the most probable class.
    pub predicted_class: String,
    /// Probability of `predicted_class`, in [0, 1].
    pub confidence: f64,
    /// Probability of every known class, keyed by class name.
    pub probabilities: BTreeMap<String, f64>,
}

/// Classifications for a batch, in request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BatchPredictionOutput {
    pub predictions: Vec<Prediction>,
}
