//! Request types and range validation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{IrisError, Result};

/// Number of measurements in a feature vector.
pub const FEATURE_COUNT: usize = 4;

/// Inclusive lower bound for every measurement, in centimetres.
pub const MIN_MEASUREMENT: f64 = 0.0;

/// Inclusive upper bound for every measurement, in centimetres.
pub const MAX_MEASUREMENT: f64 = 10.0;

/// A feature vector in training order.
pub type Features = [f64; FEATURE_COUNT];

/// Request types that check their own invariants after deserialization.
pub trait Validate {
    /// Return `InvalidInput` describing the first offending field.
    fn validate(&self) -> Result<()>;
}

/// Four flower measurements in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictionInput {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

impl PredictionInput {
    /// Create an input from the four measurements in training order.
    pub fn new(sepal_length: f64, sepal_width: f64, petal_length: f64, petal_width: f64) -> Self {
        Self {
            sepal_length,
            sepal_width,
            petal_length,
            petal_width,
        }
    }

    /// The feature vector in the order the model was trained on.
    pub fn features(&self) -> Features {
        [
            self.sepal_length,
            self.sepal_width,
            self.petal_length,
            self.petal_width,
        ]
    }

    fn named_fields(&self) -> [(&'static str, f64); FEATURE_COUNT] {
        [
            ("sepal_length", self.sepal_length),
            ("sepal_width", self.sepal_width),
            ("petal_length", self.petal_length),
            ("petal_width", self.petal_width),
        ]
    }

    fn validate_with_prefix(&self, prefix: &str) -> Result<()> {
        for (name, value) in self.named_fields() {
            if !value.is_finite() || !(MIN_MEASUREMENT..=MAX_MEASUREMENT).contains(&value) {
                return Err(IrisError::InvalidInput(format!(
                    "{prefix}{name} must be between {MIN_MEASUREMENT} and {MAX_MEASUREMENT}, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl From<Features> for PredictionInput {
    fn from(features: Features) -> Self {
        let [sepal_length, sepal_width, petal_length, petal_width] = features;
        Self::new(sepal_length, sepal_width, petal_length, petal_width)
    }
}

impl Validate for PredictionInput {
    fn validate(&self) -> Result<()> {
        self.validate_with_prefix("")
    }
}

/// Several inputs classified in one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BatchPredictionInput {
    pub instances: Vec<PredictionInput>,
}

impl BatchPredictionInput {
    /// Feature vectors for every instance, in request order.
    pub fn features(&self) -> Vec<Features> {
        self.instances.iter().map(PredictionInput::features).collect()
    }
}

impl Validate for BatchPredictionInput {
    fn validate(&self) -> Result<()> {
        for (index, instance) in self.instances.iter().enumerate() {
            instance.validate_with_prefix(&format!("instances[{index}]."))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn features_follow_training_order() {
        let input = PredictionInput::new(5.1, 3.5, 1.4, 0.2);
        assert_eq!(input.features(), [5.1, 3.5, 1.4, 0.2]);
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(PredictionInput::new(0.0, 10.0, 0.0, 10.0).validate().is_ok());
    }

    #[test]
    fn out_of_range_names_the_field() {
        let err = PredictionInput::new(15.0, 3.5, 1.4, 0.2)
            .validate()
            .unwrap_err();
        assert!(matches!(err, IrisError::InvalidInput(_)));
        assert!(err.to_string().contains("sepal_length"));
    }

    #[test]
    fn negative_and_nan_are_rejected() {
        assert!(PredictionInput::new(5.1, -0.1, 1.4, 0.2).validate().is_err());
        assert!(PredictionInput::new(5.1, 3.5, f64::NAN, 0.2).validate().is_err());
    }

    #[test]
    fn batch_error_names_the_instance() {
        let batch = BatchPredictionInput {
            instances: vec![
                PredictionInput::new(5.1, 3.5, 1.4, 0.2),
                PredictionInput::new(5.1, 3.5, 1.4, 11.0),
            ],
        };
        let err = batch.validate().unwrap_err().to_string();
        assert!(err.contains("instances[1].petal_width"), "got: {err}");
    }

    #[test]
    fn missing_field_fails_to_deserialize() {
        let json = r#"{"sepal_length": 5.1, "sepal_width": 3.5, "petal_length": 1.4}"#;
        assert!(serde_json::from_str::<PredictionInput>(json).is_err());
    }
}
