//! Model metadata stored alongside the model artifact.

use serde::{Deserialize, Serialize};

/// Descriptive record written by training and read at load time.
///
/// Every field defaults, so a missing or partial metadata file degrades to
/// empty lists instead of failing the load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Feature names in training order.
    #[serde(default)]
    pub feature_names: Vec<String>,
    /// Class names, index-aligned with the model's class indices.
    #[serde(default)]
    pub target_names: Vec<String>,
    /// Test-set accuracy recorded at training time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    /// Number of features the model expects.
    #[serde(default)]
    pub n_features: usize,
}

impl ModelMetadata {
    /// Name for a class index, falling back to `class_<index>` when the
    /// metadata does not cover it.
    pub fn class_name(&self, index: usize) -> String {
        self.target_names
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("class_{index}"))
    }

    /// Whether no metadata was available.
    pub fn is_empty(&self) -> bool {
        self.feature_names.is_empty() && self.target_names.is_empty() && self.accuracy.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_name_falls_back_to_index() {
        let metadata = ModelMetadata::default();
        assert_eq!(metadata.class_name(0), "class_0");
        assert_eq!(metadata.class_name(2), "class_2");
    }

    #[test]
    fn class_name_uses_target_names() {
        let metadata = ModelMetadata {
            target_names: vec!["setosa".into(), "versicolor".into()],
            ..Default::default()
        };
        assert_eq!(metadata.class_name(1), "versicolor");
        assert_eq!(metadata.class_name(2), "class_2");
    }

    #[test]
    fn partial_json_loads_with_defaults() {
        let metadata: ModelMetadata =
            serde_json::from_str(r#"{"target_names": ["a", "b"]}"#).unwrap();
        assert_eq!(metadata.target_names, vec!["a", "b"]);
        assert!(metadata.feature_names.is_empty());
        assert_eq!(metadata.accuracy, None);
        assert_eq!(metadata.n_features, 0);
    }
}
