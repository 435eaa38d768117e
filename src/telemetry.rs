//! Telemetry metric name constants.
//!
//! Centralised metric names for prediction operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `iris_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `operation`: "predict" or "predict_batch"
//! - `status`: outcome: "ok" or "error"
//! - `class`: predicted class name

/// Total prediction calls on the model service.
///
/// Labels: `operation`, `status` ("ok" | "error").
pub const PREDICTIONS_TOTAL: &str = "iris_predictions_total";

/// Prediction call duration in seconds.
///
/// Labels: `operation`.
pub const PREDICTION_DURATION_SECONDS: &str = "iris_prediction_duration_seconds";

/// Total instances classified, per predicted class.
///
/// Labels: `class`.
pub const PREDICTED_CLASS_TOTAL: &str = "iris_predicted_class_total";

/// Total model loads that actually read artifacts from disk.
pub const MODEL_LOADS_TOTAL: &str = "iris_model_loads_total";
