use std::path::PathBuf;

use iris_classifier::{IrisError, Result};

#[test]
fn test_error_display() {
    let err = IrisError::ModelNotFound(PathBuf::from("model/iris_model.msgpack"));
    assert!(err.to_string().contains("model/iris_model.msgpack"));
}

#[test]
fn test_not_loaded() {
    assert!(IrisError::NotLoaded.to_string().contains("not loaded"));
}

#[test]
fn test_result_alias() {
    fn returns_error() -> Result<()> {
        Err(IrisError::NotLoaded)
    }
    assert!(returns_error().is_err());
}

#[test]
fn messages_are_embedded() {
    let err = IrisError::InvalidInput("petal_width must be between 0 and 10".into());
    assert!(err.to_string().contains("petal_width"));

    let err = IrisError::Inference("vote buffer empty".into());
    assert!(err.to_string().contains("vote buffer empty"));
}

// ============================================================================
// Conversions
// ============================================================================

#[test]
fn io_errors_convert() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: IrisError = io.into();
    assert!(matches!(err, IrisError::Io(_)));
}

#[test]
fn json_errors_convert() {
    let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: IrisError = json.into();
    assert!(matches!(err, IrisError::Json(_)));
}

#[test]
fn decode_errors_are_artifact_errors() {
    let decode = rmp_serde::from_slice::<String>(&[0xc1]).unwrap_err();
    let err: IrisError = decode.into();
    assert!(matches!(err, IrisError::Artifact(_)));
    assert!(err.to_string().contains("decode"));
}
