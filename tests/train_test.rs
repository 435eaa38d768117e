//! Tests for the end-to-end training pipeline and its artifacts.

#![cfg(feature = "train")]

use std::fs;

use iris_classifier::model::artifact::{self, ArtifactPaths};
use iris_classifier::train::{self, FEATURE_NAMES, TARGET_NAMES, TrainConfig};
use iris_classifier::{ForestParams, IrisError, ModelMetadata};

fn small_config(output_dir: &std::path::Path) -> TrainConfig {
    TrainConfig {
        output_dir: output_dir.to_path_buf(),
        forest: ForestParams::default().n_trees(10),
        ..Default::default()
    }
}

#[test]
fn train_writes_both_artifacts_into_new_directory() {
    let root = tempfile::tempdir().unwrap();
    let output = root.path().join("nested").join("model");

    train::train(&small_config(&output)).unwrap();

    let paths = ArtifactPaths::in_dir(&output);
    assert!(paths.model.is_file());
    assert!(paths.metadata.is_file());
    assert!(output.join("iris_model.msgpack").is_file());
    assert!(output.join("metadata.json").is_file());
}

#[test]
fn metadata_describes_the_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let run = train::train(&small_config(dir.path())).unwrap();

    let raw = fs::read_to_string(dir.path().join("metadata.json")).unwrap();
    let metadata: ModelMetadata = serde_json::from_str(&raw).unwrap();

    assert_eq!(metadata, run.metadata);
    assert_eq!(metadata.feature_names, FEATURE_NAMES.to_vec());
    assert_eq!(metadata.target_names, TARGET_NAMES.to_vec());
    assert_eq!(metadata.n_features, 4);
    assert_eq!(metadata.accuracy, Some(run.accuracy()));
}

#[test]
fn metadata_json_uses_documented_keys() {
    let dir = tempfile::tempdir().unwrap();
    train::train(&small_config(dir.path())).unwrap();

    let raw = fs::read_to_string(dir.path().join("metadata.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    for key in ["feature_names", "target_names", "accuracy", "n_features"] {
        assert!(value.get(key).is_some(), "missing key {key}");
    }
}

#[test]
fn saved_model_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let run = train::train(&small_config(dir.path())).unwrap();

    let forest = artifact::load_model(&dir.path().join("iris_model.msgpack")).unwrap();
    assert_eq!(
        forest.vote_shares(&run.split.test_records).unwrap(),
        run.forest.vote_shares(&run.split.test_records).unwrap()
    );
}

#[test]
fn rerun_overwrites_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    train::train(&small_config(dir.path())).unwrap();

    let config = TrainConfig {
        forest: ForestParams::default().n_trees(3),
        ..small_config(dir.path())
    };
    train::train(&config).unwrap();

    let forest = artifact::load_model(&dir.path().join("iris_model.msgpack")).unwrap();
    assert_eq!(forest.n_trees(), 3);
}

#[test]
fn split_sizes_follow_test_fraction() {
    let run = train::fit(&TrainConfig {
        forest: ForestParams::default().n_trees(5),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(run.split.test_records.nrows(), 30);
    assert_eq!(run.split.train_records.nrows(), 120);
    assert_eq!(run.report.classes.len(), 3);
}

#[test]
fn invalid_hyperparameters_fail_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let config = TrainConfig {
        forest: ForestParams::default().n_trees(0),
        ..small_config(dir.path())
    };

    let err = train::train(&config).unwrap_err();
    assert!(matches!(err, IrisError::Training(_)));
    assert!(!dir.path().join("iris_model.msgpack").exists());
}

#[test]
fn invalid_test_size_is_a_training_error() {
    let config = TrainConfig {
        test_size: 1.5,
        ..Default::default()
    };
    assert!(matches!(train::fit(&config), Err(IrisError::Training(_))));
}
