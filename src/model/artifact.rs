//! On-disk model and metadata artifacts.
//!
//! A model directory holds two files:
//! - `iris_model.msgpack`: MessagePack envelope around the fitted forest
//! - `metadata.json`: [`ModelMetadata`] as pretty-printed JSON
//!
//! The envelope carries a format version so a reader can refuse artifacts
//! written by an incompatible build instead of misreading them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::RandomForest;
use crate::error::{IrisError, Result};
use crate::types::ModelMetadata;

/// File name of the serialized model inside a model directory.
pub const MODEL_FILE_NAME: &str = "iris_model.msgpack";

/// File name of the metadata record inside a model directory.
pub const METADATA_FILE_NAME: &str = "metadata.json";

/// Envelope version written by this build.
pub const FORMAT_VERSION: u32 = 1;

const ALGORITHM: &str = "random_forest";

/// Locations of the two artifact files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub metadata: PathBuf,
}

impl ArtifactPaths {
    /// Standard file names under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join(MODEL_FILE_NAME),
            metadata: dir.join(METADATA_FILE_NAME),
        }
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::in_dir("model")
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    format_version: u32,
    algorithm: &'a str,
    forest: &'a RandomForest,
}

#[derive(Deserialize)]
struct Envelope {
    format_version: u32,
    algorithm: String,
    forest: RandomForest,
}

/// Serialize a forest into envelope bytes.
pub fn encode_model(forest: &RandomForest) -> Result<Vec<u8>> {
    let envelope = EnvelopeRef {
        format_version: FORMAT_VERSION,
        algorithm: ALGORITHM,
        forest,
    };
    Ok(rmp_serde::to_vec_named(&envelope)?)
}

/// Deserialize envelope bytes, checking version and algorithm.
pub fn decode_model(bytes: &[u8]) -> Result<RandomForest> {
    let envelope: Envelope = rmp_serde::from_slice(bytes)?;
    if envelope.format_version != FORMAT_VERSION {
        return Err(IrisError::Artifact(format!(
            "unsupported model format version {} (expected {FORMAT_VERSION})",
            envelope.format_version
        )));
    }
    if envelope.algorithm != ALGORITHM {
        return Err(IrisError::Artifact(format!(
            "unsupported model algorithm '{}'",
            envelope.algorithm
        )));
    }
    Ok(envelope.forest)
}

/// Write the model artifact, creating parent directories. Overwrites.
pub fn save_model(path: &Path, forest: &RandomForest) -> Result<()> {
    create_parent(path)?;
    let bytes = encode_model(forest)?;
    fs::write(path, &bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), "wrote model artifact");
    Ok(())
}

/// Read the model artifact; `ModelNotFound` if the file does not exist.
pub fn load_model(path: &Path) -> Result<RandomForest> {
    if !path.exists() {
        return Err(IrisError::ModelNotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    decode_model(&bytes)
}

/// Write the metadata record, creating parent directories. Overwrites.
pub fn save_metadata(path: &Path, metadata: &ModelMetadata) -> Result<()> {
    create_parent(path)?;
    let content = serde_json::to_string_pretty(metadata)?;
    fs::write(path, format!("{content}\n"))?;
    debug!(path = %path.display(), "wrote metadata artifact");
    Ok(())
}

/// Read the metadata record; `Ok(None)` if the file does not exist.
pub fn load_metadata(path: &Path) -> Result<Option<ModelMetadata>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&content)?))
}

/// Write both artifacts.
pub fn save_artifacts(
    paths: &ArtifactPaths,
    forest: &RandomForest,
    metadata: &ModelMetadata,
) -> Result<()> {
    save_model(&paths.model, forest)?;
    save_metadata(&paths.metadata, metadata)
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
