//! Persistence for the trained model artifact.
//!
//! The artifact bundles everything prediction needs (vocabulary, label
//! encoder, classifier weights) into one self-describing JSON file. Writes
//! go to a temp file first and are renamed into place so a crash mid-write
//! never leaves a partially visible artifact.

use crate::application::ml::featurizer::Vocabulary;
use crate::application::ml::label_encoder::LabelEncoder;
use crate::application::ml::model::ClassifierModel;
use crate::domain::errors::ModelStoreError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

pub const SCHEMA_VERSION: u32 = 1;

/// The single persisted unit: load this and prediction needs no retraining.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub schema_version: u32,
    pub vocabulary: Vocabulary,
    pub labels: LabelEncoder,
    pub classifier: ClassifierModel,
}

impl ModelArtifact {
    pub fn new(vocabulary: Vocabulary, labels: LabelEncoder, classifier: ClassifierModel) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            vocabulary,
            labels,
            classifier,
        }
    }
}

pub struct ModelStore;

impl ModelStore {
    /// Atomic save: create missing parent directories, write to a `.tmp`
    /// sibling, then rename into place.
    pub fn save(artifact: &ModelArtifact, path: &Path) -> Result<(), ModelStoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| ModelStoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let content =
            serde_json::to_string(artifact).map_err(|e| ModelStoreError::Corrupt {
                path: path.to_path_buf(),
                reason: format!("serialization failed: {e}"),
            })?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content).map_err(|source| ModelStoreError::Io {
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, path).map_err(|source| ModelStoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Saved model artifact to {:?}", path);
        Ok(())
    }

    pub fn load(path: &Path) -> Result<ModelArtifact, ModelStoreError> {
        if !path.exists() {
            return Err(ModelStoreError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|source| ModelStoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: ModelArtifact =
            serde_json::from_str(&content).map_err(|e| ModelStoreError::Corrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if artifact.schema_version != SCHEMA_VERSION {
            return Err(ModelStoreError::Corrupt {
                path: path.to_path_buf(),
                reason: format!(
                    "unsupported schema version {} (expected {})",
                    artifact.schema_version, SCHEMA_VERSION
                ),
            });
        }

        info!("Loaded model artifact from {:?}", path);
        Ok(artifact)
    }
}
