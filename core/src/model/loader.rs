//! Model Loader - read and validate the serialized ensemble
//!
//! Called once by the composition root. The returned `LoadedModel` is
//! immutable; share it behind an `Arc`.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::artifact::{ModelArtifact, ModelType};
use super::ensemble::TreeEnsemble;
use super::error::ModelError;
use crate::features::LayoutInfo;

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub model_type: ModelType,
    pub tree_count: usize,
    pub node_count: usize,
    pub layout: LayoutInfo,
    pub loaded_at: DateTime<Utc>,
}

/// Validated ensemble plus where it came from
#[derive(Debug, Clone)]
pub struct LoadedModel {
    ensemble: TreeEnsemble,
    metadata: ModelMetadata,
}

impl LoadedModel {
    pub fn new(ensemble: TreeEnsemble, model_path: impl Into<String>) -> Self {
        let metadata = ModelMetadata {
            model_path: model_path.into(),
            model_type: ensemble.model_type(),
            tree_count: ensemble.trees().len(),
            node_count: ensemble.trees().iter().map(|t| t.node_count()).sum(),
            layout: LayoutInfo::current(),
            loaded_at: Utc::now(),
        };
        Self { ensemble, metadata }
    }

    pub fn ensemble(&self) -> &TreeEnsemble {
        &self.ensemble
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

/// Load model from file
pub fn load_model<P: AsRef<Path>>(model_path: P) -> Result<LoadedModel, ModelError> {
    let path = model_path.as_ref();
    log::info!("Loading model from: {}", path.display());

    if !path.exists() {
        return Err(ModelError::NotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path).map_err(|source| ModelError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_model(&bytes, path.display().to_string())
}

/// Load model from bytes
pub fn load_model_from_bytes(model_bytes: &[u8]) -> Result<LoadedModel, ModelError> {
    log::info!("Loading model from memory ({} bytes)", model_bytes.len());
    parse_model(model_bytes, "<memory>")
}

fn parse_model(bytes: &[u8], source: impl Into<String>) -> Result<LoadedModel, ModelError> {
    let artifact: ModelArtifact = serde_json::from_slice(bytes)?;
    let ensemble = TreeEnsemble::from_artifact(artifact)?;
    let model = LoadedModel::new(ensemble, source);

    let meta = model.metadata();
    log::info!(
        "Model loaded successfully: {} ({} trees, {} nodes, layout v{} hash {:08x})",
        meta.model_type,
        meta.tree_count,
        meta.node_count,
        meta.layout.version,
        meta.layout.hash
    );

    Ok(model)
}
