//! Model artifact loading

use crate::classifier::Classifier;
use crate::config::ModelConfigSpec;
use crate::forest::{ForestArtifact, RandomForest};
use forestgate_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Model file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    /// JSON document (default)
    Json,
    /// YAML document
    Yaml,
}

impl ModelFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Load a forest from a file, inferring the format from its extension
pub fn load_model(path: impl AsRef<Path>) -> Result<RandomForest> {
    let path = path.as_ref();
    load_model_as(path, ModelFormat::from_path(path))
}

/// Load a forest from a file in the given format
pub fn load_model_as(path: &Path, format: ModelFormat) -> Result<RandomForest> {
    let artifact = read_artifact(path, format)?;
    finish_load(path, artifact)
}

/// Load a forest as described by a configuration entry
pub fn load_from_config(spec: &ModelConfigSpec) -> Result<RandomForest> {
    let format = spec.format.unwrap_or_else(|| ModelFormat::from_path(&spec.path));
    let mut artifact = read_artifact(&spec.path, format)?;
    if spec.name.is_some() {
        artifact.name = spec.name.clone();
    }
    finish_load(&spec.path, artifact)
}

/// Parse and validate a forest from an in-memory document
pub fn parse_model(content: &str, format: ModelFormat) -> Result<RandomForest> {
    RandomForest::from_artifact(parse_artifact(content, format)?)
}

fn read_artifact(path: &Path, format: ModelFormat) -> Result<ForestArtifact> {
    debug!("Reading model artifact from {} as {:?}", path.display(), format);

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::model_load(format!("failed to read {}: {}", path.display(), e)))?;

    parse_artifact(&content, format)
}

fn finish_load(path: &Path, artifact: ForestArtifact) -> Result<RandomForest> {
    let forest = RandomForest::from_artifact(artifact)?;
    info!(
        "Loaded model from {} ({} trees, {} features)",
        path.display(),
        forest.n_estimators(),
        forest.n_features()
    );
    Ok(forest)
}

fn parse_artifact(content: &str, format: ModelFormat) -> Result<ForestArtifact> {
    match format {
        ModelFormat::Json => serde_json::from_str(content)
            .map_err(|e| Error::model_load(format!("invalid JSON model artifact: {}", e))),
        ModelFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| Error::model_load(format!("invalid YAML model artifact: {}", e))),
    }
}
