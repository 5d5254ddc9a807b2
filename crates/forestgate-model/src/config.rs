//! Model configuration as it appears in service and search config files

use crate::ModelFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Model configuration specification (for YAML/config files)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfigSpec {
    /// Path to the model artifact
    #[serde(default = "default_model_path")]
    pub path: PathBuf,

    /// Format override; inferred from the extension when absent
    #[serde(default)]
    pub format: Option<ModelFormat>,

    /// Name override for logs and metadata
    #[serde(default)]
    pub name: Option<String>,
}

impl ModelConfigSpec {
    /// Create a spec for a local artifact path
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

impl Default for ModelConfigSpec {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            format: None,
            name: None,
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from("model.json")
}
