//! Shared application state

use forestgate_model::{load_from_config, Classifier, ModelConfigSpec};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::ServerConfig;

/// The served model, or the reason it could not be loaded.
///
/// A failed load does not stop the service: `/` and `/health` keep
/// answering and prediction requests report the load error.
pub enum ModelHandle {
    Ready(Arc<dyn Classifier>),
    Unavailable { error: String },
}

impl ModelHandle {
    /// Load the model described by `spec`, degrading to `Unavailable`
    /// on failure
    pub fn load(spec: &ModelConfigSpec) -> Self {
        match load_from_config(spec) {
            Ok(forest) => {
                info!(
                    path = %spec.path.display(),
                    name = forest.name(),
                    n_features = forest.n_features(),
                    "Model ready"
                );
                Self::Ready(Arc::new(forest))
            }
            Err(e) => {
                error!(path = %spec.path.display(), "Failed to load model: {}", e);
                Self::Unavailable {
                    error: e.to_string(),
                }
            }
        }
    }

    pub fn ready(classifier: Arc<dyn Classifier>) -> Self {
        Self::Ready(classifier)
    }

    pub fn unavailable(error: impl Into<String>) -> Self {
        Self::Unavailable {
            error: error.into(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The loaded classifier, or the load error message
    pub fn classifier(&self) -> Result<&Arc<dyn Classifier>, &str> {
        match self {
            Self::Ready(classifier) => Ok(classifier),
            Self::Unavailable { error } => Err(error),
        }
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(classifier) => f.debug_tuple("Ready").field(&classifier.name()).finish(),
            Self::Unavailable { error } => {
                f.debug_struct("Unavailable").field("error", error).finish()
            }
        }
    }
}

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub model: Arc<ModelHandle>,
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(config: ServerConfig, model: ModelHandle) -> Self {
        Self {
            config: Arc::new(config),
            model: Arc::new(model),
            metrics_handle: None,
        }
    }

    /// Load the configured model and build the state
    pub fn from_config(config: ServerConfig) -> Self {
        let model = ModelHandle::load(&config.model);
        Self::new(config, model)
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }
}
