//! Error types for forestgate

/// Result type alias using forestgate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for forestgate operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Model artifact missing, unreadable or structurally invalid
    #[error("model load error: {0}")]
    ModelLoad(String),

    /// Classification of a single input failed
    #[error("{0}")]
    Classification(String),

    /// A feature vector did not match the classifier's input width
    #[error("invalid dimensionality: expected {expected} features, got {actual}")]
    InvalidDimensionality { expected: usize, actual: usize },

    /// The classifier cannot report its width or cannot classify
    #[error("classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML serialization errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new model load error
    pub fn model_load(msg: impl Into<String>) -> Self {
        Self::ModelLoad(msg.into())
    }

    /// Create a new classification error
    pub fn classification(msg: impl Into<String>) -> Self {
        Self::Classification(msg.into())
    }

    /// Create a new dimensionality error
    pub fn dimensionality(expected: usize, actual: usize) -> Self {
        Self::InvalidDimensionality { expected, actual }
    }

    /// Create a new classifier-unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::ClassifierUnavailable(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
