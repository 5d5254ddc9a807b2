//! Classifier trait and common types

use forestgate_core::{Error, Label, Result};
use serde::Serialize;

/// Trait for all classifiers
///
/// Implementations are immutable once constructed and shared read-only
/// between the HTTP service and search runs.
pub trait Classifier: Send + Sync {
    /// Classify a single feature vector
    fn classify(&self, features: &[f64]) -> Result<Label>;

    /// Number of features the classifier expects as input
    fn n_features(&self) -> usize;

    /// Get the classifier name
    fn name(&self) -> &str;

    /// Describe the loaded model
    fn metadata(&self) -> ModelMetadata {
        ModelMetadata {
            name: self.name().to_string(),
            n_features: self.n_features(),
            classes: Vec::new(),
            n_estimators: None,
        }
    }
}

/// Metadata about a loaded model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelMetadata {
    /// Model name
    pub name: String,

    /// Expected input width
    pub n_features: usize,

    /// Class labels in prediction order
    pub classes: Vec<Label>,

    /// Number of trees, for ensemble models
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_estimators: Option<usize>,
}

/// Validate a feature vector against the expected input width.
///
/// Rejects wrong lengths and non-finite values with a message naming both
/// widths, the way the service reports it back to callers.
pub fn check_features(name: &str, expected: usize, features: &[f64]) -> Result<()> {
    if features.len() != expected {
        return Err(Error::classification(format!(
            "X has {} features, but {} is expecting {} features as input.",
            features.len(),
            name,
            expected
        )));
    }

    if let Some(index) = features.iter().position(|v| !v.is_finite()) {
        return Err(Error::classification(format!(
            "Input contains a non-finite value at index {}.",
            index
        )));
    }

    Ok(())
}
