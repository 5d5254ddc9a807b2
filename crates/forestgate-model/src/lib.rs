//! forestgate Model
//!
//! The classifier abstraction and the Random Forest implementation behind
//! it. A model is loaded once from a JSON or YAML artifact, validated, and
//! then shared read-only by the HTTP service and the search tool.

pub mod classifier;
pub mod config;
pub mod forest;
pub mod loader;

pub use classifier::{check_features, Classifier, ModelMetadata};
pub use config::ModelConfigSpec;
pub use forest::{ForestArtifact, NodeArtifact, RandomForest, TreeArtifact};
pub use loader::{load_from_config, load_model, load_model_as, parse_model, ModelFormat};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{Classifier, ModelMetadata};
    pub use crate::forest::RandomForest;
    pub use crate::loader::{load_model, ModelFormat};
}
