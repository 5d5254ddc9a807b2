//! forestgate Server
//!
//! HTTP prediction service. Loads a Random Forest artifact once at
//! startup and answers `POST /predict` with the predicted label. A model
//! that fails to load leaves the service running in a degraded state.

pub mod cli;
pub mod config;
pub mod routes;
pub mod state;

pub use config::{CorsConfig, ServerConfig};
pub use routes::{create_router, AppError, PredictRequest, PredictResponse};
pub use state::{AppState, ModelHandle};
