//! HTTP routes and handlers

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use forestgate_core::Label;
use forestgate_model::ModelMetadata;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;
    let allow_any_origin = state.config.cors.allow_any_origin;

    let router = Router::new()
        .route("/", get(root))
        .route("/predict", post(predict))
        .route("/health", get(health_check))
        .route("/model", get(model_info))
        .route("/metrics", get(metrics))
        .fallback(fallback)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if allow_any_origin {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    }
}

async fn root(State(state): State<AppState>) -> Json<serde_json::Value> {
    metrics::counter!("forestgate_requests_total", "endpoint" => "root").increment(1);
    Json(json!({ "message": state.config.greeting }))
}

/// Prediction request body
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictRequest {
    pub features: Vec<f64>,
}

/// Prediction response body; a one-element list holding the label
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: Vec<Label>,
}

async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, AppError> {
    let request_id = Uuid::new_v4();
    metrics::counter!("forestgate_requests_total", "endpoint" => "predict").increment(1);

    let Json(request) = payload.map_err(|rejection| {
        warn!(%request_id, "Rejected request body: {}", rejection.body_text());
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(rejection.body_text())
        } else {
            AppError::InvalidRequest(rejection.body_text())
        }
    })?;

    let classifier = state
        .model
        .classifier()
        .map_err(|e| AppError::ModelNotLoaded(e.to_string()))?;

    debug!(%request_id, features = ?request.features, "Received features");

    let start = Instant::now();
    let label = classifier.classify(&request.features).map_err(|e| {
        warn!(%request_id, n_features = request.features.len(), "Prediction failed: {}", e);
        AppError::Prediction(e.to_string())
    })?;
    let latency_us = start.elapsed().as_micros() as f64;

    metrics::histogram!("forestgate_predict_latency_us").record(latency_us);
    metrics::counter!("forestgate_predictions_total", "label" => label.to_string()).increment(1);

    info!(
        %request_id,
        n_features = request.features.len(),
        prediction = %label,
        latency_us,
        "Prediction complete"
    );

    Ok(Json(PredictResponse {
        prediction: vec![label],
    }))
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "model_loaded": state.model.is_loaded(),
    }))
}

async fn model_info(State(state): State<AppState>) -> Result<Json<ModelMetadata>, AppError> {
    let classifier = state
        .model
        .classifier()
        .map_err(|e| AppError::ModelNotLoaded(e.to_string()))?;

    Ok(Json(classifier.metadata()))
}

async fn metrics(State(state): State<AppState>) -> Response {
    let body = state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default();

    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response()
}

async fn fallback() -> AppError {
    AppError::NotFound
}

/// Error handling
///
/// Every failure is reported as `{"detail": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Model not loaded: {0}")]
    ModelNotLoaded(String),

    #[error("{0}")]
    Prediction(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("Not Found")]
    NotFound,
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            AppError::ModelNotLoaded(_) => "model_not_loaded",
            AppError::Prediction(_) => "prediction",
            AppError::InvalidRequest(_) => "invalid_request",
            AppError::PayloadTooLarge(_) => "payload_too_large",
            AppError::NotFound => "not_found",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            metrics::counter!("forestgate_errors_total", "type" => self.kind()).increment(1);
            error!(kind = self.kind(), "{}", self);
        }

        let body = json!({ "detail": self.to_string() });
        (status, Json(body)).into_response()
    }
}
