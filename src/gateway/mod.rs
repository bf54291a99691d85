//! HTTP gateway (Axum).
//!
//! Routes:
//! - `POST /predict`: multipart (`text`, `source`, `image`) or URL-encoded form
//! - `GET /healthz`: liveness
//! - `GET /ready`: loaded component report
//!
//! CORS is fully open; there is no auth boundary.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::predict_handler;
pub use state::HandlerState;

use crate::ocr::TextRecognizer;

pub const STATUS_HEADER: &str = "x-credence-status";
pub const STATUS_SCORED: &str = "scored";
pub const STATUS_NO_TEXT: &str = "no_text";
pub const STATUS_INVALID_REQUEST: &str = "invalid_request";
pub const STATUS_OCR_ERROR: &str = "ocr_error";
pub const STATUS_INFERENCE_ERROR: &str = "inference_error";
pub const STATUS_INTERNAL_ERROR: &str = "internal_error";
pub const STATUS_HEALTHY: &str = "healthy";
pub const STATUS_READY: &str = "ready";

pub fn create_router_with_state<R>(state: HandlerState<R>) -> Router
where
    R: TextRecognizer + 'static,
{
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler::<R>))
        .route("/predict", post(predict_handler::<R>))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct ReadyResponse {
    pub status: String,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct ComponentStatus {
    pub embedder_mode: String,
    pub device: String,
    pub embedding_dim: usize,
    pub classifier_dim: usize,
    pub ocr: String,
    pub trusted_domains: usize,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(STATUS_HEADER, HeaderValue::from_static(STATUS_HEALTHY));

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse {
            status: "ok".to_string(),
        }),
    )
        .into_response()
}

/// Every component is loaded before the router exists, so this only reports what
/// was loaded.
#[tracing::instrument(skip(state))]
pub async fn ready_handler<R>(State(state): State<HandlerState<R>>) -> Response
where
    R: TextRecognizer + 'static,
{
    let pipeline = &state.pipeline;
    let components = ComponentStatus {
        embedder_mode: pipeline.embedder().mode().to_string(),
        device: pipeline.embedder().device().to_string(),
        embedding_dim: pipeline.embedder().embedding_dim(),
        classifier_dim: pipeline.classifier().input_dim(),
        ocr: pipeline.recognizer().engine_name().to_string(),
        trusted_domains: pipeline.trust_table().len(),
    };

    let mut headers = HeaderMap::new();
    headers.insert(STATUS_HEADER, HeaderValue::from_static(STATUS_READY));

    (
        StatusCode::OK,
        headers,
        Json(ReadyResponse {
            status: "ok".to_string(),
            components,
        }),
    )
        .into_response()
}
