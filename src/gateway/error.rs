use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use super::{
    STATUS_HEADER, STATUS_INFERENCE_ERROR, STATUS_INTERNAL_ERROR, STATUS_INVALID_REQUEST,
    STATUS_NO_TEXT, STATUS_OCR_ERROR,
};
use crate::constants::NO_TEXT_FOUND;
use crate::pipeline::PipelineError;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Reported with HTTP 200 and `{"error": "No text found"}` for client compatibility.
    #[error("no text found")]
    NoTextFound,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("unsupported content type: {0}")]
    UnsupportedMediaType(String),

    #[error("request body too large")]
    PayloadTooLarge,

    #[error("image could not be read: {0}")]
    OcrFailed(String),

    #[error("inference failed: {0}")]
    InferenceFailed(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<PipelineError> for GatewayError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::NoTextFound => GatewayError::NoTextFound,
            PipelineError::Ocr(e) if e.is_client_error() => GatewayError::OcrFailed(e.to_string()),
            PipelineError::Ocr(e) => GatewayError::InternalError(e.to_string()),
            PipelineError::Embedding(e) if e.is_inference_error() => {
                GatewayError::InferenceFailed(e.to_string())
            }
            PipelineError::Embedding(e) => GatewayError::InternalError(e.to_string()),
            PipelineError::Classification(e) => GatewayError::InferenceFailed(e.to_string()),
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

#[derive(serde::Serialize)]
pub struct NoTextResponse {
    pub error: &'static str,
}

fn status_headers(value: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(STATUS_HEADER, HeaderValue::from_static(value));
    headers
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, credence_status) = match &self {
            GatewayError::NoTextFound => {
                return (
                    StatusCode::OK,
                    status_headers(STATUS_NO_TEXT),
                    Json(NoTextResponse {
                        error: NO_TEXT_FOUND,
                    }),
                )
                    .into_response();
            }
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, STATUS_INVALID_REQUEST),
            GatewayError::UnsupportedMediaType(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, STATUS_INVALID_REQUEST)
            }
            GatewayError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, STATUS_INVALID_REQUEST),
            GatewayError::OcrFailed(_) => (StatusCode::UNPROCESSABLE_ENTITY, STATUS_OCR_ERROR),
            GatewayError::InferenceFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, STATUS_INFERENCE_ERROR)
            }
            GatewayError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, STATUS_INTERNAL_ERROR)
            }
        };

        if status.is_server_error() {
            error!(error = %self, "Prediction failed");
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, status_headers(credence_status), body).into_response()
    }
}
