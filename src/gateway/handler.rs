use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{FromRequest, Multipart, Request, State, multipart::MultipartError},
    http::{HeaderMap, HeaderValue, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::error::GatewayError;
use super::state::HandlerState;
use super::{STATUS_HEADER, STATUS_SCORED};
use crate::ocr::TextRecognizer;
use crate::pipeline::PredictRequest;
use crate::scoring::ScoreResult;

/// URL-encoded variant of the `/predict` form (no image upload possible).
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PredictForm {
    #[serde(default)]
    text: String,
    #[serde(default)]
    source: String,
}

#[instrument(skip(state, request), fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn predict_handler<R>(
    State(state): State<HandlerState<R>>,
    request: Request,
) -> Result<Response, GatewayError>
where
    R: TextRecognizer + 'static,
{
    let predict_request = decode_request(request).await?;

    let pipeline = Arc::clone(&state.pipeline);
    let result = tokio::task::spawn_blocking(move || pipeline.predict(predict_request))
        .await
        .map_err(|e| GatewayError::InternalError(format!("prediction task failed: {}", e)))??;

    info!(
        prob_fake = result.prob_fake,
        pred_label = result.pred_label.as_u8(),
        final_score = result.final_score,
        "Prediction complete"
    );

    Ok(scored_response(result))
}

pub(crate) fn scored_response(result: ScoreResult) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(STATUS_HEADER, HeaderValue::from_static(STATUS_SCORED));
    (StatusCode::OK, headers, Json(result)).into_response()
}

/// Decodes the body by content type. A request without a body is treated as an
/// empty form, which ends in "No text found".
pub(crate) async fn decode_request(request: Request) -> Result<PredictRequest, GatewayError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase());

    match content_type.as_deref() {
        Some(ct) if ct.starts_with("multipart/form-data") => {
            let multipart = Multipart::from_request(request, &())
                .await
                .map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;
            read_multipart(multipart).await
        }
        Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => {
            let Form(form) = Form::<PredictForm>::from_request(request, &())
                .await
                .map_err(|e| match e.status() {
                    StatusCode::PAYLOAD_TOO_LARGE => GatewayError::PayloadTooLarge,
                    _ => GatewayError::InvalidRequest(e.body_text()),
                })?;
            Ok(form_to_request(form.text, form.source, None))
        }
        Some(other) => Err(GatewayError::UnsupportedMediaType(other.to_string())),
        None => Ok(PredictRequest::default()),
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<PredictRequest, GatewayError> {
    let mut text = String::new();
    let mut source = String::new();
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("text") => text = field.text().await.map_err(multipart_error)?,
            Some("source") => source = field.text().await.map_err(multipart_error)?,
            Some("image") => {
                let bytes = field.bytes().await.map_err(multipart_error)?;
                debug!(image_bytes = bytes.len(), "Received image upload");
                image = Some(bytes.to_vec());
            }
            other => debug!(field = ?other, "Ignoring unknown form field"),
        }
    }

    Ok(form_to_request(text, source, image))
}

/// Maps raw form values to optional fields. Only an empty string (or a
/// zero-length image) counts as absent; a whitespace-only source is still a
/// source and scores as untrusted.
pub(crate) fn form_to_request(
    text: String,
    source: String,
    image: Option<Vec<u8>>,
) -> PredictRequest {
    PredictRequest {
        text: (!text.is_empty()).then_some(text),
        source: (!source.is_empty()).then_some(source),
        image: image.filter(|bytes| !bytes.is_empty()),
    }
}

fn multipart_error(err: MultipartError) -> GatewayError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        GatewayError::PayloadTooLarge
    } else {
        GatewayError::InvalidRequest(err.body_text())
    }
}
