use super::types::{ErrorResponse, HealthResponse, InferenceResponse};
use crate::{
    Error,
    relay::{InferencePayload, Relay},
};
use axum::{
    body::Bytes,
    extract::{Path, State, rejection::BytesRejection},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, warn};

const PRODUCT_FALLBACK_ERROR: &str = "openfoodfacts proxy error";
const INFERENCE_FALLBACK_ERROR: &str = "hf proxy error";

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
}

fn api_error(err: Error, fallback: &str) -> ApiError {
    let status = err.status_code();
    if status.is_server_error() {
        error!("Request failed with {}: {}", status, err);
    } else {
        warn!("Request rejected with {}: {}", status, err);
    }
    (status, Json(ErrorResponse::new(err.to_string(), fallback)))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let health = state.relay.health();
    Json(HealthResponse {
        ok: true,
        hf_key: health.credential_configured,
        local_ai: health.local_server_url,
    })
}

pub async fn product(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let lookup = state
        .relay
        .lookup_product(&barcode)
        .await
        .map_err(|e| api_error(e, PRODUCT_FALLBACK_ERROR))?;

    Ok((lookup.status, Json(lookup.data)))
}

pub async fn inference(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<InferenceResponse>), ApiError> {
    let body = body.map_err(|rejection| {
        let err = Error::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        };
        api_error(err, INFERENCE_FALLBACK_ERROR)
    })?;

    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
    let payload = InferencePayload::from_body(content_type, body)
        .map_err(|e| api_error(e, INFERENCE_FALLBACK_ERROR))?;

    let inference = state
        .relay
        .infer(&payload)
        .await
        .map_err(|e| api_error(e, INFERENCE_FALLBACK_ERROR))?;

    Ok((
        inference.status,
        Json(InferenceResponse {
            source: inference.source,
            data: inference.data,
        }),
    ))
}
