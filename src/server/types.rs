use crate::relay::Source;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub hf_key: bool,
    pub local_ai: String,
}

#[derive(Debug, Serialize)]
pub struct InferenceResponse {
    pub source: Source,
    pub data: Value,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// Uses the error's message, or `fallback` when it has none.
    pub fn new(message: String, fallback: &str) -> Self {
        let error = if message.is_empty() {
            fallback.to_string()
        } else {
            message
        };
        Self { error }
    }
}
