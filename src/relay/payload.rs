use crate::{Error, Result};
use axum::body::Bytes;
use serde_json::Value;

/// Opaque JSON body of an inference request, forwarded upstream untouched.
#[derive(Debug, Clone)]
pub struct InferencePayload(Bytes);

impl InferencePayload {
    /// Accepts a JSON object or array when the body is declared as JSON.
    /// Anything not declared as JSON, and an empty body, becomes `{}`.
    pub fn from_body(content_type: Option<&str>, body: Bytes) -> Result<Self> {
        if !content_type.is_some_and(is_json) || body.is_empty() {
            return Ok(Self::empty());
        }

        let value: Value = serde_json::from_slice(&body)
            .map_err(|e| Error::bad_request(format!("Invalid JSON body: {e}")))?;

        if !(value.is_object() || value.is_array()) {
            return Err(Error::bad_request("JSON body must be an object or array"));
        }

        Ok(Self(body))
    }

    pub fn empty() -> Self {
        Self(Bytes::from_static(b"{}"))
    }

    pub fn to_bytes(&self) -> Bytes {
        self.0.clone()
    }
}

fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}
