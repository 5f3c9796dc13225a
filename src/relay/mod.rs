//! Route-level relay logic: which upstream to call and how its answer maps
//! back onto the caller's response.

mod payload;

pub use payload::InferencePayload;

use crate::{
    Error, Result,
    config::{CREDENTIAL_ENV, Config},
    upstream::{UpstreamClient, UpstreamRequest},
};
use axum::http::StatusCode;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Url;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped in a barcode.
const BARCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Which upstream produced an inference result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Local,
    Hf,
}

#[derive(Debug, Clone)]
pub struct ProductLookup {
    pub status: StatusCode,
    pub data: Value,
}

#[derive(Debug, Clone)]
pub struct Inference {
    pub status: StatusCode,
    pub source: Source,
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub credential_configured: bool,
    pub local_server_url: String,
}

pub struct Relay {
    config: Arc<Config>,
    client: Arc<dyn UpstreamClient>,
}

impl Relay {
    pub fn new(config: Arc<Config>, client: Arc<dyn UpstreamClient>) -> Self {
        Self { config, client }
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            credential_configured: self.config.has_credential(),
            local_server_url: self.config.upstreams.local_ai_url.clone(),
        }
    }

    pub fn product_url(&self, barcode: &str) -> Result<Url> {
        let base = &self.config.upstreams.product_lookup_url;
        let mut url = Url::parse(base)
            .map_err(|e| Error::config(format!("Invalid product lookup URL '{base}': {e}")))?;

        if url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "Product lookup URL '{base}' cannot be a base"
            )));
        }

        let path = format!(
            "{}/api/v0/product/{}.json",
            url.path().trim_end_matches('/'),
            utf8_percent_encode(barcode, BARCODE)
        );
        url.set_path(&path);

        Ok(url)
    }

    pub fn local_generate_url(&self) -> String {
        let base = &self.config.upstreams.local_ai_url;
        format!("{}/api/generate", base.strip_suffix('/').unwrap_or(base))
    }

    pub fn cloud_url(&self) -> String {
        let cloud = &self.config.upstreams.cloud;
        format!("{}/models/{}", cloud.base_url.trim_end_matches('/'), cloud.model)
    }

    /// Fetches a product record and hands back the upstream status and body as-is.
    pub async fn lookup_product(&self, barcode: &str) -> Result<ProductLookup> {
        let url = self.product_url(barcode)?;
        info!("Looking up product {}", barcode);

        let response = self.client.send(UpstreamRequest::get(url.as_str())).await?;
        let data = response.json()?;

        Ok(ProductLookup {
            status: response.status,
            data,
        })
    }

    /// Local server first; on any failure there, the cloud API if a credential
    /// is configured.
    pub async fn infer(&self, payload: &InferencePayload) -> Result<Inference> {
        match self.try_local(payload).await {
            Ok(data) => {
                info!("Inference served by local server");
                return Ok(Inference {
                    status: StatusCode::OK,
                    source: Source::Local,
                    data,
                });
            }
            Err(e) => debug!("Local inference unavailable, falling back: {}", e),
        }

        let api_key = self
            .config
            .upstreams
            .cloud
            .api_key
            .as_ref()
            .ok_or_else(|| Error::MissingCredential {
                credential: CREDENTIAL_ENV.to_string(),
            })?;

        self.call_cloud(api_key, payload).await
    }

    async fn try_local(&self, payload: &InferencePayload) -> Result<Value> {
        let request = UpstreamRequest::post_json(self.local_generate_url(), payload.to_bytes());
        let response = self.client.send(request).await?;

        if !response.is_success() {
            return Err(Error::UpstreamStatus(response.status));
        }

        response.json()
    }

    async fn call_cloud(
        &self,
        api_key: &Secret<String>,
        payload: &InferencePayload,
    ) -> Result<Inference> {
        info!("Forwarding inference to cloud model {}", self.config.upstreams.cloud.model);

        let request = UpstreamRequest::post_json(self.cloud_url(), payload.to_bytes())
            .with_bearer(api_key.expose_secret().as_str());
        let response = self.client.send(request).await?;
        let data = response.json()?;

        Ok(Inference {
            status: response.status,
            source: Source::Hf,
            data,
        })
    }
}
