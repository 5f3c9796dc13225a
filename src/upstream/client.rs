use super::types::*;
use crate::{Error, Result, config::UpstreamsConfig};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;

/// Outbound HTTP seam used by the relay.
///
/// A non-success status is not an error here; only transport failures are.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse>;
}

pub struct HttpUpstreamClient {
    client: reqwest::Client,
}

impl HttpUpstreamClient {
    /// Builds the client. Failing here means the process has no usable
    /// outbound HTTP capability.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| Error::transport(e.to_string()))?;

        Ok(Self { client })
    }

    pub fn from_config(config: &UpstreamsConfig) -> Result<Self> {
        Self::new(config.timeout())
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse> {
        debug!("Sending {} {}", request.method, request.url);

        let mut req_builder = self.client.request(request.method, &request.url);

        if let Some(token) = &request.bearer_token {
            req_builder = req_builder.bearer_auth(token);
        }

        if let Some(body) = request.body {
            req_builder = req_builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = req_builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!("Upstream {} answered {} ({} bytes)", request.url, status, body.len());

        Ok(UpstreamResponse { status, body })
    }
}
