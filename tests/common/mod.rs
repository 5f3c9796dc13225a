#![allow(dead_code)]

mod mocks;

pub use mocks::MockUpstreamClient;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode},
};
use food_ai_relay::{
    config::Config,
    relay::Relay,
    server,
    upstream::{HttpUpstreamClient, UpstreamClient},
};
use secrecy::Secret;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

pub const TEST_KEY: &str = "hf_test_key";

/// Configuration pointing every upstream at the given base URLs.
pub fn test_config(product_url: &str, local_url: &str, cloud_url: &str) -> Config {
    let mut config = Config::default();
    config.upstreams.product_lookup_url = product_url.to_string();
    config.upstreams.local_ai_url = local_url.to_string();
    config.upstreams.cloud.base_url = cloud_url.to_string();
    config.upstreams.timeout_secs = 5;
    config
}

pub fn with_credential(mut config: Config) -> Config {
    config.upstreams.cloud.api_key = Some(Secret::new(TEST_KEY.to_string()));
    config
}

/// Router wired to a real HTTP client built from the config's upstream settings.
pub fn create_test_app(config: Config) -> Router {
    let client = HttpUpstreamClient::from_config(&config.upstreams).unwrap();
    create_test_app_with_client(config, Arc::new(client))
}

pub fn create_test_app_with_client(config: Config, client: Arc<dyn UpstreamClient>) -> Router {
    let config = Arc::new(config);
    let relay = Arc::new(Relay::new(config.clone(), client));
    server::router(relay, &config)
}

/// Base URL of a local port with nothing listening on it.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}
