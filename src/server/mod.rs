pub mod handlers;
pub mod types;

use crate::{
    Result,
    config::Config,
    relay::Relay,
    upstream::{HttpUpstreamClient, UpstreamClient},
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

/// Builds the HTTP surface around an already-constructed relay.
pub fn router(relay: Arc<Relay>, config: &Config) -> Router {
    let app_state = handlers::AppState { relay };

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/openfoodfacts/:barcode", get(handlers::product))
        .route("/api/ai", post(handlers::inference))
        .nest_service("/proxy-static", ServeDir::new(&config.server.static_dir))
        .layer(DefaultBodyLimit::max(config.server.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

pub async fn run(config: Config) -> Result<()> {
    let client: Arc<dyn UpstreamClient> =
        Arc::new(HttpUpstreamClient::from_config(&config.upstreams)?);

    let config = Arc::new(config);
    let relay = Arc::new(Relay::new(config.clone(), client));
    let app = router(relay, &config);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!(
        "Relay listening on {} (local AI: {}, cloud credential configured: {})",
        addr,
        config.upstreams.local_ai_url,
        config.has_credential()
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
