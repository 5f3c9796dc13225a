use anyhow::Result;
use food_ai_relay::{config, logging, server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // RUST_LOG overrides the configured level
    let rust_log = std::env::var("RUST_LOG").ok();
    if let Err(e) = logging::init(rust_log.as_deref(), &config.server.logs.level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    info!("Starting food AI relay with log level: {}", config.server.logs.level);

    server::run(config).await?;

    Ok(())
}
