mod types;

pub use types::*;

use crate::{Error, Result};
use reqwest::Url;
use secrecy::Secret;
use std::{env, time::Duration};
use tracing::debug;

/// Name of the environment variable holding the cloud credential, as reported
/// to callers when it is missing.
pub const CREDENTIAL_ENV: &str = "HF_API_KEY";

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Builds the process configuration: defaults, then the YAML file named by
/// `CONFIG_PATH` if any, then environment overrides.
pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").ok().filter(|path| !path.is_empty());
    load_with(config_path.as_deref(), |key| env::var(key).ok()).await
}

pub async fn load_with<F>(config_path: Option<&str>, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match config_path {
        Some(path) => {
            debug!("Loading configuration from: {}", path);
            let config_str = tokio::fs::read_to_string(path).await?;
            serde_yaml::from_str(&config_str)?
        }
        None => Config::default(),
    };

    config.apply_env(lookup)?;
    config.validate()?;

    Ok(config)
}

impl Config {
    /// Overlays environment values. Empty values are treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |keys: &[&str]| {
            keys.iter()
                .copied()
                .filter_map(&lookup)
                .find(|value| !value.is_empty())
        };

        if let Some(key) = get(&[CREDENTIAL_ENV, "VITE_HF_API_KEY"]) {
            self.upstreams.cloud.api_key = Some(Secret::new(key));
        }
        if let Some(model) = get(&["HF_MODEL", "VITE_HF_MODEL"]) {
            self.upstreams.cloud.model = model;
        }
        if let Some(url) = get(&["HF_API_URL"]) {
            self.upstreams.cloud.base_url = url;
        }
        if let Some(url) = get(&["LOCAL_AI_URL"]) {
            self.upstreams.local_ai_url = url;
        }
        if let Some(url) = get(&["PRODUCT_LOOKUP_URL"]) {
            self.upstreams.product_lookup_url = url;
        }
        if let Some(host) = get(&["HOST"]) {
            self.server.host = host;
        }
        if let Some(dir) = get(&["STATIC_DIR"]) {
            self.server.static_dir = dir;
        }
        if let Some(level) = get(&["LOG_LEVEL"]) {
            self.server.logs.level = level;
        }
        if let Some(port) = get(&["PORT"]) {
            self.server.port = port
                .parse()
                .map_err(|_| Error::config(format!("Invalid PORT '{port}'")))?;
        }
        if let Some(secs) = get(&["UPSTREAM_TIMEOUT_SECS"]) {
            self.upstreams.timeout_secs = secs
                .parse()
                .map_err(|_| Error::config(format!("Invalid UPSTREAM_TIMEOUT_SECS '{secs}'")))?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::config("port must be between 1 and 65535"));
        }
        if !LOG_LEVELS.contains(&self.server.logs.level.to_lowercase().as_str()) {
            return Err(Error::config(format!(
                "Invalid log level: '{}'. Valid levels: {}",
                self.server.logs.level,
                LOG_LEVELS.join(", ")
            )));
        }

        for (name, url) in [
            ("product lookup", &self.upstreams.product_lookup_url),
            ("local inference", &self.upstreams.local_ai_url),
            ("cloud inference", &self.upstreams.cloud.base_url),
        ] {
            Url::parse(url)
                .map_err(|e| Error::config(format!("Invalid {name} URL '{url}': {e}")))?;
        }

        if self.upstreams.cloud.model.is_empty() {
            return Err(Error::config("cloud model name must not be empty"));
        }

        Ok(())
    }

    pub fn has_credential(&self) -> bool {
        self.upstreams.cloud.api_key.is_some()
    }
}

impl UpstreamsConfig {
    /// Outbound request timeout; `None` when `timeout_secs` is `0`.
    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
