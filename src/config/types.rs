use secrecy::Secret;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstreams: UpstreamsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub logs: LogsConfig,
    /// Directory served under `/proxy-static`.
    pub static_dir: String,
    /// Largest inbound request body accepted, in bytes.
    pub body_limit_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogsConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamsConfig {
    pub product_lookup_url: String,
    pub local_ai_url: String,
    pub cloud: CloudConfig,
    /// Outbound request timeout in seconds; `0` waits forever.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    pub base_url: String,
    pub api_key: Option<Secret<String>>,
    pub model: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
            static_dir: default_static_dir(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for UpstreamsConfig {
    fn default() -> Self {
        Self {
            product_lookup_url: default_product_lookup_url(),
            local_ai_url: default_local_ai_url(),
            cloud: CloudConfig::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            base_url: default_cloud_url(),
            api_key: None,
            model: default_model(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_static_dir() -> String {
    concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_string()
}

fn default_body_limit() -> usize {
    100 * 1024
}

fn default_product_lookup_url() -> String {
    "https://world.openfoodfacts.org".to_string()
}

fn default_local_ai_url() -> String {
    "http://127.0.0.1:5001".to_string()
}

fn default_cloud_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_model() -> String {
    "gpt2".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}
