use crate::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Picks the log filter: `RUST_LOG` when set and non-empty, else the
/// configured level. An unparseable `RUST_LOG` is an error, not ignored.
pub fn filter(rust_log: Option<&str>, configured_level: &str) -> Result<EnvFilter> {
    let directives = rust_log
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(configured_level);

    EnvFilter::builder()
        .parse(directives)
        .map_err(|e| Error::config(format!("Invalid log filter '{directives}': {e}")))
}

/// Installs the JSON subscriber used by the binary.
pub fn init(rust_log: Option<&str>, configured_level: &str) -> Result<()> {
    let filter = filter(rust_log, configured_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .try_init()
        .map_err(|e| Error::internal(format!("Failed to install tracing subscriber: {e}")))
}
