pub mod config;
pub mod error;
pub mod logging;
pub mod relay;
pub mod server;
pub mod upstream;

pub use error::{Error, Result};
