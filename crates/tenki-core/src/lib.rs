pub mod config;
pub mod error;

pub use config::{BackendConfig, Config, ConfigIssue, LoggingConfig, ValidationResult};
pub use error::{AppError, ConfigError, ForecastServiceError, NetworkError, ReqwestErrorExt};

use anyhow::Result;

/// Initialize logging for the application.
///
/// `RUST_LOG` wins over the configured filter; with neither set, `info` is used.
/// Output goes to stderr so it never interleaves with rendered forecasts.
pub fn init(config: &Config) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().or_else(|_| {
        let directive = config.logging.filter.as_deref().unwrap_or("info");
        tracing_subscriber::EnvFilter::try_new(directive)
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    tracing::debug!("tenki core initialized");
    Ok(())
}
