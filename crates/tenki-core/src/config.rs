use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Backend used when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "https://nextjs-flask-weather-backend.onrender.com";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const ENV_BACKEND_URL: &str = "TENKI_BACKEND_URL";
const ENV_REQUEST_TIMEOUT: &str = "TENKI_REQUEST_TIMEOUT_SECS";

/// One problem found in a config key such as `backend.base_url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub key: &'static str,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// Outcome of [`Config::validate`]. Errors stop startup; warnings are logged.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigIssue>,
    pub warnings: Vec<ConfigIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, key: &'static str, message: impl Into<String>) {
        self.errors.push(ConfigIssue {
            key,
            message: message.into(),
        });
    }

    fn warn(&mut self, key: &'static str, message: impl Into<String>) {
        self.warnings.push(ConfigIssue {
            key,
            message: message.into(),
        });
    }

    /// Every error on one line; this is the message tenki exits with.
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(ConfigIssue::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Forecast backend settings
    #[serde(default)]
    pub backend: BackendConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the forecast backend; `/api/areainfo/{id}` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. An expired request counts as a transport failure.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `"tenki_ui=debug"`.
    /// `RUST_LOG` takes precedence when set.
    #[serde(default)]
    pub filter: Option<String>,
}

impl Config {
    /// Load configuration: defaults, then the config file if present, then
    /// environment overrides. The file is never created or written.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Validate, logging warnings and failing on errors.
    ///
    /// Call after logging is initialized so warnings are not lost.
    pub fn ensure_valid(&self) -> Result<ValidationResult> {
        let validation = self.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(validation)
    }

    /// Parse a TOML config file. Missing sections and keys fall back to defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Apply `TENKI_*` overrides using `lookup` to read variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BACKEND_URL).filter(|v| !v.trim().is_empty()) {
            self.backend.base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT) {
            self.backend.request_timeout_secs = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds", ENV_REQUEST_TIMEOUT))?;
        }

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        validate_url(&self.backend.base_url, "backend.base_url", &mut result);

        if self.backend.request_timeout_secs == 0 {
            result.error(
                "backend.request_timeout_secs",
                "Request timeout must be greater than 0",
            );
        } else if self.backend.request_timeout_secs > 300 {
            result.warn(
                "backend.request_timeout_secs",
                "Request timeout is unusually long (>300s)",
            );
        }

        result
    }

    /// Path of the optional config file, `$CONFIG_DIR/tenki/config.toml`.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tenki").join("config.toml"))
    }
}

fn validate_url(raw: &str, key: &'static str, result: &mut ValidationResult) {
    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(e) => {
            result.error(key, format!("Invalid URL: {}", e));
            return;
        }
    };

    match url.scheme() {
        "https" => {}
        "http" => result.warn(key, "Backend URL is not using https"),
        other => result.error(key, format!("URL must use http or https scheme, got: {}", other)),
    }
    if url.host().is_none() {
        result.error(key, "URL must have a host");
    }
    if url.query().is_some() {
        result.error(key, "URL must not carry a query string");
    }
}
