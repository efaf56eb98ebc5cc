//! Configuration loading and representation.
//!
//! All settings come from environment variables and are read once at startup.
//! Loaders take a lookup function so tests never touch the process environment.

use std::time::Duration;

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Settings for the HTTP inference client.
#[derive(Clone)]
pub struct InferenceConfig {
    pub api_key: String,
    pub model: String,
    /// Scheme + host (+ optional path prefix), without a trailing slash.
    pub base_url: String,
    pub timeout: Duration,
}

impl InferenceConfig {
    pub const DEFAULT_MODEL: &'static str = "gpt-4.1-mini";
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: Self::DEFAULT_MODEL.to_string(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `OPENAI_API_KEY` (required), `OPENAI_MODEL`, `OPENAI_BASE_URL`, `OPENAI_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = non_empty(lookup("OPENAI_API_KEY")).ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;
        let mut config = Self::new(api_key);

        if let Some(model) = non_empty(lookup("OPENAI_MODEL")) {
            config = config.with_model(model);
        }
        if let Some(base_url) = non_empty(lookup("OPENAI_BASE_URL")) {
            config = config.with_base_url(base_url);
        }
        if let Some(raw) = non_empty(lookup("OPENAI_TIMEOUT_SECS")) {
            let secs: u64 = raw.parse().map_err(|e| ConfigError::Invalid {
                name: "OPENAI_TIMEOUT_SECS",
                reason: format!("{e}"),
            })?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    name: "OPENAI_TIMEOUT_SECS",
                    reason: "must be greater than zero".to_string(),
                });
            }
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

// Hand-written so the API key never reaches logs.
impl core::fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Settings for the HTTP server process.
#[derive(Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub jwt_secret: String,
    /// Browser origins allowed by CORS (exact match).
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    pub const DEFAULT_BIND_ADDR: &'static str = "0.0.0.0:8080";
    /// Local frontend dev server.
    pub const DEFAULT_CORS_ORIGIN: &'static str = "http://localhost:5173";
    const DEV_JWT_SECRET: &'static str = "dev-secret";

    /// Defaults for everything except the JWT secret.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            bind_addr: Self::DEFAULT_BIND_ADDR.to_string(),
            jwt_secret: jwt_secret.into(),
            cors_origins: vec![Self::DEFAULT_CORS_ORIGIN.to_string()],
        }
    }

    /// `BIND_ADDR`, `JWT_SECRET` (falls back to an insecure dev default with a warning),
    /// `CLIENT_URL` (comma-separated origins added to the CORS allowlist).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let jwt_secret = non_empty(lookup("JWT_SECRET")).unwrap_or_else(|| {
            warn!("JWT_SECRET not set; using insecure dev default");
            Self::DEV_JWT_SECRET.to_string()
        });
        let mut config = Self::new(jwt_secret);

        if let Some(bind_addr) = non_empty(lookup("BIND_ADDR")) {
            config.bind_addr = bind_addr;
        }
        if let Some(raw) = non_empty(lookup("CLIENT_URL")) {
            for origin in raw.split(',').map(|o| o.trim().trim_end_matches('/')) {
                if !origin.is_empty() && !config.cors_origins.iter().any(|o| o == origin) {
                    config.cors_origins.push(origin.to_string());
                }
            }
        }
        config
    }
}

impl core::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("jwt_secret", &"<redacted>")
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
