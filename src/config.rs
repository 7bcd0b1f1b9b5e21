// src/config.rs
use std::time::Duration;

use axum::http::HeaderValue;
use thiserror::Error;

pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
pub const LOOPBACK_ORIGIN: &str = "http://127.0.0.1:5173";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1/";
pub const DEFAULT_ENV: &str = "development";
const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;

/// The environment name, `development` when `ENV` is unset or blank.
pub fn environment_name(raw: Option<String>) -> String {
    raw.map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_ENV.to_string())
}

/// Only local development reads a `.env` file.
pub fn should_load_dotenv(env: &str) -> bool {
    env == DEFAULT_ENV
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "GROQ_API_KEY is missing! Set it in .env for local dev or in your deployment environment variables."
    )]
    MissingApiKey,
    #[error("PORT must be a valid port number, got '{0}'")]
    InvalidPort(String),
    #[error("SESSION_TTL_SECS must be a whole number of seconds, got '{0}'")]
    InvalidSessionTtl(String),
    #[error("'{0}' is not a valid CORS origin")]
    InvalidOrigin(String),
}

/// Process-wide settings, read once at startup and never mutated.
#[derive(Clone)]
pub struct Config {
    pub env: String,
    pub groq_api_key: String,
    pub groq_model: String,
    pub groq_base_url: String,
    pub frontend_url: String,
    pub port: u16,
    pub session_ttl: Duration,
    pub admin_api_key: Option<String>,
}

// Keep secrets out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("env", &self.env)
            .field("groq_model", &self.groq_model)
            .field("groq_base_url", &self.groq_base_url)
            .field("frontend_url", &self.frontend_url)
            .field("port", &self.port)
            .field("session_ttl", &self.session_ttl)
            .field("admin_api_key", &self.admin_api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// In the `development` environment (the default) a local `.env` file is
    /// loaded first; a missing file is not an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env = environment_name(std::env::var("ENV").ok());
        if should_load_dotenv(&env) {
            if let Err(e) = dotenvy::dotenv() {
                tracing::debug!(error = %e, "no .env file loaded");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset.
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let groq_api_key = get("GROQ_API_KEY").ok_or(ConfigError::MissingApiKey)?;

        let port = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let session_ttl = match get("SESSION_TTL_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse()
                    .map_err(|_| ConfigError::InvalidSessionTtl(raw))?,
            ),
            None => Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        };

        Ok(Self {
            env: environment_name(lookup("ENV")),
            groq_api_key,
            groq_model: get("GROQ_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            groq_base_url: get("GROQ_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            frontend_url: get("FRONTEND_URL").unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
            port,
            session_ttl,
            admin_api_key: get("ADMIN_API_KEY"),
        })
    }

    /// Origins the browser frontend may call from: the configured frontend
    /// plus the fixed loopback dev origin.
    pub fn allowed_origins(&self) -> Result<Vec<HeaderValue>, ConfigError> {
        [self.frontend_url.as_str(), LOOPBACK_ORIGIN]
            .into_iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
            })
            .collect()
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
