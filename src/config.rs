use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

/// Application-level constants
pub const APP_NAME: &str = "Carepal";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Five minutes, same budget as a slow local generation.
pub const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 300;

pub const ENV_NEO4J_URI: &str = "NEO4J_URI";
pub const ENV_NEO4J_USER: &str = "NEO4J_USER";
pub const ENV_NEO4J_PASSWORD: &str = "NEO4J_PASSWORD";
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_GEMINI_MODEL: &str = "GEMINI_MODEL";
pub const ENV_GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";
pub const ENV_GEMINI_TIMEOUT_SECS: &str = "GEMINI_TIMEOUT_SECS";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "carepal_lib=info,carepal=info,warn"
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Connection settings for the adverse event graph.
pub struct GraphSettings {
    pub uri: String,
    pub user: String,
    pub password: Zeroizing<String>,
}

impl fmt::Debug for GraphSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphSettings")
            .field("uri", &self.uri)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Settings for the text-generation service.
pub struct GeminiSettings {
    pub api_key: Zeroizing<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug)]
pub struct AppConfig {
    pub graph: GraphSettings,
    pub gemini: GeminiSettings,
}

impl AppConfig {
    /// Load `.env` (if present) and read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenv::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };
        let optional = |name: &'static str, default: &str| -> String {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let timeout_secs = match lookup(ENV_GEMINI_TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                name: ENV_GEMINI_TIMEOUT_SECS,
                value: raw,
            })?,
            None => DEFAULT_GEMINI_TIMEOUT_SECS,
        };

        Ok(Self {
            graph: GraphSettings {
                uri: required(ENV_NEO4J_URI)?,
                user: required(ENV_NEO4J_USER)?,
                password: Zeroizing::new(required(ENV_NEO4J_PASSWORD)?),
            },
            gemini: GeminiSettings {
                api_key: Zeroizing::new(required(ENV_GEMINI_API_KEY)?),
                model: optional(ENV_GEMINI_MODEL, DEFAULT_GEMINI_MODEL),
                base_url: optional(ENV_GEMINI_BASE_URL, DEFAULT_GEMINI_BASE_URL),
                timeout_secs,
            },
        })
    }
}
