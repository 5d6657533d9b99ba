//! Client configuration structs
//!
//! Loads configuration from environment variables and an optional `.env` file.

use serde::de::{value, IntoDeserializer};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Main client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub sync: SyncConfig,
    pub csrf: CsrfConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Parse a case-insensitive environment name
    pub fn parse(s: &str) -> Option<Self> {
        let name: value::StringDeserializer<value::Error> =
            s.trim().to_lowercase().into_deserializer();
        Self::deserialize(name).ok()
    }
}

/// Backend the client talks to
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Origin of the social-network backend, without trailing slash
    pub base_url: String,
}

impl ServerConfig {
    /// Join a route path onto the base URL
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Reaction synchronization tuning
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Upper bound for a single backend request
    pub request_timeout: Duration,
    /// Capacity of the reaction event channel
    pub event_buffer: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            event_buffer: default_event_buffer(),
        }
    }
}

/// Where the CSRF token is read from and sent as
#[derive(Debug, Clone)]
pub struct CsrfConfig {
    pub cookie_name: String,
    pub header_name: String,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_csrf_cookie_name(),
            header_name: default_csrf_header_name(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "reaction-client".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_millis(10_000)
}

fn default_event_buffer() -> usize {
    256
}

fn default_csrf_cookie_name() -> String {
    "csrftoken".to_string()
}

fn default_csrf_header_name() -> String {
    "X-CSRFToken".to_string()
}

impl ClientConfig {
    /// Build a configuration with defaults for everything but the backend URL
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: Environment::default(),
            },
            server: ServerConfig {
                base_url: base_url.into().trim_end_matches('/').to_string(),
            },
            sync: SyncConfig::default(),
            csrf: CsrfConfig::default(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if `REACTIONS_BASE_URL` is missing or a value does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("REACTIONS_BASE_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingVar("REACTIONS_BASE_URL"))?;
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue("REACTIONS_BASE_URL", base_url));
        }

        let request_timeout = parse_positive(&lookup, "REACTIONS_REQUEST_TIMEOUT_MS")?
            .map_or_else(default_request_timeout, Duration::from_millis);
        let event_buffer = parse_positive(&lookup, "REACTIONS_EVENT_BUFFER")?
            .map_or_else(default_event_buffer, |n| n as usize);

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            server: ServerConfig { base_url },
            sync: SyncConfig {
                request_timeout,
                event_buffer,
            },
            csrf: CsrfConfig {
                cookie_name: lookup("CSRF_COOKIE_NAME").unwrap_or_else(default_csrf_cookie_name),
                header_name: lookup("CSRF_HEADER_NAME").unwrap_or_else(default_csrf_header_name),
            },
        })
    }
}

/// Optional strictly positive integer; present but unparsable or zero is an error
fn parse_positive<F>(lookup: &F, key: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(ConfigError::InvalidValue(key, raw)),
        },
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
