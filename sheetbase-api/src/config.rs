//! API Configuration Module
//!
//! Server, remote store, CORS and logging settings. Configuration is loaded
//! from environment variables with defaults suited to local development and
//! validated once at startup.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sheetbase_core::{DEFAULT_ROW_LIMIT, MAX_ROW_LIMIT};
use thiserror::Error;

use crate::constants::{
    DEFAULT_BIND_HOST, DEFAULT_CORS_MAX_AGE_SECS, DEFAULT_PORT, DEFAULT_REGISTRY_PATH,
    DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_SHEETS_BASE_URL,
};

// ============================================================================
// ERRORS
// ============================================================================

/// Configuration errors. Raised at startup, never at request time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Missing required setting {key}")]
    MissingRequired { key: String },
}

impl ConfigError {
    fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// SETTINGS ENUMS
// ============================================================================

/// Which grid store implementation backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Google Sheets REST API
    Sheets,
    /// In-memory store (local development)
    Memory,
}

impl std::str::FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sheets" | "google" => Ok(Backend::Sheets),
            "memory" | "mock" => Ok(Backend::Memory),
            other => Err(ConfigError::invalid(
                "SHEETBASE_BACKEND",
                format!("unknown backend '{}', expected 'sheets' or 'memory'", other),
            )),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            other => Err(ConfigError::invalid(
                "SHEETBASE_LOG_FORMAT",
                format!("unknown format '{}', expected 'json' or 'pretty'", other),
            )),
        }
    }
}

// ============================================================================
// ACCESS TOKEN
// ============================================================================

/// Bearer token for the remote store that never shows up in logs.
#[derive(Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Expose the token (only for building the Authorization header).
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

// ============================================================================
// API CONFIGURATION
// ============================================================================

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    // ========================================================================
    // Server
    // ========================================================================
    pub bind_host: String,
    pub port: u16,
    /// Location of the title registry JSON file.
    pub registry_path: PathBuf,

    // ========================================================================
    // Remote store
    // ========================================================================
    pub backend: Backend,
    pub sheets_base_url: String,
    /// Required when `backend` is [`Backend::Sheets`].
    pub access_token: Option<AccessToken>,
    pub request_timeout: Duration,

    // ========================================================================
    // Reads
    // ========================================================================
    /// Row count used when a read does not pass `limit`.
    pub default_row_limit: usize,

    // ========================================================================
    // CORS
    // ========================================================================
    /// Allowed CORS origins. Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,
    pub cors_allow_credentials: bool,
    pub cors_max_age_secs: u64,

    // ========================================================================
    // Environment
    // ========================================================================
    /// Deployment environment (production, staging, development).
    pub environment: String,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_host: DEFAULT_BIND_HOST.to_string(),
            port: DEFAULT_PORT,
            registry_path: PathBuf::from(DEFAULT_REGISTRY_PATH),
            backend: Backend::Sheets,
            sheets_base_url: DEFAULT_SHEETS_BASE_URL.to_string(),
            access_token: None,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            default_row_limit: DEFAULT_ROW_LIMIT,
            cors_origins: Vec::new(),
            cors_allow_credentials: false,
            cors_max_age_secs: DEFAULT_CORS_MAX_AGE_SECS,
            environment: "development".to_string(),
            log_format: LogFormat::Json,
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `SHEETBASE_API_BIND`: Bind host (default: 127.0.0.1)
    /// - `PORT` / `SHEETBASE_API_PORT`: Bind port (default: 3333)
    /// - `SHEETBASE_REGISTRY_PATH`: Registry file (default: data/spreadsheetIDs.json)
    /// - `SHEETBASE_BACKEND`: "sheets" or "memory" (default: sheets)
    /// - `SHEETBASE_SHEETS_BASE_URL`: Remote base URL (default: https://sheets.googleapis.com/v4)
    /// - `SHEETBASE_ACCESS_TOKEN`: Bearer token for the remote store
    /// - `SHEETBASE_REQUEST_TIMEOUT_MS`: Remote call timeout (default: 30000)
    /// - `SHEETBASE_DEFAULT_ROW_LIMIT`: Rows returned without `limit` (default: 10)
    /// - `SHEETBASE_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    /// - `SHEETBASE_CORS_ALLOW_CREDENTIALS`: "true" or "false" (default: false)
    /// - `SHEETBASE_CORS_MAX_AGE_SECS`: Preflight cache duration (default: 86400)
    /// - `SHEETBASE_ENVIRONMENT`: Deployment environment (default: development)
    /// - `SHEETBASE_LOG_FORMAT`: "json" or "pretty" (default: json)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let port = match get("PORT").or_else(|| get("SHEETBASE_API_PORT")) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::invalid("PORT", format!("'{}' is not a port", raw)))?,
            None => defaults.port,
        };

        let backend = match get("SHEETBASE_BACKEND") {
            Some(raw) => raw.parse()?,
            None => defaults.backend,
        };

        let request_timeout = match get("SHEETBASE_REQUEST_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(parse_number("SHEETBASE_REQUEST_TIMEOUT_MS", &raw)?),
            None => defaults.request_timeout,
        };

        let default_row_limit = match get("SHEETBASE_DEFAULT_ROW_LIMIT") {
            Some(raw) => parse_number("SHEETBASE_DEFAULT_ROW_LIMIT", &raw)?,
            None => defaults.default_row_limit,
        };

        let cors_origins = get("SHEETBASE_CORS_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let cors_max_age_secs = match get("SHEETBASE_CORS_MAX_AGE_SECS") {
            Some(raw) => parse_number("SHEETBASE_CORS_MAX_AGE_SECS", &raw)?,
            None => defaults.cors_max_age_secs,
        };

        let log_format = match get("SHEETBASE_LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => defaults.log_format,
        };

        let config = Self {
            bind_host: get("SHEETBASE_API_BIND").unwrap_or(defaults.bind_host),
            port,
            registry_path: get("SHEETBASE_REGISTRY_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.registry_path),
            backend,
            sheets_base_url: get("SHEETBASE_SHEETS_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.sheets_base_url),
            access_token: get("SHEETBASE_ACCESS_TOKEN").map(AccessToken::new),
            request_timeout,
            default_row_limit,
            cors_origins,
            cors_allow_credentials: get("SHEETBASE_CORS_ALLOW_CREDENTIALS")
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(false),
            cors_max_age_secs,
            environment: get("SHEETBASE_ENVIRONMENT").unwrap_or(defaults.environment),
            log_format,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend == Backend::Sheets && self.access_token.is_none() {
            return Err(ConfigError::MissingRequired {
                key: "SHEETBASE_ACCESS_TOKEN".to_string(),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::invalid(
                "SHEETBASE_REQUEST_TIMEOUT_MS",
                "must be greater than zero",
            ));
        }
        if self.default_row_limit == 0 || self.default_row_limit > MAX_ROW_LIMIT {
            return Err(ConfigError::invalid(
                "SHEETBASE_DEFAULT_ROW_LIMIT",
                format!("must be between 1 and {}", MAX_ROW_LIMIT),
            ));
        }
        if self.is_production() && self.cors_origins.is_empty() {
            return Err(ConfigError::invalid(
                "SHEETBASE_CORS_ORIGINS",
                "CORS origins must be configured in production",
            ));
        }
        Ok(())
    }

    /// Check if running in a production environment.
    pub fn is_production(&self) -> bool {
        matches!(self.environment.to_lowercase().as_str(), "production" | "prod")
    }

    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.bind_host, self.port);
        addr.parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid("SHEETBASE_API_BIND", format!("{}: {}", addr, e)))
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.parse::<T>()
        .map_err(|_| ConfigError::invalid(key, format!("'{}' is not a number", raw)))
}
