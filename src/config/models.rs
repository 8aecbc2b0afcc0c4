//! Configuration data structures for roomedit.
//!
//! This module defines the schema for the application settings: the HTTP
//! server, the upstream Gemini API connection and logging.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::vision::models::MAX_IMAGE_SIZE_BYTES;
use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, upload limit).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream Gemini API settings, including the credential.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8080`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted request body for uploads, in bytes.
    /// Default: the inline image limit plus 1 MiB for the form envelope.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

/// Settings for the upstream Gemini API connection.
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key sent as `x-goog-api-key`. Required.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL for the Gemini API.
    /// Default: `https://generativelanguage.googleapis.com/v1beta`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Image-capable model used for every edit.
    /// Default: `gemini-2.5-flash-image`
    #[serde(default = "default_model")]
    pub model: String,

    /// Optional request timeout in seconds. Unset means the transport default.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl GeminiConfig {
    /// Returns the configured credential, or `None` when it is missing or blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

// Keep the credential out of debug output
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_base_url", &self.api_base_url)
            .field("model", &self.model)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: default_api_base_url(),
            model: default_model(),
            timeout_seconds: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Helper functions for serde defaults
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_upload_bytes() -> usize {
    MAX_IMAGE_SIZE_BYTES + 1024 * 1024
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
