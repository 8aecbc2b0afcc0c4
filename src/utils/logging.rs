//! Structured logging and security-focused trace utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and providing utilities to prevent
//! the Gemini API key from leaking into logs or error messages.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `compact`: Single-line output, handy for the one-shot `edit` command.
/// - `pretty` (default): Human-readable, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    // Configure filter from environment or config file
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        "compact" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

/// Google API keys: "AIza" followed by 35 URL-safe characters.
const API_KEY_PREFIX: &str = "AIza";
const API_KEY_LEN: usize = 39;

/// Sanitizes Google API keys from log messages and upstream error bodies.
///
/// Every occurrence of an `AIza…` key is replaced with
/// `[REDACTED_API_KEY]`.
pub fn sanitize(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(API_KEY_PREFIX) {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        // Search for the end of the key (first non key character)
        let end = candidate
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            .unwrap_or(candidate.len());

        if end == API_KEY_LEN {
            result.push_str("[REDACTED_API_KEY]");
        } else {
            result.push_str(&candidate[..end]);
        }
        rest = &candidate[end..];
    }

    result.push_str(rest);
    result
}
