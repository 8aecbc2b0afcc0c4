// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{EditError, Result};
use config::{Config, Environment, File};
use std::path::PathBuf;

/// Environment variables accepted as the Gemini credential when the
/// configuration does not set `gemini.api_key`, in lookup order.
pub const CREDENTIAL_ENV_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (`ROOMEDIT_` prefix, `__` between sections)
    /// 2. Config file (`~/.roomedit/config.toml`)
    /// 3. Defaults (lowest)
    ///
    /// The credential additionally falls back to `API_KEY` / `GEMINI_API_KEY`.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::default_config_path())?;
        if config.gemini.api_key().is_none() {
            config.gemini.api_key = CREDENTIAL_ENV_VARS
                .iter()
                .find_map(|name| std::env::var(name).ok());
        }
        Ok(config)
    }

    /// Load configuration from defaults, the given file (if it exists) and
    /// `ROOMEDIT_*` environment variables.
    pub fn load_from(path: &str) -> Result<Self> {
        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(File::with_name(path).required(false))
            // Override with environment variables (prefix: ROOMEDIT_)
            .add_source(
                Environment::with_prefix("ROOMEDIT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| EditError::Configuration(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| EditError::Configuration(e.to_string()))
    }

    /// Fails when the process cannot talk to Gemini at all.
    ///
    /// Called once at startup, before any request can be made.
    pub fn validate(&self) -> Result<()> {
        if self.gemini.api_key().is_none() {
            return Err(EditError::Configuration(
                "API_KEY environment variable is not set.".to_string(),
            ));
        }
        if self.gemini.model.trim().is_empty() {
            return Err(EditError::Configuration(
                "gemini.model must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".roomedit")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}
