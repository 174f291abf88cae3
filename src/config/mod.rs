//! Configuration management module.
//!
//! Supports loading configuration from:
//! - TOML files (config/default.toml, config/{profile}.toml)
//! - A `.env` file in the working directory
//! - Environment variables with `RANDTOKEN_WORKER__<SECTION>__<KEY>` pattern

mod generator;
mod server;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub use generator::{DEFAULT_TOKEN_LENGTH, GeneratorConfig, MAX_TOKEN_LENGTH};
pub use server::ServerConfig;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Token generation configuration.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. `config/default.toml`
    /// 2. `config/{RANDTOKEN_PROFILE}.toml` (if `RANDTOKEN_PROFILE` is set)
    /// 3. Environment variables with `RANDTOKEN_WORKER__` prefix
    ///
    /// Variables from a `.env` file are exported before step 3.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env is fine
        let _ = dotenvy::dotenv();

        let profile =
            std::env::var("RANDTOKEN_PROFILE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{profile}")).required(false))
            // RANDTOKEN_WORKER__SERVER__PORT=8080 -> server.port = 8080
            .add_source(
                Environment::with_prefix("RANDTOKEN_WORKER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("server.port cannot be 0".to_string()));
        }

        self.generator.validate()?;

        Ok(())
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "text" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Install the Prometheus recorder behind `/metrics`.
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

const fn default_metrics_enabled() -> bool {
    true
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            metrics_enabled: default_metrics_enabled(),
        }
    }
}
