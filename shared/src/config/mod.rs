//! Configuration module with one sub-module per concern:
//! - `auth` - token secret, lifetime and internal service key
//! - `cleanup` - revocation ledger purge schedule
//! - `database` - ledger database connection and pool configuration
//! - `environment` - environment detection and logging configuration
//! - `server` - HTTP server configuration

pub mod auth;
pub mod cleanup;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::{AuthConfig, Secret};
pub use cleanup::CleanupConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use server::ServerConfig;

/// Prefix for layered environment overrides, e.g. `TG__AUTH__SECRET`
pub const ENV_PREFIX: &str = "TG";

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub cleanup: CleanupConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load layered configuration: built-in defaults, then the optional
    /// `config.<environment>.toml` file, then `TG__SECTION__KEY` variables.
    pub fn load() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();

        let settings = config::Config::builder()
            .set_default("logging.level", LoggingConfig::for_environment(environment).level)?
            .add_source(
                config::File::new(environment.config_file(), config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("environment", environment.to_string())?
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would be unsafe to serve traffic with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.secret.is_empty() {
            return Err(ConfigError::Invalid("token secret must not be empty".into()));
        }
        if self.environment.is_production() && self.auth.is_using_default_secret() {
            return Err(ConfigError::Invalid(
                "the placeholder token secret cannot be used in production".into(),
            ));
        }
        if self.auth.token_ttl_seconds <= 0 {
            return Err(ConfigError::Invalid("token lifetime must be positive".into()));
        }
        if self.auth.token_ttl_seconds > auth::MAX_TOKEN_TTL_SECONDS {
            return Err(ConfigError::Invalid(format!(
                "token lifetime must be at most {} seconds",
                auth::MAX_TOKEN_TTL_SECONDS
            )));
        }
        if self.cleanup.enabled && self.cleanup.interval_seconds == 0 {
            return Err(ConfigError::Invalid("cleanup interval must be positive".into()));
        }
        if self.cleanup.interval_seconds > cleanup::MAX_CLEANUP_INTERVAL_SECONDS {
            return Err(ConfigError::Invalid(format!(
                "cleanup interval must be at most {} seconds",
                cleanup::MAX_CLEANUP_INTERVAL_SECONDS
            )));
        }
        Ok(())
    }
}
