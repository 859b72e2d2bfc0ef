//! Shared configuration and common types for TokenGate server crates
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types and the layered loader
//! - Response envelope types shared by the HTTP layer

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CleanupConfig, ConfigError, DatabaseConfig, Environment,
    LoggingConfig, Secret, ServerConfig,
};
pub use types::{ErrorResponse, HealthResponse, HealthStatus};
