//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management
//! - The revocation ledger repository
//! - The embedded ledger schema

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::MySqlRevocationRepository;

/// Schema of the `revoked_tokens` table, applied by
/// [`DatabasePool::run_migrations`]
pub const REVOKED_TOKENS_SCHEMA: &str = include_str!("../../migrations/0001_revoked_tokens.sql");
