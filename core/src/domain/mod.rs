//! Domain layer containing the token and ledger entities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;
