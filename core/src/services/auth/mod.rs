//! Per-request authentication
//!
//! Extracts the bearer credential, verifies it, and consults the revocation
//! ledger before handing an identity downstream.

mod gate;

#[cfg(test)]
mod tests;

pub use gate::{extract_bearer, AuthGate, Unauthenticated, BEARER_SCHEME};
