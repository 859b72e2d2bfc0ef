//! Service-to-service routes, guarded by the internal key
//!
//! - Issue: mint a token for an identity established elsewhere
//! - Revoke: force-expire a token by value
//! - Cleanup: purge expired ledger entries now

pub mod cleanup;
pub mod issue;
pub mod revoke;

pub use cleanup::cleanup;
pub use issue::issue_token;
pub use revoke::revoke_token;
