//! Domain entities representing core objects of the token lifecycle.

pub mod claim;
pub mod revocation;

// Re-export commonly used types
pub use claim::{AuthenticatedIdentity, IdentityClaim, Role, DEFAULT_TOKEN_TTL_DAYS};
pub use revocation::{Fingerprint, PurgeReport, RevocationRecord};
