//! Token issuance and verification
//!
//! - `codec`: the `<payload>.<signature>` wire format
//! - `signer`: HMAC-SHA256 signing, issuance and verification
//! - `config`: secret and default lifetime

mod codec;
mod config;
mod signer;


pub use codec::{TokenCodec, TokenParts, MAX_TOKEN_LEN, SEPARATOR};
pub use config::TokenServiceConfig;
pub use signer::{IssuedToken, TokenSigner};
