//! Bearer-authenticated routes
//!
//! - Logout: revokes the presented token
//! - Me: echoes the authenticated identity

pub mod logout;
pub mod me;

pub use logout::logout;
pub use me::me;
