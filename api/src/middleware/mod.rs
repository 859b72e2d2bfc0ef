pub mod auth;
pub mod internal;

pub use auth::*;
pub use internal::*;
