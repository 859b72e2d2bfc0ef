//! MySQL repository implementations

mod revocation_repository_impl;

pub use revocation_repository_impl::MySqlRevocationRepository;
