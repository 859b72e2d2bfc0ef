pub mod revocation;

pub use revocation::{
    FailingRevocationRepository, InMemoryRevocationRepository, RevocationRepository,
};
