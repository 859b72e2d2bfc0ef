pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod failing;
pub mod memory;

pub use failing::FailingRevocationRepository;
pub use memory::InMemoryRevocationRepository;
pub use r#trait::RevocationRepository;
