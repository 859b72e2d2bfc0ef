//! Revocation ledger and its scheduled garbage collection

mod ledger;
mod scheduler;

pub use ledger::RevocationLedger;
pub use scheduler::{RevocationScheduler, SchedulerConfig, SchedulerHandle};

#[cfg(test)]
mod tests;
