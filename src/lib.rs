#![doc(test(attr(deny(warnings))))]

//! Nexus Manager keeps the books of a small consulting cabinet: client
//! receipts, expenses, progress against the annual target, printable payment
//! receipts, and follow-up of unpaid balances.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod documents;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Nexus Manager tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
