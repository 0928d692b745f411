#![doc(test(attr(deny(warnings))))]

//! Grana Core tracks personal income and expense entries: a transaction
//! ledger with monthly and annual reports, installment schedules, and a
//! session-gated interactive CLI.

pub mod cli;
pub mod config;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod installment;
pub mod reports;
pub mod session;
pub mod store;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Grana Core tracing initialized.");
    });
}
