#![doc(test(attr(deny(warnings))))]

//! Merchant Core owns the merchant profile, the session flag and the payment
//! ledger behind a face-payment point-of-sale app, and derives the dashboard
//! figures the app renders.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
#[cfg(feature = "ffi")]
pub mod ffi;
pub mod storage;
pub mod utils;

pub use crate::core::account_manager::AccountManager;
pub use crate::errors::{MerchantError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Merchant Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
