use std::result::Result as StdResult;

use thiserror::Error;

/// Error type shared by the storage, configuration and ledger layers.
#[derive(Debug, Error)]
pub enum MerchantError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),
    #[error("Insufficient funds: requested {requested:.2}, available {available:.2}")]
    InsufficientFunds { requested: f64, available: f64 },
}

pub type Result<T> = StdResult<T, MerchantError>;
