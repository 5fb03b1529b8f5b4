//! Shared error type for the fundamental types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypeError {
    #[error("invalid account address: {0}")]
    InvalidAddress(String),

    // The seed itself is deliberately not echoed back.
    #[error("invalid seed format")]
    InvalidSeed,

    #[error("invalid currency code: {0}")]
    InvalidCurrency(String),
}
