//! Transaction building errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TxError {
    #[error("ticket {sequence} does not exist on the ledger for this account")]
    TicketNotFound { sequence: u32 },

    #[error("invalid currency code: {0}")]
    InvalidCurrency(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}
