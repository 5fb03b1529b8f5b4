//! Trust-line specific errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LineError {
    #[error("account {account} is not a party to this trust line")]
    NotAParty { account: String },

    #[error("invalid decimal value {value:?} in field {field}")]
    BadValue { field: &'static str, value: String },
}
