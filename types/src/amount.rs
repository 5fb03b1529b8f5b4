//! Issued-token amounts in their wire shape.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::AccountAddress;
use crate::currency::CurrencyCode;

/// An issued-token amount: currency, issuer, and the decimal value exactly
/// as it travels on the wire.
///
/// The value stays a string here; arithmetic happens on parsed decimals in
/// the reconciliation layer so the wire form is never reformatted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAmount {
    pub currency: CurrencyCode,
    pub issuer: AccountAddress,
    pub value: String,
}

impl TokenAmount {
    pub fn new(
        currency: CurrencyCode,
        issuer: AccountAddress,
        value: impl Into<String>,
    ) -> Self {
        Self {
            currency,
            issuer,
            value: value.into(),
        }
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.value, self.currency, self.issuer)
    }
}
