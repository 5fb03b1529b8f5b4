//! Currency codes for issued tokens.
//!
//! Two forms exist on the wire: the standard three-character code (`USD`)
//! and the 40-hex-digit nonstandard form. The native asset has no currency
//! code and can never appear on a trust line.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypeError;

/// A trust-line currency code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parse and validate a user-supplied currency code.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypeError> {
        let s = raw.into();
        if !is_valid_currency(&s) {
            return Err(TypeError::InvalidCurrency(s));
        }
        Ok(Self(s))
    }

    /// Wrap a ledger-reported code without re-validating.
    pub fn unchecked(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_valid(&self) -> bool {
        is_valid_currency(&self.0)
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate a currency code: either three ASCII alphanumerics (and not the
/// reserved native code `XRP`), or forty hex digits that are not all zero.
pub fn is_valid_currency(s: &str) -> bool {
    match s.len() {
        3 => s.bytes().all(|b| b.is_ascii_alphanumeric()) && s != "XRP",
        40 => {
            s.bytes().all(|b| b.is_ascii_hexdigit()) && !s.bytes().all(|b| b == b'0')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_codes() {
        assert!(is_valid_currency("USD"));
        assert!(is_valid_currency("eur"));
        assert!(is_valid_currency("B2C"));
    }

    #[test]
    fn native_code_is_reserved() {
        assert!(!is_valid_currency("XRP"));
    }

    #[test]
    fn hex_codes() {
        assert!(is_valid_currency(
            "524C555344000000000000000000000000000000"
        ));
        assert!(!is_valid_currency(
            "0000000000000000000000000000000000000000"
        ));
    }

    #[test]
    fn bad_lengths_and_charset() {
        assert!(!is_valid_currency(""));
        assert!(!is_valid_currency("US"));
        assert!(!is_valid_currency("USDT"));
        assert!(!is_valid_currency("U$D"));
    }

    #[test]
    fn parse_validates() {
        assert!(CurrencyCode::parse("USD").is_ok());
        assert!(CurrencyCode::parse("XRP").is_err());
    }
}
