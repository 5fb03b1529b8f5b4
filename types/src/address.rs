//! Account addresses in their classic base58check form (`r...`).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::base58;
use crate::error::TypeError;

/// Version byte prefixed to the 20-byte account ID before encoding.
const ACCOUNT_VERSION: u8 = 0x00;
/// Decoded length: version byte + 20-byte account ID + 4-byte checksum.
const DECODED_LEN: usize = 25;

/// A ledger account address, e.g. `rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Parse and validate a user-supplied address string.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypeError> {
        let s = raw.into();
        if !is_valid_address(&s) {
            return Err(TypeError::InvalidAddress(s));
        }
        Ok(Self(s))
    }

    /// Wrap a string the ledger itself reported, without re-validating.
    /// User input goes through [`AccountAddress::parse`] instead.
    pub fn unchecked(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check this address against the charset and checksum rules.
    pub fn is_valid(&self) -> bool {
        is_valid_address(&self.0)
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate an address string: charset, version byte, length, and the
/// trailing double-SHA256 checksum.
pub fn is_valid_address(s: &str) -> bool {
    if !s.starts_with('r') || s.len() < 25 || s.len() > 35 {
        return false;
    }
    let decoded = match base58::decode(s) {
        Some(d) => d,
        None => return false,
    };
    decoded.len() == DECODED_LEN
        && decoded[0] == ACCOUNT_VERSION
        && base58::verify_checksum(&decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_addresses() {
        assert!(is_valid_address("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"));
        // the all-zero account ID
        assert!(is_valid_address("rrrrrrrrrrrrrrrrrrrrrhoLvTp"));
        assert!(is_valid_address("rrrrrrrrrrrrrrrrrrrrBZbvji"));
    }

    #[test]
    fn rejects_corrupted_checksum() {
        // last character changed
        assert!(!is_valid_address("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTi"));
    }

    #[test]
    fn rejects_wrong_prefix_and_charset() {
        assert!(!is_valid_address("xHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"));
        assert!(!is_valid_address("r0000000000000000000000000000000"));
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("r"));
    }

    #[test]
    fn parse_round_trips() {
        let addr = AccountAddress::parse("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh").unwrap();
        assert_eq!(addr.as_str(), "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");
        assert!(addr.is_valid());
    }

    #[test]
    fn parse_rejects_invalid() {
        assert!(AccountAddress::parse("not an address").is_err());
    }

    #[test]
    fn serde_is_transparent() {
        let addr = AccountAddress::unchecked("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh\"");
        let back: AccountAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
