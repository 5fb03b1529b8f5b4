//! Seed (secret) format validation.
//!
//! Seeds are never stored or logged by this workspace; only their base58check
//! shape is checked before key material is handed to the signing backend.

use crate::base58;

/// Version byte for family seeds.
const SEED_VERSION: u8 = 0x21;
/// Decoded length: version byte + 16-byte entropy + 4-byte checksum.
const DECODED_LEN: usize = 21;

/// Validate a seed string: `s` prefix, charset, length, version byte, and
/// the trailing double-SHA256 checksum.
pub fn is_valid_seed(s: &str) -> bool {
    if !s.starts_with('s') || s.len() < 20 || s.len() > 35 {
        return false;
    }
    let decoded = match base58::decode(s) {
        Some(d) => d,
        None => return false,
    };
    decoded.len() == DECODED_LEN
        && decoded[0] == SEED_VERSION
        && base58::verify_checksum(&decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_seed() {
        assert!(is_valid_seed("snoPBrXtMeMyMHUVTgbuqAfg1SUTb"));
    }

    #[test]
    fn rejects_corrupted_seed() {
        assert!(!is_valid_seed("snoPBrXtMeMyMHUVTgbuqAfg1SUTa"));
    }

    #[test]
    fn rejects_address_as_seed() {
        assert!(!is_valid_seed("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(!is_valid_seed(""));
        assert!(!is_valid_seed("s"));
        assert!(!is_valid_seed("hello world"));
    }
}
