//! Base58 decoding with the ledger's dictionary.

use sha2::{Digest, Sha256};

/// The base58 dictionary the ledger uses for addresses and seeds.
/// Note the unusual ordering: `r` is the zero digit, which is why account
/// addresses (version byte 0x00) always start with `r`.
pub(crate) const ALPHABET: &[u8; 58] =
    b"rpshnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCg65jkm8oFqi1tuvAxyz";

/// Decode a base58 string into bytes.
///
/// Returns `None` if the string is empty or contains a character outside
/// the dictionary.
pub(crate) fn decode(s: &str) -> Option<Vec<u8>> {
    if s.is_empty() {
        return None;
    }

    let mut result: Vec<u8> = Vec::new();
    for ch in s.bytes() {
        let digit = ALPHABET.iter().position(|&a| a == ch)? as u32;
        let mut carry = digit;
        for byte in result.iter_mut() {
            carry += (*byte as u32) * 58;
            *byte = (carry & 0xff) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            result.push((carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    // Each leading zero digit encodes one leading zero byte.
    for &ch in s.as_bytes() {
        if ch == ALPHABET[0] {
            result.push(0);
        } else {
            break;
        }
    }

    result.reverse();
    Some(result)
}

/// Verify the trailing 4-byte double-SHA256 checksum of a decoded payload.
pub(crate) fn verify_checksum(decoded: &[u8]) -> bool {
    if decoded.len() < 5 {
        return false;
    }
    let (body, check) = decoded.split_at(decoded.len() - 4);
    let first = Sha256::digest(body);
    let second = Sha256::digest(first);
    &second[..4] == check
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_rejects_foreign_characters() {
        // '0', 'O', 'I' and 'l' are not in the dictionary
        assert!(decode("r0").is_none());
        assert!(decode("rO").is_none());
        assert!(decode("rIl").is_none());
    }

    #[test]
    fn decode_rejects_empty() {
        assert!(decode("").is_none());
    }

    #[test]
    fn leading_zero_digits_become_zero_bytes() {
        // "rr" is two zero digits: two zero bytes
        assert_eq!(decode("rr").unwrap(), vec![0, 0]);
    }

    #[test]
    fn single_digit_values() {
        assert_eq!(decode("p").unwrap(), vec![1]);
        assert_eq!(decode("s").unwrap(), vec![2]);
    }

    #[test]
    fn checksum_requires_minimum_length() {
        assert!(!verify_checksum(&[1, 2, 3, 4]));
    }
}
