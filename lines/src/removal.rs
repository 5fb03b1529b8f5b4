//! Removal eligibility checking.
//!
//! Deleting a trust line anticipates the ledger's account-deletion
//! prerequisite, so the check scans every line the account holds, not just
//! the removal target.

use std::fmt;

use rust_decimal::Decimal;
use trellis_types::{AccountAddress, CurrencyCode};

use crate::record::TrustLineRecord;

/// A single reason a trust line blocks removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemovalBlockReason {
    NonZeroBalance,
    Frozen,
    /// The line carries an authorization grant; the issuer must revoke it
    /// before the line can be deleted.
    Authorized,
    PeerAuthorized,
}

impl fmt::Display for RemovalBlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RemovalBlockReason::NonZeroBalance => "balance is not zero",
            RemovalBlockReason::Frozen => "line is frozen",
            RemovalBlockReason::Authorized => "authorization is still granted",
            RemovalBlockReason::PeerAuthorized => "peer authorization is still active",
        };
        write!(f, "{text}")
    }
}

/// One offending line and the condition it fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemovalBlock {
    pub currency: CurrencyCode,
    pub counterparty: AccountAddress,
    pub reason: RemovalBlockReason,
}

impl fmt::Display for RemovalBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}: {}",
            self.currency, self.counterparty, self.reason
        )
    }
}

/// Verify every trust line of the account is safe to zero out.
///
/// Each line must have a balance of exactly zero, no freeze on either
/// side, no authorization grant, and no active peer authorization. Returns
/// the full itemized list of violations, one entry per failing condition.
pub fn check_removal(records: &[TrustLineRecord]) -> Result<(), Vec<RemovalBlock>> {
    let mut blocks = Vec::new();

    for record in records {
        let flags = record.flags();
        let mut fail = |reason| {
            blocks.push(RemovalBlock {
                currency: record.currency.clone(),
                counterparty: record.counterparty.clone(),
                reason,
            });
        };

        if record.balance != Decimal::ZERO {
            fail(RemovalBlockReason::NonZeroBalance);
        }
        if flags.frozen || flags.peer_frozen {
            fail(RemovalBlockReason::Frozen);
        }
        if flags.authorized {
            fail(RemovalBlockReason::Authorized);
        }
        if flags.peer_authorized {
            fail(RemovalBlockReason::PeerAuthorized);
        }
    }

    if blocks.is_empty() {
        Ok(())
    } else {
        Err(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{LSF_HIGH_AUTH, LSF_HIGH_FREEZE, LSF_LOW_AUTH};

    fn record(currency: &str, balance: i64, flags: u32, is_low: bool) -> TrustLineRecord {
        TrustLineRecord {
            currency: CurrencyCode::unchecked(currency),
            counterparty: AccountAddress::unchecked("rf1BiGeXwwQoi8Z2ueFYTEXSwuJYfV2Jpn"),
            balance: Decimal::from(balance),
            our_limit: Decimal::from(100),
            their_limit: Decimal::ZERO,
            flags_bitmask: flags,
            is_local_low_side: is_low,
        }
    }

    #[test]
    fn clean_account_allows_removal() {
        let records = vec![record("USD", 0, 0, true), record("EUR", 0, 0, false)];
        assert!(check_removal(&records).is_ok());
    }

    #[test]
    fn nonzero_balance_blocks() {
        let records = vec![record("USD", 0, 0, true), record("EUR", 5, 0, true)];
        let blocks = check_removal(&records).unwrap_err();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].reason, RemovalBlockReason::NonZeroBalance);
        assert_eq!(blocks[0].currency, CurrencyCode::unchecked("EUR"));
    }

    #[test]
    fn freeze_on_either_side_blocks() {
        // high-side freeze seen from the low side is a peer freeze; still blocks
        let records = vec![record("USD", 0, LSF_HIGH_FREEZE, true)];
        let blocks = check_removal(&records).unwrap_err();
        assert_eq!(blocks[0].reason, RemovalBlockReason::Frozen);
    }

    #[test]
    fn authorization_blocks() {
        let records = vec![record("USD", 0, LSF_LOW_AUTH, true)];
        let blocks = check_removal(&records).unwrap_err();
        assert_eq!(blocks[0].reason, RemovalBlockReason::Authorized);
    }

    #[test]
    fn peer_authorization_blocks() {
        let records = vec![record("USD", 0, LSF_HIGH_AUTH, true)];
        let blocks = check_removal(&records).unwrap_err();
        assert_eq!(blocks[0].reason, RemovalBlockReason::PeerAuthorized);
    }

    #[test]
    fn one_line_can_fail_multiple_conditions() {
        let records = vec![record("USD", 7, LSF_LOW_AUTH | LSF_HIGH_FREEZE, true)];
        let blocks = check_removal(&records).unwrap_err();
        let reasons: Vec<_> = blocks.iter().map(|b| b.reason).collect();
        assert_eq!(
            reasons,
            vec![
                RemovalBlockReason::NonZeroBalance,
                RemovalBlockReason::Frozen,
                RemovalBlockReason::Authorized,
            ]
        );
    }

    #[test]
    fn any_line_blocks_the_whole_account() {
        // the offending line is not the removal target; it still blocks
        let records = vec![record("USD", 0, 0, true), record("JPY", -3, 0, false)];
        assert!(check_removal(&records).is_err());
    }
}
