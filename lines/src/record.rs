//! Trust-line records built from raw ledger entries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trellis_types::{AccountAddress, CurrencyCode, TokenAmount};

use crate::error::LineError;
use crate::flags::LineFlags;

/// A raw `RippleState` ledger entry as returned by an account-objects query.
///
/// The balance is stored from the low side's perspective; its issuer field
/// is a neutral placeholder on the ledger and is ignored here.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RippleStateEntry {
    pub balance: TokenAmount,
    pub low_limit: TokenAmount,
    pub high_limit: TokenAmount,
    #[serde(default)]
    pub flags: u32,
}

/// One trust line as seen from the local account.
///
/// Immutable once built; a fresh query supersedes the whole set. The
/// `balance` field keeps the ledger's low-side-relative sign; display
/// code goes through [`TrustLineRecord::normalized_balance`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrustLineRecord {
    pub currency: CurrencyCode,
    pub counterparty: AccountAddress,
    /// Raw balance, sign relative to the low side of the pair.
    pub balance: Decimal,
    /// The limit the local account extended to the counterparty.
    pub our_limit: Decimal,
    /// The limit the counterparty extended to the local account.
    pub their_limit: Decimal,
    pub flags_bitmask: u32,
    pub is_local_low_side: bool,
}

impl TrustLineRecord {
    /// Interpret a raw entry from the perspective of `local`.
    ///
    /// Fails if `local` is neither side of the pair or a decimal field does
    /// not parse.
    pub fn from_entry(
        entry: &RippleStateEntry,
        local: &AccountAddress,
    ) -> Result<Self, LineError> {
        let is_low = entry.low_limit.issuer == *local;
        if !is_low && entry.high_limit.issuer != *local {
            return Err(LineError::NotAParty {
                account: local.to_string(),
            });
        }

        let (our_side, their_side) = if is_low {
            (&entry.low_limit, &entry.high_limit)
        } else {
            (&entry.high_limit, &entry.low_limit)
        };

        Ok(Self {
            currency: entry.balance.currency.clone(),
            counterparty: their_side.issuer.clone(),
            balance: parse_value("Balance", &entry.balance.value)?,
            our_limit: parse_value("LowLimit/HighLimit", &our_side.value)?,
            their_limit: parse_value("LowLimit/HighLimit", &their_side.value)?,
            flags_bitmask: entry.flags,
            is_local_low_side: is_low,
        })
    }

    /// Ledger flags decoded for the side the local account occupies.
    pub fn flags(&self) -> LineFlags {
        LineFlags::decode(self.flags_bitmask, self.is_local_low_side)
    }

    /// The balance renormalized to "value owed to the local account".
    ///
    /// The ledger stores the balance relative to the low side, so the low
    /// side negates it and the high side reads it as-is.
    pub fn normalized_balance(&self) -> Decimal {
        if self.is_local_low_side {
            -self.balance
        } else {
            self.balance
        }
    }
}

fn parse_value(field: &'static str, value: &str) -> Result<Decimal, LineError> {
    value.parse().map_err(|_| LineError::BadValue {
        field,
        value: value.to_string(),
    })
}
