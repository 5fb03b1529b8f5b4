//! Trellis protocol transaction types and their builder.
//!
//! Transaction types:
//! - **TrustSet**: set the limit, value, and option flags of a trust line
//! - **Payment**: issue currency to a destination over a trust line
//! - **Clawback**: an issuer reclaims tokens from a holder
//! - **AccountSet**: toggle the account-level default-ripple option
//!
//! Structures serialize to the exact wire JSON the ledger expects
//! (PascalCase fields, `TransactionType` discriminator).

pub mod account_set;
pub mod builder;
pub mod clawback;
pub mod error;
pub mod memo;
pub mod payment;
pub mod trust_set;

use serde::{Deserialize, Serialize};
use trellis_types::AccountAddress;

pub use builder::{BuildParams, TicketChoice, EXPIRY_LEDGER_BUFFER};
pub use error::TxError;
pub use memo::{decode_memo, encode_memo, Memo, MemoWrapper};

/// The unified transaction enum wrapping all Trellis transaction types.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "TransactionType")]
pub enum Transaction {
    TrustSet(trust_set::TrustSetTx),
    Payment(payment::PaymentTx),
    Clawback(clawback::ClawbackTx),
    AccountSet(account_set::AccountSetTx),
}

impl Transaction {
    /// Get the sending account of this transaction.
    pub fn account(&self) -> &AccountAddress {
        match self {
            Self::TrustSet(tx) => &tx.account,
            Self::Payment(tx) => &tx.account,
            Self::Clawback(tx) => &tx.account,
            Self::AccountSet(tx) => &tx.account,
        }
    }

    /// Get the transaction type discriminator.
    pub fn tx_type(&self) -> &'static str {
        match self {
            Self::TrustSet(_) => "TrustSet",
            Self::Payment(_) => "Payment",
            Self::Clawback(_) => "Clawback",
            Self::AccountSet(_) => "AccountSet",
        }
    }

    /// Get the network fee in drops.
    pub fn fee(&self) -> &str {
        match self {
            Self::TrustSet(tx) => &tx.fee,
            Self::Payment(tx) => &tx.fee,
            Self::Clawback(tx) => &tx.fee,
            Self::AccountSet(tx) => &tx.fee,
        }
    }

    /// Get the expiry ceiling (last ledger index this transaction is valid in).
    pub fn last_ledger_sequence(&self) -> u32 {
        match self {
            Self::TrustSet(tx) => tx.last_ledger_sequence,
            Self::Payment(tx) => tx.last_ledger_sequence,
            Self::Clawback(tx) => tx.last_ledger_sequence,
            Self::AccountSet(tx) => tx.last_ledger_sequence,
        }
    }

    /// Get the account sequence, if this transaction uses one.
    pub fn sequence(&self) -> Option<u32> {
        match self {
            Self::TrustSet(tx) => tx.sequence,
            Self::Payment(tx) => tx.sequence,
            Self::Clawback(tx) => tx.sequence,
            Self::AccountSet(tx) => tx.sequence,
        }
    }

    /// Get the ticket sequence, if this transaction spends a ticket.
    pub fn ticket_sequence(&self) -> Option<u32> {
        match self {
            Self::TrustSet(tx) => tx.ticket_sequence,
            Self::Payment(tx) => tx.ticket_sequence,
            Self::Clawback(tx) => tx.ticket_sequence,
            Self::AccountSet(tx) => tx.ticket_sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_types::{CurrencyCode, TokenAmount};

    #[test]
    fn trust_set_wire_shape() {
        let tx = Transaction::TrustSet(trust_set::TrustSetTx {
            account: AccountAddress::unchecked("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"),
            limit_amount: TokenAmount::new(
                CurrencyCode::unchecked("USD"),
                AccountAddress::unchecked("rf1BiGeXwwQoi8Z2ueFYTEXSwuJYfV2Jpn"),
                "1000",
            ),
            flags: 0x0002_0000,
            fee: "12".to_string(),
            sequence: Some(7),
            ticket_sequence: None,
            last_ledger_sequence: 120,
            memos: None,
        });

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["TransactionType"], "TrustSet");
        assert_eq!(json["Account"], "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");
        assert_eq!(json["LimitAmount"]["currency"], "USD");
        assert_eq!(json["Flags"], 131072);
        assert_eq!(json["Sequence"], 7);
        assert_eq!(json["LastLedgerSequence"], 120);
        assert!(json.get("TicketSequence").is_none());
        assert!(json.get("Memos").is_none());
    }

    #[test]
    fn wire_shape_round_trips() {
        let tx = Transaction::AccountSet(account_set::AccountSetTx {
            account: AccountAddress::unchecked("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"),
            set_flag: Some(account_set::ASF_DEFAULT_RIPPLE),
            clear_flag: None,
            fee: "12".to_string(),
            sequence: None,
            ticket_sequence: Some(31),
            last_ledger_sequence: 99,
            memos: None,
        });
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
        assert_eq!(back.ticket_sequence(), Some(31));
        assert_eq!(back.sequence(), None);
    }
}
