//! TrustSet: create or modify a trust line.

use serde::{Deserialize, Serialize};
use trellis_types::{AccountAddress, TokenAmount};

use crate::memo::MemoWrapper;

/// Set the limit and option flags for a currency+issuer pair.
///
/// Setting the limit to zero (with a clean flag state and zero balance)
/// removes the line from the ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrustSetTx {
    pub account: AccountAddress,
    pub limit_amount: TokenAmount,
    pub flags: u32,
    pub fee: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_sequence: Option<u32>,
    pub last_ledger_sequence: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memos: Option<Vec<MemoWrapper>>,
}
