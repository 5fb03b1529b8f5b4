//! Payment: issue currency to a destination.

use serde::{Deserialize, Serialize};
use trellis_types::{AccountAddress, TokenAmount};

use crate::memo::MemoWrapper;

/// Send issued currency to a destination over an existing trust line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentTx {
    pub account: AccountAddress,
    pub destination: AccountAddress,
    pub amount: TokenAmount,
    pub fee: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_sequence: Option<u32>,
    pub last_ledger_sequence: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memos: Option<Vec<MemoWrapper>>,
}
