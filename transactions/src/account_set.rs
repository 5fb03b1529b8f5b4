//! AccountSet: account-level option toggles.

use serde::{Deserialize, Serialize};
use trellis_types::AccountAddress;

use crate::memo::MemoWrapper;

/// Account-set flag value for the default-ripple option (whether balances
/// may ripple through the account by default).
pub const ASF_DEFAULT_RIPPLE: u32 = 8;

/// Toggle an account-level option.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountSetTx {
    pub account: AccountAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_flag: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clear_flag: Option<u32>,
    pub fee: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_sequence: Option<u32>,
    pub last_ledger_sequence: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memos: Option<Vec<MemoWrapper>>,
}
