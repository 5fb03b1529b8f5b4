//! Clawback: an issuer reclaims tokens from a holder.

use serde::{Deserialize, Serialize};
use trellis_types::{AccountAddress, TokenAmount};

use crate::memo::MemoWrapper;

/// Reclaim issued tokens.
///
/// Wire quirk: the `issuer` field of `amount` names the *holder* the
/// tokens are clawed back from; the sending account is the issuer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClawbackTx {
    pub account: AccountAddress,
    pub amount: TokenAmount,
    pub fee: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_sequence: Option<u32>,
    pub last_ledger_sequence: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memos: Option<Vec<MemoWrapper>>,
}
