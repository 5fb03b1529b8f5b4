//! Transaction building helpers.
//!
//! Every builder attaches the computed network fee and an expiry ceiling
//! of `current ledger index + EXPIRY_LEDGER_BUFFER`, then the optional
//! fields: a single selected ticket replaces the account sequence (the
//! two are exclusive), a positive destination tag is attached as-is, and
//! a non-empty memo string is hex-encoded.

use trellis_types::{AccountAddress, TokenAmount};

use crate::account_set::AccountSetTx;
use crate::clawback::ClawbackTx;
use crate::error::TxError;
use crate::memo::{encode_memo, MemoWrapper};
use crate::payment::PaymentTx;
use crate::trust_set::TrustSetTx;
use crate::Transaction;

/// How many ledgers past the current index a transaction stays valid.
pub const EXPIRY_LEDGER_BUFFER: u32 = 20;

/// Ticket selection for sequencing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TicketChoice {
    /// No ticketing: use the account's own sequence number.
    None,
    /// Spend one pre-reserved ticket instead of the account sequence.
    Single(u32),
    /// Bulk ticket mode with no single selection: sequencing falls back to
    /// the account's current sequence number.
    Bulk,
}

/// Everything a builder needs besides the action-specific payload.
#[derive(Clone, Debug)]
pub struct BuildParams {
    pub account: AccountAddress,
    /// Network fee in drops, as computed by the fee query.
    pub fee_drops: String,
    pub current_ledger_index: u32,
    pub account_sequence: u32,
    pub ticket: TicketChoice,
    pub destination_tag: Option<u32>,
    pub memo: Option<String>,
}

struct CommonFields {
    sequence: Option<u32>,
    ticket_sequence: Option<u32>,
    last_ledger_sequence: u32,
    memos: Option<Vec<MemoWrapper>>,
}

fn common_fields(params: &BuildParams) -> CommonFields {
    let (sequence, ticket_sequence) = match params.ticket {
        TicketChoice::Single(ticket) => (None, Some(ticket)),
        TicketChoice::None | TicketChoice::Bulk => (Some(params.account_sequence), None),
    };
    let memos = params
        .memo
        .as_deref()
        .filter(|m| !m.is_empty())
        .map(|m| vec![encode_memo(m)]);
    CommonFields {
        sequence,
        ticket_sequence,
        last_ledger_sequence: params.current_ledger_index + EXPIRY_LEDGER_BUFFER,
        memos,
    }
}

fn check_amount(amount: &TokenAmount) -> Result<(), TxError> {
    if !amount.currency.is_valid() {
        return Err(TxError::InvalidCurrency(amount.currency.to_string()));
    }
    Ok(())
}

/// A positive destination tag is attached; zero or absent means none.
fn positive_tag(params: &BuildParams) -> Option<u32> {
    params.destination_tag.filter(|tag| *tag > 0)
}

/// Build a TrustSet for a currency+issuer pair.
pub fn build_trust_set(
    params: &BuildParams,
    limit_amount: TokenAmount,
    flags: u32,
) -> Result<Transaction, TxError> {
    check_amount(&limit_amount)?;
    let common = common_fields(params);
    Ok(Transaction::TrustSet(TrustSetTx {
        account: params.account.clone(),
        limit_amount,
        flags,
        fee: params.fee_drops.clone(),
        sequence: common.sequence,
        ticket_sequence: common.ticket_sequence,
        last_ledger_sequence: common.last_ledger_sequence,
        memos: common.memos,
    }))
}

/// Build a Payment issuing currency to `destination`.
pub fn build_payment(
    params: &BuildParams,
    destination: AccountAddress,
    amount: TokenAmount,
) -> Result<Transaction, TxError> {
    check_amount(&amount)?;
    let common = common_fields(params);
    Ok(Transaction::Payment(PaymentTx {
        account: params.account.clone(),
        destination,
        amount,
        fee: params.fee_drops.clone(),
        destination_tag: positive_tag(params),
        sequence: common.sequence,
        ticket_sequence: common.ticket_sequence,
        last_ledger_sequence: common.last_ledger_sequence,
        memos: common.memos,
    }))
}

/// Build a Clawback reclaiming `amount` from the holder named in its
/// `issuer` field.
pub fn build_clawback(params: &BuildParams, amount: TokenAmount) -> Result<Transaction, TxError> {
    check_amount(&amount)?;
    let common = common_fields(params);
    Ok(Transaction::Clawback(ClawbackTx {
        account: params.account.clone(),
        amount,
        fee: params.fee_drops.clone(),
        sequence: common.sequence,
        ticket_sequence: common.ticket_sequence,
        last_ledger_sequence: common.last_ledger_sequence,
        memos: common.memos,
    }))
}

/// Build an AccountSet toggling account-level flags.
pub fn build_account_set(
    params: &BuildParams,
    set_flag: Option<u32>,
    clear_flag: Option<u32>,
) -> Result<Transaction, TxError> {
    let common = common_fields(params);
    Ok(Transaction::AccountSet(AccountSetTx {
        account: params.account.clone(),
        set_flag,
        clear_flag,
        fee: params.fee_drops.clone(),
        sequence: common.sequence,
        ticket_sequence: common.ticket_sequence,
        last_ledger_sequence: common.last_ledger_sequence,
        memos: common.memos,
    }))
}
