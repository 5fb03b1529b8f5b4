//! The ledger query contract the wallet core consumes.
//!
//! The core never talks to a transport directly; everything it needs from
//! the ledger goes through [`LedgerGateway`]. The production implementation
//! is [`crate::client::NodeClient`]; tests substitute in-process fakes.

use std::future::Future;

use trellis_lines::{GatewayBalanceSnapshot, RippleStateEntry};
use trellis_types::AccountAddress;

use crate::error::WalletError;

// Account-root flag bits the wallet core interprets.
pub const LSF_REQUIRE_DEST_TAG: u32 = 0x0002_0000;
pub const LSF_DISABLE_MASTER: u32 = 0x0010_0000;
pub const LSF_DEFAULT_RIPPLE: u32 = 0x0080_0000;

/// Snapshot of an account root.
#[derive(Clone, Debug)]
pub struct AccountInfo {
    pub sequence: u32,
    pub balance_drops: u64,
    pub owner_count: u32,
    pub flags: u32,
}

impl AccountInfo {
    /// The account's master key is disabled; a regular key or signer list
    /// must be used instead.
    pub fn master_key_disabled(&self) -> bool {
        self.flags & LSF_DISABLE_MASTER != 0
    }

    /// The account refuses payments without a destination tag.
    pub fn requires_destination_tag(&self) -> bool {
        self.flags & LSF_REQUIRE_DEST_TAG != 0
    }

    /// Balances may ripple through this account by default.
    pub fn default_ripple(&self) -> bool {
        self.flags & LSF_DEFAULT_RIPPLE != 0
    }
}

/// Reserve parameters reported by the server, in drops.
#[derive(Clone, Copy, Debug)]
pub struct ServerReserves {
    pub base_drops: u64,
    pub owner_increment_drops: u64,
}

/// Read-side ledger queries.
///
/// All methods are suspend points; independent queries for one action are
/// issued as a fan-out and joined before validation proceeds.
pub trait LedgerGateway {
    fn account_info(
        &self,
        account: &AccountAddress,
    ) -> impl Future<Output = Result<AccountInfo, WalletError>> + Send;

    /// Raw `RippleState` entries the account is a party to.
    fn trust_lines(
        &self,
        account: &AccountAddress,
    ) -> impl Future<Output = Result<Vec<RippleStateEntry>, WalletError>> + Send;

    /// Sequence numbers of the tickets the account has reserved.
    fn account_tickets(
        &self,
        account: &AccountAddress,
    ) -> impl Future<Output = Result<Vec<u32>, WalletError>> + Send;

    /// Current open-ledger fee, in drops.
    fn fee(&self) -> impl Future<Output = Result<String, WalletError>> + Send;

    fn last_ledger_index(&self) -> impl Future<Output = Result<u32, WalletError>> + Send;

    fn server_reserves(&self)
        -> impl Future<Output = Result<ServerReserves, WalletError>> + Send;

    fn gateway_balances(
        &self,
        account: &AccountAddress,
    ) -> impl Future<Output = Result<GatewayBalanceSnapshot, WalletError>> + Send;

    fn ticket_exists(
        &self,
        account: &AccountAddress,
        sequence: u32,
    ) -> impl Future<Output = Result<bool, WalletError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_flag_helpers() {
        let info = AccountInfo {
            sequence: 1,
            balance_drops: 0,
            owner_count: 0,
            flags: LSF_DISABLE_MASTER | LSF_REQUIRE_DEST_TAG,
        };
        assert!(info.master_key_disabled());
        assert!(info.requires_destination_tag());
        assert!(!info.default_ripple());
    }
}
