//! Deferred post-action refresh.
//!
//! After a successful state-changing transaction, updated balances,
//! tickets, and account state are fetched again in the background. The
//! task has its own event channel and never rewrites a result that was
//! already reported: if it fails, the failure is logged and surfaced as a
//! [`RefreshEvent::Failed`], nothing more.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use trellis_lines::{reconcile_gateway, reconcile_lines, BalanceBook, Reconciliation,
    TrustLineRecord};
use trellis_types::AccountAddress;

use crate::error::WalletError;
use crate::gateway::LedgerGateway;

/// Fresh account state produced by a background refresh.
#[derive(Clone, Debug)]
pub struct AccountSnapshot {
    pub sequence: u32,
    pub owner_count: u32,
    /// Reconciled trust lines (details + aggregate totals).
    pub lines: Reconciliation,
    /// The issuing-side view from the gateway balances query.
    pub issuing: BalanceBook,
    pub tickets: Vec<u32>,
}

#[derive(Debug)]
pub enum RefreshEvent {
    Completed(Box<AccountSnapshot>),
    Failed(String),
}

/// Handle to a spawned refresh: the task itself plus its event channel.
pub struct RefreshHandle {
    pub task: JoinHandle<()>,
    pub events: mpsc::Receiver<RefreshEvent>,
}

/// Spawn the refresh as an independent background task.
pub fn spawn_refresh<G>(gateway: G, account: AccountAddress) -> RefreshHandle
where
    G: LedgerGateway + Send + Sync + 'static,
{
    let (sender, events) = mpsc::channel(1);
    let task = tokio::spawn(async move {
        match snapshot(&gateway, &account).await {
            Ok(snap) => {
                tracing::debug!(account = %account, "deferred refresh completed");
                let _ = sender.send(RefreshEvent::Completed(Box::new(snap))).await;
            }
            Err(error) => {
                tracing::warn!(account = %account, %error, "deferred refresh failed");
                let _ = sender.send(RefreshEvent::Failed(error.to_string())).await;
            }
        }
    });
    RefreshHandle { task, events }
}

async fn snapshot<G: LedgerGateway>(
    gateway: &G,
    account: &AccountAddress,
) -> Result<AccountSnapshot, WalletError> {
    let (info, entries, balances, tickets) = tokio::try_join!(
        gateway.account_info(account),
        gateway.trust_lines(account),
        gateway.gateway_balances(account),
        gateway.account_tickets(account),
    )?;

    let records = entries
        .iter()
        .map(|entry| TrustLineRecord::from_entry(entry, account))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| WalletError::Query(e.to_string()))?;

    Ok(AccountSnapshot {
        sequence: info.sequence,
        owner_count: info.owner_count,
        lines: reconcile_lines(&records, None),
        issuing: reconcile_gateway(&balances, account)
            .map_err(|e| WalletError::Query(e.to_string()))?,
        tickets,
    })
}
