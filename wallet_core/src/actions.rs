//! Per-action orchestration.
//!
//! Control flow per invocation: read fan-out → validation (collect every
//! failure) → removal eligibility for removals → ticket check → fee →
//! build → affordability → dispatch → deferred refresh. Every path
//! terminates in an [`ActionStatus`]; a ledger rejection is reported as a
//! failure but keeps the computed report and response attached.

use trellis_lines::{check_removal, reconcile_lines, TrustLineRecord};
use trellis_transactions::account_set::ASF_DEFAULT_RIPPLE;
use trellis_transactions::{builder, BuildParams, TicketChoice, Transaction, TxError};
use trellis_types::{AccountAddress, CurrencyCode, TokenAmount};

use crate::dispatch::{
    dispatch, resolve_signing_mode, DispatchOptions, KeyResolver, SigningBackend, SubmitOutcome,
};
use crate::error::WalletError;
use crate::gateway::{AccountInfo, LedgerGateway};
use crate::refresh::{spawn_refresh, RefreshHandle};
use crate::report::{ActionStatus, Report, ReportSection};
use crate::reserve;
use crate::validate::{self, Action, ValidationInput};

/// The full result of one action invocation.
pub struct ActionOutcome {
    pub status: ActionStatus,
    pub report: Report,
    /// The dispatch result, present whenever a transaction reached the
    /// simulate-or-submit stage, kept even when the ledger rejected it.
    pub submit: Option<SubmitOutcome>,
    /// Handle to the deferred refresh, spawned only after real successes.
    pub refresh: Option<RefreshHandle>,
}

/// Orchestrates trust-line actions against pluggable collaborators.
pub struct ActionRunner<G, S, K> {
    gateway: G,
    signing: S,
    keys: K,
}

impl<G, S, K> ActionRunner<G, S, K>
where
    G: LedgerGateway + Clone + Send + Sync + 'static,
    S: SigningBackend,
    K: KeyResolver,
{
    pub fn new(gateway: G, signing: S, keys: K) -> Self {
        Self {
            gateway,
            signing,
            keys,
        }
    }

    pub async fn set_trust_line(&self, input: &ValidationInput, simulate: bool) -> ActionOutcome {
        self.run(Action::SetLine, input, simulate).await
    }

    pub async fn remove_trust_line(
        &self,
        input: &ValidationInput,
        simulate: bool,
    ) -> ActionOutcome {
        self.run(Action::RemoveLine, input, simulate).await
    }

    pub async fn issue_tokens(&self, input: &ValidationInput, simulate: bool) -> ActionOutcome {
        self.run(Action::Issue, input, simulate).await
    }

    pub async fn claw_back(&self, input: &ValidationInput, simulate: bool) -> ActionOutcome {
        self.run(Action::Clawback, input, simulate).await
    }

    pub async fn set_default_ripple(
        &self,
        input: &ValidationInput,
        simulate: bool,
    ) -> ActionOutcome {
        self.run(Action::SetDefaultRipple, input, simulate).await
    }

    /// Run an action to its terminal status. Never panics or leaks an
    /// error past the action boundary.
    pub async fn run(&self, action: Action, input: &ValidationInput, simulate: bool) -> ActionOutcome {
        match self.execute(action, input, simulate).await {
            Ok(outcome) => outcome,
            Err(error) => {
                tracing::debug!(%error, ?action, "action ended in error");
                ActionOutcome {
                    status: ActionStatus::error(error.to_string()),
                    report: Report::default(),
                    submit: None,
                    refresh: None,
                }
            }
        }
    }

    async fn execute(
        &self,
        action: Action,
        input: &ValidationInput,
        simulate: bool,
    ) -> Result<ActionOutcome, WalletError> {
        let account = AccountAddress::parse(input.local_account.trim()).map_err(|e| {
            WalletError::Validation {
                messages: vec![e.to_string()],
            }
        })?;

        // independent read-only queries, joined before validation proceeds
        let (info, entries, ledger_index, reserves) = tokio::try_join!(
            self.gateway.account_info(&account),
            self.gateway.trust_lines(&account),
            self.gateway.last_ledger_index(),
            self.gateway.server_reserves(),
        )
        .map_err(|e| {
            tracing::warn!(account = %account, error = %e, "read fan-out failed");
            WalletError::Query(e.to_string())
        })?;

        let mut input = input.clone();
        input.master_key_disabled = info.master_key_disabled();

        let mut problems = validate::run_sync(action, &input);
        problems.extend(validate::run_network(action, &input, &self.gateway).await?);
        if !problems.is_empty() {
            return Err(WalletError::Validation { messages: problems });
        }

        let records = entries
            .iter()
            .map(|entry| TrustLineRecord::from_entry(entry, &account))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| WalletError::Query(e.to_string()))?;

        if action == Action::RemoveLine {
            check_removal(&records).map_err(|blocks| WalletError::RemovalBlocked {
                blocks: blocks.iter().map(ToString::to_string).collect(),
            })?;
        }

        // ticket resolution runs before the fee query: a missing ticket
        // must fail before any fee or affordability math
        let ticket = self.resolve_ticket(&account, &input).await?;
        let fee = self
            .gateway
            .fee()
            .await
            .map_err(|e| WalletError::Query(e.to_string()))?;

        let params = BuildParams {
            account: account.clone(),
            fee_drops: fee.clone(),
            current_ledger_index: ledger_index,
            account_sequence: info.sequence,
            ticket,
            destination_tag: input.destination_tag.trim().parse().ok(),
            memo: (!input.memo.is_empty()).then(|| input.memo.clone()),
        };
        let tx = build_transaction(action, &input, &info, &account, &params)?;

        reserve::check_affordable(&info, &reserves, &fee, action == Action::SetLine)?;

        let opts = DispatchOptions {
            simulate,
            mode: resolve_signing_mode(input.regular_key_enabled, input.multi_sign_enabled),
            seed: input.seed.trim().to_string(),
            regular_key_seed: input.regular_key_seed.trim().to_string(),
            signer_addresses: input.signer_addresses.clone(),
            signer_seeds: input.signer_seeds.clone(),
        };
        let submit = dispatch(&self.signing, &self.keys, &tx, &opts).await?;

        let report = build_report(&input, &records, &tx, &submit);
        let status = if submit.success {
            let headline = if submit.simulated {
                format!("simulated: {}", submit.message)
            } else {
                submit.message.clone()
            };
            ActionStatus::success(headline)
        } else {
            ActionStatus::error(format!("{}: {}", submit.engine_result, submit.message))
        };

        // deferred, failure-isolated; never gates the reported result
        let refresh = (submit.success && !submit.simulated)
            .then(|| spawn_refresh(self.gateway.clone(), account.clone()));

        Ok(ActionOutcome {
            status,
            report,
            submit: Some(submit),
            refresh,
        })
    }

    async fn resolve_ticket(
        &self,
        account: &AccountAddress,
        input: &ValidationInput,
    ) -> Result<TicketChoice, WalletError> {
        if !input.ticket_mode {
            return Ok(TicketChoice::None);
        }
        match input.selected_ticket {
            Some(sequence) => {
                let exists = self
                    .gateway
                    .ticket_exists(account, sequence)
                    .await
                    .map_err(|e| WalletError::Query(e.to_string()))?;
                if exists {
                    Ok(TicketChoice::Single(sequence))
                } else {
                    Err(TxError::TicketNotFound { sequence }.into())
                }
            }
            None => Ok(TicketChoice::Bulk),
        }
    }
}

fn build_transaction(
    action: Action,
    input: &ValidationInput,
    info: &AccountInfo,
    account: &AccountAddress,
    params: &BuildParams,
) -> Result<Transaction, WalletError> {
    let currency = CurrencyCode::unchecked(input.currency.trim());
    let tx = match action {
        Action::SetLine => builder::build_trust_set(
            params,
            TokenAmount::new(
                currency,
                AccountAddress::unchecked(input.counterparty.trim()),
                input.limit_value.trim(),
            ),
            input.flags.encode(),
        )?,
        Action::RemoveLine => builder::build_trust_set(
            params,
            TokenAmount::new(
                currency,
                AccountAddress::unchecked(input.counterparty.trim()),
                "0",
            ),
            input.flags.encode(),
        )?,
        Action::Issue => builder::build_payment(
            params,
            AccountAddress::unchecked(input.destination.trim()),
            // issuing: the local account is the issuer of the amount
            TokenAmount::new(currency, account.clone(), input.issue_value.trim()),
        )?,
        Action::Clawback => builder::build_clawback(
            params,
            // the amount's issuer field names the holder being clawed from
            TokenAmount::new(
                currency,
                AccountAddress::unchecked(input.counterparty.trim()),
                input.issue_value.trim(),
            ),
        )?,
        Action::SetDefaultRipple => {
            // toggle relative to the fetched account state
            let (set_flag, clear_flag) = if info.default_ripple() {
                (None, Some(ASF_DEFAULT_RIPPLE))
            } else {
                (Some(ASF_DEFAULT_RIPPLE), None)
            };
            builder::build_account_set(params, set_flag, clear_flag)?
        }
    };
    Ok(tx)
}

fn build_report(
    input: &ValidationInput,
    records: &[TrustLineRecord],
    tx: &Transaction,
    submit: &SubmitOutcome,
) -> Report {
    let mut result = ReportSection::new("Result", true);
    result.push("Type", tx.tx_type());
    result.push("Engine result", submit.engine_result.as_str());
    result.push("Explanation", submit.message.as_str());
    result.push("Fee (drops)", tx.fee());
    result.push(
        "Expires after ledger",
        tx.last_ledger_sequence().to_string(),
    );
    if let Some(ticket) = tx.ticket_sequence() {
        result.push("Ticket", ticket.to_string());
    }

    let filter = {
        let trimmed = input.currency.trim();
        (!trimmed.is_empty()).then(|| CurrencyCode::unchecked(trimmed))
    };
    let recon = reconcile_lines(records, filter.as_ref());

    let mut balances = ReportSection::new("Balances", false);
    for detail in &recon.details {
        let mut line = ReportSection::new(
            format!("{}/{}", detail.currency, detail.counterparty),
            false,
        );
        line.push("Balance", detail.balance.to_string());
        line.push("Our limit", detail.our_limit.to_string());
        line.push("Their limit", detail.their_limit.to_string());
        if detail.unreceivable {
            line.push("Unreceivable", "yes");
        }
        let names = detail.flags.names();
        if !names.is_empty() {
            line.push("Flags", names.join(", "));
        }
        balances.sub_items.push(line);
    }

    Report {
        sections: vec![result, balances],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use trellis_lines::{GatewayBalanceSnapshot, RippleStateEntry};
    use trellis_types::{CurrencyCode, TokenAmount};

    use crate::client::SeedKeyResolver;
    use crate::dispatch::{EngineResult, KeyMaterial, SignedBlob};
    use crate::gateway::{ServerReserves, LSF_DISABLE_MASTER};
    use crate::refresh::RefreshEvent;

    const LOCAL: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
    const PEER: &str = "rf1BiGeXwwQoi8Z2ueFYTEXSwuJYfV2Jpn";
    const SEED: &str = "snoPBrXtMeMyMHUVTgbuqAfg1SUTb";

    struct MockState {
        fee_called: AtomicBool,
        ticket_exists: bool,
        lines: Vec<RippleStateEntry>,
        fail_all: bool,
        balance_drops: u64,
        account_flags: u32,
    }

    impl Default for MockState {
        fn default() -> Self {
            Self {
                fee_called: AtomicBool::new(false),
                ticket_exists: true,
                lines: Vec::new(),
                fail_all: false,
                balance_drops: 100_000_000,
                account_flags: 0,
            }
        }
    }

    #[derive(Clone, Default)]
    struct MockGateway {
        state: Arc<MockState>,
    }

    impl MockGateway {
        fn with(state: MockState) -> Self {
            Self {
                state: Arc::new(state),
            }
        }

        fn check(&self) -> Result<(), WalletError> {
            if self.state.fail_all {
                Err(WalletError::Node("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl LedgerGateway for MockGateway {
        async fn account_info(&self, _account: &AccountAddress) -> Result<AccountInfo, WalletError> {
            self.check()?;
            Ok(AccountInfo {
                sequence: 42,
                balance_drops: self.state.balance_drops,
                owner_count: 1,
                flags: self.state.account_flags,
            })
        }

        async fn trust_lines(
            &self,
            _account: &AccountAddress,
        ) -> Result<Vec<RippleStateEntry>, WalletError> {
            self.check()?;
            Ok(self.state.lines.clone())
        }

        async fn account_tickets(&self, _account: &AccountAddress) -> Result<Vec<u32>, WalletError> {
            self.check()?;
            Ok(Vec::new())
        }

        async fn fee(&self) -> Result<String, WalletError> {
            self.check()?;
            self.state.fee_called.store(true, Ordering::SeqCst);
            Ok("12".to_string())
        }

        async fn last_ledger_index(&self) -> Result<u32, WalletError> {
            self.check()?;
            Ok(1000)
        }

        async fn server_reserves(&self) -> Result<ServerReserves, WalletError> {
            self.check()?;
            Ok(ServerReserves {
                base_drops: 10_000_000,
                owner_increment_drops: 2_000_000,
            })
        }

        async fn gateway_balances(
            &self,
            _account: &AccountAddress,
        ) -> Result<GatewayBalanceSnapshot, WalletError> {
            self.check()?;
            Ok(GatewayBalanceSnapshot::default())
        }

        async fn ticket_exists(
            &self,
            _account: &AccountAddress,
            _sequence: u32,
        ) -> Result<bool, WalletError> {
            self.check()?;
            Ok(self.state.ticket_exists)
        }
    }

    struct CannedSigner {
        engine_result: String,
        submitted: AtomicBool,
    }

    impl CannedSigner {
        fn returning(code: &str) -> Self {
            Self {
                engine_result: code.to_string(),
                submitted: AtomicBool::new(false),
            }
        }

        fn verdict(&self) -> EngineResult {
            EngineResult {
                engine_result: self.engine_result.clone(),
                engine_result_message: None,
                tx_json: serde_json::Value::Null,
            }
        }
    }

    impl SigningBackend for CannedSigner {
        async fn simulate(&self, _tx: &Transaction) -> Result<EngineResult, WalletError> {
            Ok(self.verdict())
        }

        async fn sign(
            &self,
            _tx: &Transaction,
            _key: &KeyMaterial,
        ) -> Result<Option<SignedBlob>, WalletError> {
            Ok(Some(SignedBlob {
                tx_blob: "CAFE".to_string(),
            }))
        }

        async fn sign_with(
            &self,
            _tx: &Transaction,
            _signers: &[KeyMaterial],
        ) -> Result<Option<SignedBlob>, WalletError> {
            Ok(Some(SignedBlob {
                tx_blob: "CAFE".to_string(),
            }))
        }

        async fn submit(&self, _blob: &SignedBlob) -> Result<EngineResult, WalletError> {
            self.submitted.store(true, Ordering::SeqCst);
            Ok(self.verdict())
        }
    }

    fn runner(
        gateway: MockGateway,
        signer: CannedSigner,
    ) -> ActionRunner<MockGateway, CannedSigner, SeedKeyResolver> {
        ActionRunner::new(gateway, signer, SeedKeyResolver)
    }

    fn set_line_input() -> ValidationInput {
        ValidationInput {
            local_account: LOCAL.to_string(),
            seed: SEED.to_string(),
            currency: "USD".to_string(),
            counterparty: PEER.to_string(),
            limit_value: "1000".to_string(),
            ..ValidationInput::default()
        }
    }

    fn dirty_line(balance: &str) -> RippleStateEntry {
        RippleStateEntry {
            balance: TokenAmount::new(
                CurrencyCode::unchecked("USD"),
                AccountAddress::unchecked("rrrrrrrrrrrrrrrrrrrrrhoLvTp"),
                balance,
            ),
            low_limit: TokenAmount::new(
                CurrencyCode::unchecked("USD"),
                AccountAddress::unchecked(LOCAL),
                "1000",
            ),
            high_limit: TokenAmount::new(
                CurrencyCode::unchecked("USD"),
                AccountAddress::unchecked(PEER),
                "0",
            ),
            flags: 0,
        }
    }

    #[tokio::test]
    async fn set_line_happy_path() {
        let gateway = MockGateway::default();
        let outcome = runner(gateway.clone(), CannedSigner::returning("tesSUCCESS"))
            .set_trust_line(&set_line_input(), false)
            .await;

        assert!(outcome.status.is_success, "{}", outcome.status.result);
        assert!(gateway.state.fee_called.load(Ordering::SeqCst));
        let submit = outcome.submit.unwrap();
        assert_eq!(submit.engine_result, "tesSUCCESS");
        assert!(outcome.refresh.is_some());
        assert_eq!(outcome.report.sections[0].title, "Result");
    }

    #[tokio::test]
    async fn missing_ticket_fails_before_the_fee_query() {
        let gateway = MockGateway::with(MockState {
            ticket_exists: false,
            ..MockState::default()
        });
        let mut input = set_line_input();
        input.ticket_mode = true;
        input.selected_ticket = Some(12);

        let outcome = runner(gateway.clone(), CannedSigner::returning("tesSUCCESS"))
            .set_trust_line(&input, false)
            .await;

        assert!(outcome.status.is_error);
        assert!(outcome.status.result.contains("ticket 12"));
        assert!(
            !gateway.state.fee_called.load(Ordering::SeqCst),
            "fee must not be calculated for a missing ticket"
        );
        assert!(outcome.submit.is_none());
    }

    #[tokio::test]
    async fn validation_failures_come_back_together() {
        let mut input = set_line_input();
        input.counterparty = "bogus".to_string();
        input.limit_value = "abc".to_string();

        let gateway = MockGateway::default();
        let outcome = runner(gateway.clone(), CannedSigner::returning("tesSUCCESS"))
            .set_trust_line(&input, false)
            .await;

        assert!(outcome.status.is_error);
        assert_eq!(outcome.status.result.lines().count(), 2);
        assert!(!gateway.state.fee_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn removal_is_blocked_by_a_dirty_line() {
        let gateway = MockGateway::with(MockState {
            lines: vec![dirty_line("-50")],
            ..MockState::default()
        });
        let mut input = set_line_input();
        input.limit_value = String::new();

        let outcome = runner(gateway, CannedSigner::returning("tesSUCCESS"))
            .remove_trust_line(&input, false)
            .await;

        assert!(outcome.status.is_error);
        assert!(outcome.status.result.contains("removal blocked"));
        assert!(outcome.status.result.contains("balance is not zero"));
    }

    #[tokio::test]
    async fn removal_of_a_clean_account_succeeds() {
        let gateway = MockGateway::with(MockState {
            lines: vec![dirty_line("0")],
            ..MockState::default()
        });
        let mut input = set_line_input();
        input.limit_value = String::new();

        let outcome = runner(gateway, CannedSigner::returning("tesSUCCESS"))
            .remove_trust_line(&input, false)
            .await;

        assert!(outcome.status.is_success, "{}", outcome.status.result);
    }

    #[tokio::test]
    async fn ledger_rejection_keeps_the_response() {
        let outcome = runner(MockGateway::default(), CannedSigner::returning("tecNO_AUTH"))
            .set_trust_line(&set_line_input(), false)
            .await;

        assert!(outcome.status.is_error);
        assert!(outcome.status.result.contains("tecNO_AUTH"));
        // the annotated response is preserved for diagnostics
        let submit = outcome.submit.unwrap();
        assert_eq!(submit.engine_result, "tecNO_AUTH");
        assert!(!submit.message.is_empty());
        assert!(outcome.refresh.is_none());
        // the report computed before the rejection is preserved too
        assert!(!outcome.report.sections.is_empty());
    }

    #[tokio::test]
    async fn unaffordable_balance_is_a_hard_stop() {
        let gateway = MockGateway::with(MockState {
            balance_drops: 1_000,
            ..MockState::default()
        });
        let signer = CannedSigner::returning("tesSUCCESS");
        let outcome = runner(gateway, signer)
            .set_trust_line(&set_line_input(), false)
            .await;

        assert!(outcome.status.is_error);
        assert!(outcome.status.result.contains("insufficient balance"));
        assert!(outcome.submit.is_none());
    }

    #[tokio::test]
    async fn query_failure_aborts_with_a_fetch_error() {
        let gateway = MockGateway::with(MockState {
            fail_all: true,
            ..MockState::default()
        });
        let outcome = runner(gateway, CannedSigner::returning("tesSUCCESS"))
            .set_trust_line(&set_line_input(), false)
            .await;

        assert!(outcome.status.is_error);
        assert!(outcome.status.result.contains("could not fetch account data"));
    }

    #[tokio::test]
    async fn disabled_master_key_is_read_from_fetched_metadata() {
        let gateway = MockGateway::with(MockState {
            account_flags: LSF_DISABLE_MASTER,
            ..MockState::default()
        });
        let outcome = runner(gateway, CannedSigner::returning("tesSUCCESS"))
            .set_trust_line(&set_line_input(), false)
            .await;

        assert!(outcome.status.is_error);
        assert!(outcome.status.result.contains("master key is disabled"));
    }

    #[tokio::test]
    async fn simulation_skips_submission_and_refresh() {
        let gateway = MockGateway::default();
        let signer = CannedSigner::returning("tesSUCCESS");
        let outcome = runner(gateway, signer)
            .set_trust_line(&set_line_input(), true)
            .await;

        assert!(outcome.status.is_success);
        assert!(outcome.status.result.starts_with("simulated:"));
        let submit = outcome.submit.unwrap();
        assert!(submit.simulated);
        assert!(outcome.refresh.is_none());
    }

    #[tokio::test]
    async fn issue_with_default_ripple_toggle_builds_account_set() {
        // issuing and clawback paths exercise their builders end to end
        let mut input = set_line_input();
        input.destination = PEER.to_string();
        input.issue_value = "25".to_string();

        let outcome = runner(MockGateway::default(), CannedSigner::returning("tesSUCCESS"))
            .issue_tokens(&input, false)
            .await;
        assert!(outcome.status.is_success, "{}", outcome.status.result);

        let outcome = runner(MockGateway::default(), CannedSigner::returning("tesSUCCESS"))
            .set_default_ripple(&set_line_input(), false)
            .await;
        assert!(outcome.status.is_success, "{}", outcome.status.result);
    }

    #[tokio::test]
    async fn successful_action_schedules_a_refresh_that_reports_independently() {
        let gateway = MockGateway::with(MockState {
            lines: vec![dirty_line("-50")],
            ..MockState::default()
        });
        let outcome = runner(gateway, CannedSigner::returning("tesSUCCESS"))
            .set_trust_line(&set_line_input(), false)
            .await;

        assert!(outcome.status.is_success);
        let mut refresh = outcome.refresh.unwrap();
        match refresh.events.recv().await.unwrap() {
            RefreshEvent::Completed(snapshot) => {
                assert_eq!(snapshot.lines.details.len(), 1);
            }
            RefreshEvent::Failed(reason) => panic!("refresh failed: {reason}"),
        }
    }
}
