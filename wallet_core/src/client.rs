//! HTTP client for a node's JSON-RPC endpoint.
//!
//! Implements the [`LedgerGateway`] read contract and the
//! [`SigningBackend`] submission contract over the node's JSON-RPC API,
//! including server-side multi-sign aggregation via `sign_for`.

use std::time::Duration;

use serde::Deserialize;
use trellis_lines::{GatewayBalanceSnapshot, RippleStateEntry};
use trellis_transactions::Transaction;
use trellis_types::{is_valid_seed, AccountAddress};

use crate::config::WalletConfig;
use crate::dispatch::{EngineResult, KeyMaterial, KeyResolver, SignedBlob, SigningBackend};
use crate::error::WalletError;
use crate::gateway::{AccountInfo, LedgerGateway, ServerReserves};

/// HTTP client for communicating with a node via JSON-RPC.
///
/// Wraps `reqwest::Client` with the node's base URL and provides typed
/// methods for each RPC action the wallet needs.
#[derive(Clone)]
pub struct NodeClient {
    http: reqwest::Client,
    node_url: String,
}

impl NodeClient {
    /// Create a new NodeClient targeting the given base URL
    /// (e.g. `http://127.0.0.1:5005`).
    pub fn new(node_url: impl Into<String>) -> Result<Self, WalletError> {
        Self::with_timeouts(node_url, 30, 10)
    }

    /// Create a NodeClient from wallet configuration.
    pub fn from_config(config: &WalletConfig) -> Result<Self, WalletError> {
        Self::with_timeouts(
            config.node_url.clone(),
            config.request_timeout_secs,
            config.connect_timeout_secs,
        )
    }

    fn with_timeouts(
        node_url: impl Into<String>,
        request_secs: u64,
        connect_secs: u64,
    ) -> Result<Self, WalletError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(request_secs))
            .connect_timeout(Duration::from_secs(connect_secs))
            .build()
            .map_err(|e| WalletError::Node(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            node_url: node_url.into(),
        })
    }

    /// The configured node URL.
    pub fn node_url(&self) -> &str {
        &self.node_url
    }

    /// Send a JSON-RPC request and return the `result` field.
    async fn rpc_call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, WalletError> {
        let body = serde_json::json!({ "method": method, "params": [params] });

        let response = self
            .http
            .post(&self.node_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| WalletError::Node(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(WalletError::Node(format!(
                "node returned HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| WalletError::Node(format!("invalid JSON response: {e}")))?;

        let result = json.get("result").cloned().unwrap_or(json);
        if let Some(code) = result.get("error").and_then(|e| e.as_str()) {
            let detail = result
                .get("error_message")
                .and_then(|m| m.as_str())
                .unwrap_or(code);
            return Err(WalletError::Node(format!("node error: {detail}")));
        }

        Ok(result)
    }

    fn tx_json(tx: &Transaction) -> Result<serde_json::Value, WalletError> {
        serde_json::to_value(tx)
            .map_err(|e| WalletError::Other(format!("could not serialize transaction: {e}")))
    }
}

/// Account-root fields of an `account_info` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AccountData {
    balance: String,
    sequence: u32,
    #[serde(default)]
    owner_count: u32,
    #[serde(default)]
    flags: u32,
}

pub(crate) fn xrp_to_drops(xrp: f64) -> u64 {
    (xrp * 1_000_000.0).round() as u64
}

impl LedgerGateway for NodeClient {
    async fn account_info(&self, account: &AccountAddress) -> Result<AccountInfo, WalletError> {
        let result = self
            .rpc_call(
                "account_info",
                serde_json::json!({ "account": account.as_str(), "ledger_index": "validated" }),
            )
            .await?;

        let data: AccountData = serde_json::from_value(
            result.get("account_data").cloned().unwrap_or_default(),
        )
        .map_err(|e| WalletError::Node(format!("invalid account_info response: {e}")))?;

        let balance_drops = data
            .balance
            .parse()
            .map_err(|e| WalletError::Node(format!("invalid balance value: {e}")))?;

        Ok(AccountInfo {
            sequence: data.sequence,
            balance_drops,
            owner_count: data.owner_count,
            flags: data.flags,
        })
    }

    async fn trust_lines(
        &self,
        account: &AccountAddress,
    ) -> Result<Vec<RippleStateEntry>, WalletError> {
        let result = self
            .rpc_call(
                "account_objects",
                serde_json::json!({ "account": account.as_str(), "type": "state" }),
            )
            .await?;

        let objects = result
            .get("account_objects")
            .cloned()
            .unwrap_or_else(|| serde_json::Value::Array(Vec::new()));
        serde_json::from_value(objects)
            .map_err(|e| WalletError::Node(format!("invalid account_objects response: {e}")))
    }

    async fn account_tickets(&self, account: &AccountAddress) -> Result<Vec<u32>, WalletError> {
        let result = self
            .rpc_call(
                "account_objects",
                serde_json::json!({ "account": account.as_str(), "type": "ticket" }),
            )
            .await?;

        let tickets = result
            .get("account_objects")
            .and_then(|objects| objects.as_array())
            .map(|objects| {
                objects
                    .iter()
                    .filter_map(|object| object.get("TicketSequence"))
                    .filter_map(|sequence| sequence.as_u64())
                    .map(|sequence| sequence as u32)
                    .collect()
            })
            .unwrap_or_default();
        Ok(tickets)
    }

    async fn fee(&self) -> Result<String, WalletError> {
        let result = self.rpc_call("fee", serde_json::json!({})).await?;
        result
            .pointer("/drops/open_ledger_fee")
            .and_then(|fee| fee.as_str())
            .map(str::to_string)
            .ok_or_else(|| WalletError::Node("fee response missing open_ledger_fee".to_string()))
    }

    async fn last_ledger_index(&self) -> Result<u32, WalletError> {
        let result = self.rpc_call("ledger_current", serde_json::json!({})).await?;
        result
            .get("ledger_current_index")
            .and_then(|index| index.as_u64())
            .map(|index| index as u32)
            .ok_or_else(|| {
                WalletError::Node("ledger_current response missing index".to_string())
            })
    }

    async fn server_reserves(&self) -> Result<ServerReserves, WalletError> {
        let result = self.rpc_call("server_info", serde_json::json!({})).await?;
        let base_xrp = result
            .pointer("/info/validated_ledger/reserve_base_xrp")
            .and_then(|value| value.as_f64());
        let inc_xrp = result
            .pointer("/info/validated_ledger/reserve_inc_xrp")
            .and_then(|value| value.as_f64());
        match (base_xrp, inc_xrp) {
            (Some(base), Some(inc)) => Ok(ServerReserves {
                base_drops: xrp_to_drops(base),
                owner_increment_drops: xrp_to_drops(inc),
            }),
            _ => Err(WalletError::Node(
                "server_info response missing reserve parameters".to_string(),
            )),
        }
    }

    async fn gateway_balances(
        &self,
        account: &AccountAddress,
    ) -> Result<GatewayBalanceSnapshot, WalletError> {
        let result = self
            .rpc_call(
                "gateway_balances",
                serde_json::json!({ "account": account.as_str() }),
            )
            .await?;
        serde_json::from_value(result)
            .map_err(|e| WalletError::Node(format!("invalid gateway_balances response: {e}")))
    }

    async fn ticket_exists(
        &self,
        account: &AccountAddress,
        sequence: u32,
    ) -> Result<bool, WalletError> {
        let tickets = self.account_tickets(account).await?;
        Ok(tickets.contains(&sequence))
    }
}

impl SigningBackend for NodeClient {
    async fn simulate(&self, tx: &Transaction) -> Result<EngineResult, WalletError> {
        let result = self
            .rpc_call("simulate", serde_json::json!({ "tx_json": Self::tx_json(tx)? }))
            .await?;
        serde_json::from_value(result)
            .map_err(|e| WalletError::Node(format!("invalid simulate response: {e}")))
    }

    async fn sign(
        &self,
        tx: &Transaction,
        key: &KeyMaterial,
    ) -> Result<Option<SignedBlob>, WalletError> {
        let result = self
            .rpc_call(
                "sign",
                serde_json::json!({ "tx_json": Self::tx_json(tx)?, "secret": key.secret }),
            )
            .await?;
        Ok(result
            .get("tx_blob")
            .and_then(|blob| blob.as_str())
            .map(|blob| SignedBlob {
                tx_blob: blob.to_string(),
            }))
    }

    async fn sign_with(
        &self,
        tx: &Transaction,
        signers: &[KeyMaterial],
    ) -> Result<Option<SignedBlob>, WalletError> {
        // each sign_for call folds one more signature into tx_json; the
        // last response carries the fully aggregated blob
        let mut tx_json = Self::tx_json(tx)?;
        let mut blob = None;

        for signer in signers {
            let address = signer.address.as_deref().ok_or_else(|| {
                WalletError::Signing("multi-sign entry is missing its account address".to_string())
            })?;
            let result = self
                .rpc_call(
                    "sign_for",
                    serde_json::json!({
                        "account": address,
                        "secret": signer.secret,
                        "tx_json": tx_json,
                    }),
                )
                .await?;
            tx_json = result.get("tx_json").cloned().ok_or_else(|| {
                WalletError::Signing("sign_for response carried no tx_json".to_string())
            })?;
            blob = result
                .get("tx_blob")
                .and_then(|b| b.as_str())
                .map(|b| SignedBlob {
                    tx_blob: b.to_string(),
                });
        }

        Ok(blob)
    }

    async fn submit(&self, blob: &SignedBlob) -> Result<EngineResult, WalletError> {
        let result = self
            .rpc_call("submit", serde_json::json!({ "tx_blob": blob.tx_blob }))
            .await?;
        serde_json::from_value(result)
            .map_err(|e| WalletError::Node(format!("invalid submit response: {e}")))
    }
}

/// Key resolver for server-side signing: validates the seed's shape and
/// passes it through as opaque secret material. The node derives the
/// actual keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct SeedKeyResolver;

impl KeyResolver for SeedKeyResolver {
    fn resolve(&self, seed: &str) -> Result<KeyMaterial, WalletError> {
        let seed = seed.trim();
        if !is_valid_seed(seed) {
            return Err(WalletError::Signing(
                "seed is not valid key material".to_string(),
            ));
        }
        Ok(KeyMaterial {
            secret: seed.to_string(),
            address: None,
        })
    }
}
