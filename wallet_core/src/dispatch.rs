//! The signing dispatcher.
//!
//! Per invocation the pipeline is
//! `BUILT → SIMULATED` when the simulate flag is set, otherwise
//! `BUILT → SIGNED → SUBMITTED → {SUCCESS, FAILED}`. Signing failures
//! abort before submission; a ledger rejection is *not* an error: the
//! annotated response comes back so the caller can render diagnostics.

use std::future::Future;

use serde::Deserialize;
use trellis_transactions::Transaction;

use crate::error::WalletError;

/// Opaque signing material produced by a [`KeyResolver`].
#[derive(Clone, Debug)]
pub struct KeyMaterial {
    pub secret: String,
    /// The signing account, needed for multi-sign aggregation.
    pub address: Option<String>,
}

/// A signed transaction blob ready for submission.
#[derive(Clone, Debug)]
pub struct SignedBlob {
    pub tx_blob: String,
}

/// The ledger's verdict on a simulated or submitted transaction.
#[derive(Clone, Debug, Deserialize)]
pub struct EngineResult {
    pub engine_result: String,
    #[serde(default)]
    pub engine_result_message: Option<String>,
    #[serde(default)]
    pub tx_json: serde_json::Value,
}

/// Signing and submission, as implemented by the node or a local signer.
pub trait SigningBackend {
    fn simulate(
        &self,
        tx: &Transaction,
    ) -> impl Future<Output = Result<EngineResult, WalletError>> + Send;

    /// Single-signature signing. `None` means the backend produced no
    /// signature (malformed key material).
    fn sign(
        &self,
        tx: &Transaction,
        key: &KeyMaterial,
    ) -> impl Future<Output = Result<Option<SignedBlob>, WalletError>> + Send;

    /// Multi-sign aggregation across every provided signer.
    fn sign_with(
        &self,
        tx: &Transaction,
        signers: &[KeyMaterial],
    ) -> impl Future<Output = Result<Option<SignedBlob>, WalletError>> + Send;

    fn submit(
        &self,
        blob: &SignedBlob,
    ) -> impl Future<Output = Result<EngineResult, WalletError>> + Send;
}

/// Resolves a seed into signing material.
pub trait KeyResolver {
    fn resolve(&self, seed: &str) -> Result<KeyMaterial, WalletError>;
}

/// How the transaction will be signed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SigningMode {
    Direct,
    RegularKey,
    MultiSign,
}

/// Pick the signing mode with first-match-wins precedence: multi-sign
/// beats the regular key even when both toggles are on.
pub fn resolve_signing_mode(regular_key_enabled: bool, multi_sign_enabled: bool) -> SigningMode {
    if multi_sign_enabled {
        SigningMode::MultiSign
    } else if regular_key_enabled {
        SigningMode::RegularKey
    } else {
        SigningMode::Direct
    }
}

/// Everything the dispatcher needs besides the transaction itself.
#[derive(Clone, Debug)]
pub struct DispatchOptions {
    pub simulate: bool,
    pub mode: SigningMode,
    pub seed: String,
    pub regular_key_seed: String,
    /// Index-aligned signer addresses and seeds for multi-sign.
    pub signer_addresses: Vec<String>,
    pub signer_seeds: Vec<String>,
}

/// The normalized result of a dispatch.
#[derive(Clone, Debug)]
pub struct SubmitOutcome {
    pub engine_result: String,
    /// Human-readable explanation derived from the result code.
    pub message: String,
    pub success: bool,
    pub simulated: bool,
    /// The full response, kept even on failure for diagnostics.
    pub response: EngineResult,
}

/// Simulate or sign-and-submit a built transaction.
pub async fn dispatch<S, K>(
    signing: &S,
    keys: &K,
    tx: &Transaction,
    opts: &DispatchOptions,
) -> Result<SubmitOutcome, WalletError>
where
    S: SigningBackend,
    K: KeyResolver,
{
    if opts.simulate {
        let response = signing.simulate(tx).await?;
        return Ok(outcome(response, true));
    }

    let blob = match opts.mode {
        SigningMode::Direct => {
            let key = keys.resolve(&opts.seed)?;
            signing.sign(tx, &key).await?
        }
        SigningMode::RegularKey => {
            let key = keys.resolve(&opts.regular_key_seed)?;
            signing.sign(tx, &key).await?
        }
        SigningMode::MultiSign => {
            let mut signers = Vec::with_capacity(opts.signer_seeds.len());
            for (seed, address) in opts.signer_seeds.iter().zip(&opts.signer_addresses) {
                let mut key = keys.resolve(seed)?;
                key.address = Some(address.clone());
                signers.push(key);
            }
            signing.sign_with(tx, &signers).await?
        }
    };

    let blob = blob.ok_or_else(|| {
        WalletError::Signing("the signing backend produced no signature".to_string())
    })?;

    let response = signing.submit(&blob).await?;
    let out = outcome(response, false);
    if !out.success {
        tracing::warn!(
            engine_result = %out.engine_result,
            tx_type = tx.tx_type(),
            "transaction failed"
        );
    }
    Ok(out)
}

fn outcome(response: EngineResult, simulated: bool) -> SubmitOutcome {
    let success = response.engine_result == "tesSUCCESS";
    let message = response
        .engine_result_message
        .clone()
        .unwrap_or_else(|| describe_result_code(&response.engine_result).to_string());
    SubmitOutcome {
        engine_result: response.engine_result.clone(),
        message,
        success,
        simulated,
        response,
    }
}

/// Map a protocol result code to a human-readable explanation.
pub fn describe_result_code(code: &str) -> &'static str {
    match code {
        "tesSUCCESS" => "The transaction was applied.",
        "tecNO_LINE" => "No such trust line exists.",
        "tecNO_AUTH" => "The trust line is not authorized by the issuer.",
        "tecNO_PERMISSION" => "The sending account lacks permission for this operation.",
        "tecUNFUNDED" | "tecUNFUNDED_PAYMENT" => "The sending account cannot fund this payment.",
        "tecINSUFFICIENT_RESERVE" => "The account balance cannot cover the owner reserve.",
        "tecHAS_OBLIGATIONS" => "The account still has outstanding obligations.",
        "tecOWNERS" => "The account still owns ledger objects that must be removed first.",
        "tecFROZEN" => "The trust line is frozen.",
        "tecPATH_DRY" => "No path with sufficient liquidity was found.",
        "tefPAST_SEQ" => "The sequence number was already used.",
        "tefMAX_LEDGER" => "The transaction expired before it could be included in a ledger.",
        "terNO_ACCOUNT" => "The destination account does not exist.",
        "temBAD_AMOUNT" => "The amount is malformed.",
        "temDISABLED" => "The required feature is not enabled on this network.",
        other => match other.get(..3) {
            Some("tec") => "The transaction failed and the fee was charged.",
            Some("tem") => "The transaction is malformed.",
            Some("tef") => "The transaction cannot ever succeed.",
            Some("ter") => "The transaction failed but may succeed later.",
            _ => "The ledger returned an unknown result code.",
        },
    }
}
