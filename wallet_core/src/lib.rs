//! Wallet core library for Trellis.
//!
//! Provides everything a trust-line wallet application needs:
//! - Data-driven validation engine (required fields, synchronous format
//!   rules, network-dependent rules), collecting every failure in one pass
//! - Transaction orchestration per action (set/remove trust line, issue,
//!   clawback, default-ripple toggle)
//! - Signing dispatch across direct, regular-key, and multi-sign modes,
//!   with simulate support
//! - Reserve/affordability checking
//! - Node JSON-RPC client implementing the ledger collaborator contracts
//! - Deferred post-action refresh with an isolated error channel
//! - File-backed preference store and TOML configuration

pub mod actions;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod gateway;
pub mod prefs;
pub mod refresh;
pub mod report;
pub mod reserve;
pub mod validate;

pub use actions::{ActionOutcome, ActionRunner};
pub use client::{NodeClient, SeedKeyResolver};
pub use config::WalletConfig;
pub use dispatch::{
    describe_result_code, resolve_signing_mode, DispatchOptions, EngineResult, KeyMaterial,
    KeyResolver, SignedBlob, SigningBackend, SigningMode, SubmitOutcome,
};
pub use error::WalletError;
pub use gateway::{AccountInfo, LedgerGateway, ServerReserves};
pub use prefs::PreferenceStore;
pub use refresh::{spawn_refresh, AccountSnapshot, RefreshEvent, RefreshHandle};
pub use report::{ActionStatus, KeyValue, Report, ReportSection};
pub use validate::{Action, ActionRules, Field, NetworkRule, SyncRule, ValidationInput};
