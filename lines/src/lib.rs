//! Trust-line domain engine for Trellis.
//!
//! Everything that interprets raw ledger trust-line state lives here:
//! - Flag codec: transaction option toggles and side-dependent ledger bits
//! - Trust-line records built from raw `RippleState` entries
//! - Balance reconciliation (per-line details + aggregate totals, and the
//!   separate gateway-balance path for issuing accounts)
//! - Removal eligibility checking ahead of a trust-line delete

pub mod error;
pub mod flags;
pub mod reconcile;
pub mod record;
pub mod removal;

pub use error::LineError;
pub use flags::{FlagToggles, LineFlags, TrustSetFlag};
pub use reconcile::{
    reconcile_gateway, reconcile_lines, AssetAmount, BalanceBook, GatewayBalanceSnapshot,
    LineDetail, Reconciliation,
};
pub use record::{RippleStateEntry, TrustLineRecord};
pub use removal::{check_removal, RemovalBlock, RemovalBlockReason};
