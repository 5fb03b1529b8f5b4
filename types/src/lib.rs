//! Fundamental types for the Trellis wallet core.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: account addresses and seeds (base58check with the ledger's
//! alphabet), currency codes, and issued-token amounts in their wire shape.

mod base58;

pub mod address;
pub mod amount;
pub mod currency;
pub mod error;
pub mod seed;

pub use address::{is_valid_address, AccountAddress};
pub use amount::TokenAmount;
pub use currency::{is_valid_currency, CurrencyCode};
pub use error::TypeError;
pub use seed::is_valid_seed;
