//! Balance reconciliation.
//!
//! Two independent paths produce the same `{currency → {counterparty →
//! balance}}` shape:
//! - trust-line records, sign-normalized per side and aggregated;
//! - gateway-balance snapshots (obligations and assets of an issuing
//!   account), which come from a different query than per-line data.
//!
//! Nothing downstream re-reads raw ledger records for display purposes.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trellis_types::{AccountAddress, CurrencyCode};

use crate::error::LineError;
use crate::flags::LineFlags;
use crate::record::TrustLineRecord;

/// Aggregate balances keyed by currency, then counterparty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BalanceBook {
    totals: HashMap<CurrencyCode, HashMap<AccountAddress, Decimal>>,
}

impl BalanceBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the `(currency, counterparty)` bucket, creating it
    /// if absent.
    pub fn add(&mut self, currency: &CurrencyCode, counterparty: &AccountAddress, amount: Decimal) {
        *self
            .totals
            .entry(currency.clone())
            .or_default()
            .entry(counterparty.clone())
            .or_insert(Decimal::ZERO) += amount;
    }

    /// The aggregate balance for a `(currency, counterparty)` pair; zero if
    /// no line exists.
    pub fn get(&self, currency: &CurrencyCode, counterparty: &AccountAddress) -> Decimal {
        self.totals
            .get(currency)
            .and_then(|per_cp| per_cp.get(counterparty))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn currencies(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.totals.keys()
    }

    pub fn by_counterparty(
        &self,
        currency: &CurrencyCode,
    ) -> Option<&HashMap<AccountAddress, Decimal>> {
        self.totals.get(currency)
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// One reconciled trust line, ready for display.
#[derive(Clone, Debug, PartialEq)]
pub struct LineDetail {
    pub currency: CurrencyCode,
    pub counterparty: AccountAddress,
    /// Balance owed to the local account, clamped to zero for unreceivable
    /// lines.
    pub balance: Decimal,
    pub our_limit: Decimal,
    pub their_limit: Decimal,
    pub is_low_side: bool,
    pub flags: LineFlags,
    /// The local limit is zero while the counterparty has extended credit:
    /// a debt may exist on the ledger but nothing can be received over this
    /// line, so the displayed balance is clamped.
    pub unreceivable: bool,
}

/// The output of a trust-line reconciliation pass.
#[derive(Clone, Debug, Default)]
pub struct Reconciliation {
    pub details: Vec<LineDetail>,
    pub totals: BalanceBook,
}

/// Reconcile trust-line records into per-line details and aggregate totals.
///
/// When `currency` is given, only records with a matching currency code
/// contribute; the filter deliberately ignores the issuer, while the
/// aggregate keeps issuers separate because its key includes the
/// counterparty. Duplicate `(currency, counterparty)` lines are summed.
pub fn reconcile_lines(
    records: &[TrustLineRecord],
    currency: Option<&CurrencyCode>,
) -> Reconciliation {
    let mut out = Reconciliation::default();

    for record in records {
        if let Some(filter) = currency {
            if record.currency != *filter {
                continue;
            }
        }

        let flags = record.flags();
        let unreceivable = !record.is_local_low_side
            && record.our_limit.is_zero()
            && record.their_limit > Decimal::ZERO;
        let balance = if unreceivable {
            Decimal::ZERO
        } else {
            record.normalized_balance()
        };

        out.totals.add(&record.currency, &record.counterparty, balance);
        out.details.push(LineDetail {
            currency: record.currency.clone(),
            counterparty: record.counterparty.clone(),
            balance,
            our_limit: record.our_limit,
            their_limit: record.their_limit,
            is_low_side: record.is_local_low_side,
            flags,
            unreceivable,
        });
    }

    out
}

/// An issued-token holding inside a gateway-balance snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssetAmount {
    pub currency: CurrencyCode,
    pub value: String,
}

/// Aggregate exposure of an issuing account, as reported by the gateway
/// balances query.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GatewayBalanceSnapshot {
    /// Total tokens issued by the local account, per currency (debts).
    #[serde(default)]
    pub obligations: HashMap<CurrencyCode, String>,
    /// Tokens the local account holds, grouped by their issuer.
    #[serde(default)]
    pub assets: HashMap<AccountAddress, Vec<AssetAmount>>,
}

/// Reconcile a gateway snapshot into the shared aggregate shape.
///
/// Obligations are money owed by the local account and enter negative,
/// keyed under the local address; assets enter positive, keyed by issuer.
pub fn reconcile_gateway(
    snapshot: &GatewayBalanceSnapshot,
    local: &AccountAddress,
) -> Result<BalanceBook, LineError> {
    let mut totals = BalanceBook::new();

    for (currency, value) in &snapshot.obligations {
        let amount: Decimal = value.parse().map_err(|_| LineError::BadValue {
            field: "obligations",
            value: value.clone(),
        })?;
        totals.add(currency, local, -amount);
    }

    for (issuer, holdings) in &snapshot.assets {
        for holding in holdings {
            let amount: Decimal = holding.value.parse().map_err(|_| LineError::BadValue {
                field: "assets",
                value: holding.value.clone(),
            })?;
            totals.add(&holding.currency, issuer, amount);
        }
    }

    Ok(totals)
}
