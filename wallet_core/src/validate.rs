//! The validation engine.
//!
//! A state-free, data-driven rule evaluator. Each action maps to a fixed
//! [`ActionRules`] record: required fields, an ordered list of synchronous
//! rule descriptors, and an ordered list of network rules that need a
//! ledger round-trip. Failures are collected, never short-circuited, so
//! the user sees every problem in one pass. Two safety-net checks
//! (multi-sign consistency and regular-key material) re-run
//! unconditionally after the per-action table.

use trellis_lines::FlagToggles;
use trellis_types::{is_valid_address, is_valid_currency, is_valid_seed, AccountAddress};

use crate::error::WalletError;
use crate::gateway::LedgerGateway;

/// The actions the wallet core supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Create or modify a trust line.
    SetLine,
    /// Zero out and delete a trust line.
    RemoveLine,
    /// Issue currency to a destination.
    Issue,
    /// Claw issued tokens back from a holder.
    Clawback,
    /// Toggle the account-level default-ripple option.
    SetDefaultRipple,
}

/// Everything an action invocation might need, collected up front.
///
/// String fields use the empty string for "not provided", mirroring the
/// form fields they come from; required-field checks treat whitespace-only
/// values as empty. Constructed fresh per invocation, never persisted.
#[derive(Clone, Debug, Default)]
pub struct ValidationInput {
    pub local_account: String,
    pub seed: String,
    pub currency: String,
    pub counterparty: String,
    pub destination: String,
    pub limit_value: String,
    pub issue_value: String,
    pub destination_tag: String,
    pub memo: String,
    pub flags: FlagToggles,

    pub ticket_mode: bool,
    pub selected_ticket: Option<u32>,
    pub bulk_tickets: bool,

    pub regular_key_enabled: bool,
    pub regular_key_address: String,
    pub regular_key_seed: String,

    pub multi_sign_enabled: bool,
    pub signer_addresses: Vec<String>,
    pub signer_seeds: Vec<String>,
    pub signer_quorum: Option<u32>,

    /// From fetched account metadata, not user input.
    pub master_key_disabled: bool,
}

/// Input fields addressable by validation rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Seed,
    Currency,
    Counterparty,
    Destination,
    LimitValue,
    IssueValue,
    DestinationTag,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Seed => "Secret seed",
            Field::Currency => "Currency code",
            Field::Counterparty => "Counterparty address",
            Field::Destination => "Destination address",
            Field::LimitValue => "Trust limit",
            Field::IssueValue => "Amount",
            Field::DestinationTag => "Destination tag",
        }
    }
}

fn value(input: &ValidationInput, field: Field) -> &str {
    match field {
        Field::Seed => &input.seed,
        Field::Currency => &input.currency,
        Field::Counterparty => &input.counterparty,
        Field::Destination => &input.destination,
        Field::LimitValue => &input.limit_value,
        Field::IssueValue => &input.issue_value,
        Field::DestinationTag => &input.destination_tag,
    }
}

/// A synchronous rule descriptor.
///
/// Descriptors are data, not closures, so every rule is independently
/// testable and an action can never silently fall through to an empty
/// rule set.
#[derive(Clone, Copy, Debug)]
pub enum SyncRule {
    /// Must parse as a finite number. Empty passes unless `required`; an
    /// exclusive minimum means the value must be strictly greater.
    Numeric {
        field: Field,
        min_exclusive: Option<f64>,
        required: bool,
    },
    /// Must be a well-formed account address.
    Address { field: Field },
    /// Must be a well-formed secret seed.
    Seed { field: Field },
    /// Must be a well-formed currency code.
    Currency { field: Field },
    /// Must differ from the local account (no self-payments).
    NotSelf { field: Field },
    /// No "set X" toggle may be on together with its "clear X" pair.
    FlagConflicts,
    /// Ticket mode needs a selected ticket unless bulk mode is active.
    TicketSelected,
    /// A disabled master key needs a regular key or multi-signing.
    MasterKeyEscape,
}

/// A rule that needs a ledger round-trip.
#[derive(Clone, Copy, Debug)]
pub enum NetworkRule {
    /// The destination account may flag itself as requiring a tag.
    DestinationTagRequired { field: Field },
}

/// The complete rule set for one action.
pub struct ActionRules {
    pub required: &'static [Field],
    pub sync: &'static [SyncRule],
    pub network: &'static [NetworkRule],
}

static SET_LINE_RULES: ActionRules = ActionRules {
    required: &[
        Field::Seed,
        Field::Currency,
        Field::Counterparty,
        Field::LimitValue,
    ],
    sync: &[
        SyncRule::Seed { field: Field::Seed },
        SyncRule::Currency { field: Field::Currency },
        SyncRule::Address {
            field: Field::Counterparty,
        },
        SyncRule::Numeric {
            field: Field::LimitValue,
            min_exclusive: Some(0.0),
            required: false,
        },
        SyncRule::FlagConflicts,
        SyncRule::TicketSelected,
        SyncRule::MasterKeyEscape,
    ],
    network: &[],
};

static REMOVE_LINE_RULES: ActionRules = ActionRules {
    required: &[Field::Seed, Field::Currency, Field::Counterparty],
    sync: &[
        SyncRule::Seed { field: Field::Seed },
        SyncRule::Currency { field: Field::Currency },
        SyncRule::Address {
            field: Field::Counterparty,
        },
        SyncRule::TicketSelected,
        SyncRule::MasterKeyEscape,
    ],
    network: &[],
};

static ISSUE_RULES: ActionRules = ActionRules {
    required: &[
        Field::Seed,
        Field::Currency,
        Field::Destination,
        Field::IssueValue,
    ],
    sync: &[
        SyncRule::Seed { field: Field::Seed },
        SyncRule::Currency { field: Field::Currency },
        SyncRule::Address {
            field: Field::Destination,
        },
        SyncRule::Numeric {
            field: Field::IssueValue,
            min_exclusive: Some(0.0),
            required: false,
        },
        SyncRule::Numeric {
            field: Field::DestinationTag,
            min_exclusive: None,
            required: false,
        },
        SyncRule::NotSelf {
            field: Field::Destination,
        },
        SyncRule::TicketSelected,
        SyncRule::MasterKeyEscape,
    ],
    network: &[NetworkRule::DestinationTagRequired {
        field: Field::Destination,
    }],
};

static CLAWBACK_RULES: ActionRules = ActionRules {
    required: &[
        Field::Seed,
        Field::Currency,
        Field::Counterparty,
        Field::IssueValue,
    ],
    sync: &[
        SyncRule::Seed { field: Field::Seed },
        SyncRule::Currency { field: Field::Currency },
        SyncRule::Address {
            field: Field::Counterparty,
        },
        SyncRule::Numeric {
            field: Field::IssueValue,
            min_exclusive: Some(0.0),
            required: false,
        },
        SyncRule::NotSelf {
            field: Field::Counterparty,
        },
        SyncRule::TicketSelected,
        SyncRule::MasterKeyEscape,
    ],
    network: &[],
};

static SET_DEFAULT_RIPPLE_RULES: ActionRules = ActionRules {
    required: &[Field::Seed],
    sync: &[
        SyncRule::Seed { field: Field::Seed },
        SyncRule::TicketSelected,
        SyncRule::MasterKeyEscape,
    ],
    network: &[],
};

/// The fixed rule set for an action.
pub fn rules_for(action: Action) -> &'static ActionRules {
    match action {
        Action::SetLine => &SET_LINE_RULES,
        Action::RemoveLine => &REMOVE_LINE_RULES,
        Action::Issue => &ISSUE_RULES,
        Action::Clawback => &CLAWBACK_RULES,
        Action::SetDefaultRipple => &SET_DEFAULT_RIPPLE_RULES,
    }
}

// ── Individual validators ───────────────────────────────────────────────

/// Numeric check. Empty is not a numeric error (the required-field pass
/// owns that) unless the rule is marked required.
pub fn check_numeric(
    raw: &str,
    min_exclusive: Option<f64>,
    required: bool,
    label: &str,
) -> Option<String> {
    if raw.trim().is_empty() {
        return required.then(|| format!("{label} is required"));
    }
    let parsed: f64 = match raw.trim().parse() {
        Ok(v) if f64::is_finite(v) => v,
        _ => return Some(format!("{label} must be a number")),
    };
    if let Some(min) = min_exclusive {
        if parsed <= min {
            return Some(format!("{label} must be greater than {min}"));
        }
    }
    None
}

fn apply_sync(rule: &SyncRule, input: &ValidationInput, errors: &mut Vec<String>) {
    match rule {
        SyncRule::Numeric {
            field,
            min_exclusive,
            required,
        } => {
            if let Some(msg) =
                check_numeric(value(input, *field), *min_exclusive, *required, field.label())
            {
                errors.push(msg);
            }
        }
        SyncRule::Address { field } => {
            let raw = value(input, *field).trim();
            if !raw.is_empty() && !is_valid_address(raw) {
                errors.push(format!("{} is not a valid address", field.label()));
            }
        }
        SyncRule::Seed { field } => {
            let raw = value(input, *field).trim();
            if !raw.is_empty() && !is_valid_seed(raw) {
                errors.push(format!("{} is not a valid seed", field.label()));
            }
        }
        SyncRule::Currency { field } => {
            let raw = value(input, *field).trim();
            if !raw.is_empty() && !is_valid_currency(raw) {
                errors.push(format!("{} is not a valid currency code", field.label()));
            }
        }
        SyncRule::NotSelf { field } => {
            let raw = value(input, *field).trim();
            if !raw.is_empty() && raw == input.local_account {
                errors.push(format!(
                    "{} must not be the issuing account itself",
                    field.label()
                ));
            }
        }
        SyncRule::FlagConflicts => {
            for (set, clear) in input.flags.conflicts() {
                errors.push(format!(
                    "flags {} and {} are mutually exclusive",
                    set.name(),
                    clear.name()
                ));
            }
        }
        SyncRule::TicketSelected => {
            if input.ticket_mode && input.selected_ticket.is_none() && !input.bulk_tickets {
                errors.push("a ticket must be selected when ticket mode is enabled".to_string());
            }
        }
        SyncRule::MasterKeyEscape => {
            if input.master_key_disabled
                && !input.regular_key_enabled
                && !input.multi_sign_enabled
            {
                errors.push(
                    "the master key is disabled: sign with a regular key or multi-signing"
                        .to_string(),
                );
            }
        }
    }
}

/// Multi-sign consistency: address/seed counts must align, every entry
/// must be well-formed, and the quorum must not exceed the total signer
/// weight. Runs unconditionally after the per-action table.
fn check_multi_sign(input: &ValidationInput, errors: &mut Vec<String>) {
    if !input.multi_sign_enabled {
        return;
    }

    if input.signer_addresses.is_empty() {
        errors.push("multi-signing needs at least one signer address".to_string());
    }
    if input.signer_addresses.len() != input.signer_seeds.len() {
        errors.push(format!(
            "signer address and seed counts do not match ({} addresses, {} seeds)",
            input.signer_addresses.len(),
            input.signer_seeds.len()
        ));
    }
    for (index, address) in input.signer_addresses.iter().enumerate() {
        if !is_valid_address(address.trim()) {
            errors.push(format!("signer address #{} is not valid", index + 1));
        }
    }
    for (index, seed) in input.signer_seeds.iter().enumerate() {
        if !is_valid_seed(seed.trim()) {
            errors.push(format!("signer seed #{} is not valid", index + 1));
        }
    }
    if let Some(quorum) = input.signer_quorum {
        // one weight unit per configured signer
        let total_weight = input.signer_addresses.len() as u32;
        if quorum == 0 {
            errors.push("signer quorum must be at least 1".to_string());
        } else if quorum > total_weight {
            errors.push(format!(
                "signer quorum {quorum} exceeds the total signer weight {total_weight}"
            ));
        }
    }
}

/// Regular-key material format check. Runs unconditionally after the
/// per-action table.
fn check_regular_key(input: &ValidationInput, errors: &mut Vec<String>) {
    if !input.regular_key_enabled {
        return;
    }

    let address = input.regular_key_address.trim();
    if !address.is_empty() && !is_valid_address(address) {
        errors.push("regular key address is not valid".to_string());
    }
    let seed = input.regular_key_seed.trim();
    if seed.is_empty() {
        errors.push("regular key seed is required".to_string());
    } else if !is_valid_seed(seed) {
        errors.push("regular key seed is not valid".to_string());
    }
}

/// Run the required-field pass and every synchronous rule, collecting all
/// failures in order.
pub fn run_sync(action: Action, input: &ValidationInput) -> Vec<String> {
    let rules = rules_for(action);
    let mut errors = Vec::new();

    for field in rules.required {
        if value(input, *field).trim().is_empty() {
            errors.push(format!("{} is required", field.label()));
        }
    }
    for rule in rules.sync {
        apply_sync(rule, input, &mut errors);
    }

    check_multi_sign(input, &mut errors);
    check_regular_key(input, &mut errors);

    errors
}

/// Run the action's network rules sequentially, appending their failures.
///
/// Rule evaluation itself never fails the action; only transport errors
/// bubble up.
pub async fn run_network<G: LedgerGateway>(
    action: Action,
    input: &ValidationInput,
    gateway: &G,
) -> Result<Vec<String>, WalletError> {
    let rules = rules_for(action);
    let mut errors = Vec::new();

    for rule in rules.network {
        match rule {
            NetworkRule::DestinationTagRequired { field } => {
                let raw = value(input, *field).trim();
                let destination = match AccountAddress::parse(raw) {
                    Ok(addr) => addr,
                    // format problems were already collected by the sync pass
                    Err(_) => continue,
                };
                let info = gateway.account_info(&destination).await?;
                let tag_given = input
                    .destination_tag
                    .trim()
                    .parse::<u32>()
                    .map(|tag| tag > 0)
                    .unwrap_or(false);
                if info.requires_destination_tag() && !tag_given {
                    errors.push(format!(
                        "{} requires a destination tag",
                        field.label()
                    ));
                }
            }
        }
    }

    Ok(errors)
}
