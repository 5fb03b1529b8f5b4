//! Trust-line option flags.
//!
//! Two distinct flag spaces share this module:
//! - transaction option toggles carried on a TrustSet (`TF_*`), where a
//!   "set" flag and its "clear" counterpart are mutually exclusive;
//! - ledger state bits on a `RippleState` entry (`LSF_*`), where
//!   authorization and freeze have distinct low-side and high-side bits
//!   while no-ripple is a single shared bit. Decoding therefore needs to
//!   know which side of the line the local account occupies.

// ── Transaction toggles ─────────────────────────────────────────────────

pub const TF_SET_AUTH: u32 = 0x0001_0000;
pub const TF_SET_NO_RIPPLE: u32 = 0x0002_0000;
pub const TF_CLEAR_NO_RIPPLE: u32 = 0x0004_0000;
pub const TF_SET_FREEZE: u32 = 0x0010_0000;
pub const TF_CLEAR_FREEZE: u32 = 0x0020_0000;

/// A single TrustSet option toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrustSetFlag {
    SetAuth,
    SetNoRipple,
    ClearNoRipple,
    SetFreeze,
    ClearFreeze,
}

impl TrustSetFlag {
    pub const ALL: [TrustSetFlag; 5] = [
        TrustSetFlag::SetAuth,
        TrustSetFlag::SetNoRipple,
        TrustSetFlag::ClearNoRipple,
        TrustSetFlag::SetFreeze,
        TrustSetFlag::ClearFreeze,
    ];

    /// The bit value this toggle contributes to the transaction flags field.
    pub fn bit(self) -> u32 {
        match self {
            TrustSetFlag::SetAuth => TF_SET_AUTH,
            TrustSetFlag::SetNoRipple => TF_SET_NO_RIPPLE,
            TrustSetFlag::ClearNoRipple => TF_CLEAR_NO_RIPPLE,
            TrustSetFlag::SetFreeze => TF_SET_FREEZE,
            TrustSetFlag::ClearFreeze => TF_CLEAR_FREEZE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TrustSetFlag::SetAuth => "set-auth",
            TrustSetFlag::SetNoRipple => "set-no-ripple",
            TrustSetFlag::ClearNoRipple => "clear-no-ripple",
            TrustSetFlag::SetFreeze => "set-freeze",
            TrustSetFlag::ClearFreeze => "clear-freeze",
        }
    }
}

/// The mutually exclusive toggle pairs: a set-flag and its clear-counterpart.
pub const CONFLICTING_PAIRS: [(TrustSetFlag, TrustSetFlag); 2] = [
    (TrustSetFlag::SetNoRipple, TrustSetFlag::ClearNoRipple),
    (TrustSetFlag::SetFreeze, TrustSetFlag::ClearFreeze),
];

/// The current state of every TrustSet option toggle.
///
/// Fields are private: turning a "set" toggle on goes through [`set`],
/// which forces the paired "clear" toggle off. The reverse is not
/// auto-applied, so a conflicting pair can still be assembled and must be
/// caught by validation via [`conflicts`] before submission.
///
/// [`set`]: FlagToggles::set
/// [`conflicts`]: FlagToggles::conflicts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlagToggles {
    set_auth: bool,
    set_no_ripple: bool,
    clear_no_ripple: bool,
    set_freeze: bool,
    clear_freeze: bool,
}

impl FlagToggles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn a toggle on or off. Turning a "set" flag on forces its paired
    /// "clear" flag off.
    pub fn set(&mut self, flag: TrustSetFlag, on: bool) {
        match flag {
            TrustSetFlag::SetAuth => self.set_auth = on,
            TrustSetFlag::SetNoRipple => {
                self.set_no_ripple = on;
                if on {
                    self.clear_no_ripple = false;
                }
            }
            TrustSetFlag::ClearNoRipple => self.clear_no_ripple = on,
            TrustSetFlag::SetFreeze => {
                self.set_freeze = on;
                if on {
                    self.clear_freeze = false;
                }
            }
            TrustSetFlag::ClearFreeze => self.clear_freeze = on,
        }
    }

    pub fn get(&self, flag: TrustSetFlag) -> bool {
        match flag {
            TrustSetFlag::SetAuth => self.set_auth,
            TrustSetFlag::SetNoRipple => self.set_no_ripple,
            TrustSetFlag::ClearNoRipple => self.clear_no_ripple,
            TrustSetFlag::SetFreeze => self.set_freeze,
            TrustSetFlag::ClearFreeze => self.clear_freeze,
        }
    }

    /// OR together the bit values of every toggle currently on.
    pub fn encode(&self) -> u32 {
        TrustSetFlag::ALL
            .iter()
            .filter(|f| self.get(**f))
            .fold(0, |mask, f| mask | f.bit())
    }

    /// Decode a transaction flags field back into the named toggles it has set.
    pub fn decode(mask: u32) -> Vec<TrustSetFlag> {
        TrustSetFlag::ALL
            .iter()
            .copied()
            .filter(|f| mask & f.bit() != 0)
            .collect()
    }

    /// Every conflicting pair with both members currently on.
    pub fn conflicts(&self) -> Vec<(TrustSetFlag, TrustSetFlag)> {
        CONFLICTING_PAIRS
            .iter()
            .copied()
            .filter(|(set, clear)| self.get(*set) && self.get(*clear))
            .collect()
    }
}

// ── Ledger state bits ───────────────────────────────────────────────────

/// Shared no-ripple bit (same bit regardless of side).
pub const LSF_NO_RIPPLE: u32 = 0x0010_0000;
pub const LSF_LOW_AUTH: u32 = 0x0004_0000;
pub const LSF_HIGH_AUTH: u32 = 0x0008_0000;
pub const LSF_LOW_FREEZE: u32 = 0x0040_0000;
pub const LSF_HIGH_FREEZE: u32 = 0x0080_0000;

/// Decoded `RippleState` flags from the local account's perspective.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineFlags {
    pub no_ripple: bool,
    /// The local side has authorized the counterparty to hold its tokens.
    pub authorized: bool,
    /// The counterparty has authorized the local account.
    pub peer_authorized: bool,
    /// The local side has frozen the line.
    pub frozen: bool,
    /// The counterparty has frozen the line.
    pub peer_frozen: bool,
}

impl LineFlags {
    /// Decode a ledger bitmask, selecting the bit subset that applies to
    /// the side of the line the local account occupies.
    pub fn decode(mask: u32, is_low_side: bool) -> Self {
        let (own_auth, peer_auth, own_freeze, peer_freeze) = if is_low_side {
            (LSF_LOW_AUTH, LSF_HIGH_AUTH, LSF_LOW_FREEZE, LSF_HIGH_FREEZE)
        } else {
            (LSF_HIGH_AUTH, LSF_LOW_AUTH, LSF_HIGH_FREEZE, LSF_LOW_FREEZE)
        };
        Self {
            no_ripple: mask & LSF_NO_RIPPLE != 0,
            authorized: mask & own_auth != 0,
            peer_authorized: mask & peer_auth != 0,
            frozen: mask & own_freeze != 0,
            peer_frozen: mask & peer_freeze != 0,
        }
    }

    /// Names of the flags currently set, for display.
    pub fn names(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.no_ripple {
            out.push("no-ripple");
        }
        if self.authorized {
            out.push("authorized");
        }
        if self.peer_authorized {
            out.push("peer-authorized");
        }
        if self.frozen {
            out.push("frozen");
        }
        if self.peer_frozen {
            out.push("peer-frozen");
        }
        out
    }
}
