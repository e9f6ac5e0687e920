//! Multi-valued logic state codec.
//!
//! The simulator exchanges pin states as a packed integer.  Three fields share
//! the low byte:
//!
//! ```text
//!  bit  7   6   5   4   3   2   1   0
//!      [ flags ][   strength  ][ pol ]
//!               SS_MASK 0x1C   SP_MASK 0x03
//!          SF_CONTENTION 0x20
//! ```
//!
//! Fourteen named values are meaningful on the wire.  [`LogicState`] is a
//! closed enum over those fourteen plus an [`Unrecognized`] fallback that
//! keeps the raw integer.  Unrecognized values decode as UNDEFINED; decoding
//! never fails.
//!
//! Two of the named values are pseudo-states whose raw bits do not follow the
//! field layout: `TSTATE` (raw `1`) is a released, high-impedance output and
//! `FSTATE` (raw `-1`) is a contended/fault state.  They are classified by the
//! canonical table below, not by mask arithmetic.
//!
//! | state     | polarity  | strength | contention |
//! |-----------|-----------|----------|------------|
//! | UNDEFINED | Undefined | Undriven | no         |
//! | TSTATE    | Floating  | Undriven | no         |
//! | FSTATE    | Undefined | Undriven | yes        |
//! | PLO / PHI | Low/High  | Pull     | no         |
//! | ILO / IHI | Low/High  | Input    | no         |
//! | SLO / SHI | Low/High  | Strong   | no         |
//! | WLO / WHI | Low/High  | Weak     | no         |
//! | FLT       | Floating  | Undriven | no         |
//! | WUD / SUD | Undefined | Weak/Strong | no      |
//!
//! [`Unrecognized`]: LogicState::Unrecognized

use std::fmt;
use std::str::FromStr;

use crate::VsmError;

// ── Wire-format bit fields ────────────────────────────────────────────────────

/// Raw integer form of a pin state as exchanged with the simulator.
pub type RawState = i32;

pub const SP_UNDEFINED: RawState = 0x00;
pub const SP_LOW: RawState = 0x01;
pub const SP_FLOAT: RawState = 0x02;
pub const SP_HIGH: RawState = 0x03;
/// Polarity field mask.
pub const SP_MASK: RawState = 0x03;

pub const SS_FLOAT: RawState = 0x00;
pub const SS_WEAK: RawState = 0x04;
pub const SS_STRONG: RawState = 0x0C;
pub const SS_INJECT: RawState = 0x14;
pub const SS_POWER: RawState = 0x1C;
/// Strength field mask.
pub const SS_MASK: RawState = 0x1C;

/// Set when conflicting drivers disagree on the net value.
pub const SF_CONTENTION: RawState = 0x20;

const RAW_UNDEFINED: RawState = 0;
const RAW_TSTATE: RawState = 1;
const RAW_FSTATE: RawState = -1;
const RAW_PLO: RawState = SS_POWER + SP_LOW;
const RAW_ILO: RawState = SS_INJECT + SP_LOW;
const RAW_SLO: RawState = SS_STRONG + SP_LOW;
const RAW_WLO: RawState = SS_WEAK + SP_LOW;
const RAW_FLT: RawState = SS_FLOAT + SP_FLOAT;
const RAW_WHI: RawState = SS_WEAK + SP_HIGH;
const RAW_SHI: RawState = SS_STRONG + SP_HIGH;
const RAW_IHI: RawState = SS_INJECT + SP_HIGH;
const RAW_PHI: RawState = SS_POWER + SP_HIGH;
const RAW_WUD: RawState = SS_WEAK + SP_UNDEFINED;
const RAW_SUD: RawState = SS_STRONG + SP_UNDEFINED;

// ── Decoded fields ────────────────────────────────────────────────────────────

/// Logical level of a signal, independent of drive strength.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Polarity {
    Low,
    High,
    Floating,
    Undefined,
}

/// Drive class of a signal.
///
/// Ordered from weakest to strongest driver, so `max()` over a set of drivers
/// picks the one that wins.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strength {
    /// Nothing drives the net (`SS_FLOAT`).
    Undriven,
    Weak,
    Strong,
    /// Generator / stimulus input (`SS_INJECT`).
    Input,
    /// Supply rail (`SS_POWER`).
    Pull,
}

impl Strength {
    /// The `SS_*` field value for this strength.
    pub fn bits(self) -> RawState {
        match self {
            Strength::Undriven => SS_FLOAT,
            Strength::Weak => SS_WEAK,
            Strength::Strong => SS_STRONG,
            Strength::Input => SS_INJECT,
            Strength::Pull => SS_POWER,
        }
    }
}

/// All fields of a [`LogicState`], as returned by [`LogicState::decode`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Decoded {
    pub polarity:   Polarity,
    pub strength:   Strength,
    pub contention: bool,
    pub defined:    bool,
}

/// Two-valued reading of a state, with an explicit third outcome for states
/// that are neither clearly low nor clearly high.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Level {
    Low,
    High,
    Indeterminate,
}

impl Level {
    /// `Some(false)` / `Some(true)` for a clear level, `None` otherwise.
    #[inline]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Level::Low => Some(false),
            Level::High => Some(true),
            Level::Indeterminate => None,
        }
    }

    /// `0`, `1`, or `-1` for indeterminate, the integer convention scripts
    /// expect from a pin read.
    #[inline]
    pub fn as_int(self) -> i32 {
        match self {
            Level::Low => 0,
            Level::High => 1,
            Level::Indeterminate => -1,
        }
    }
}

// ── UnknownRaw ────────────────────────────────────────────────────────────────

/// A raw wire value that is not one of the fourteen named states.
///
/// Only [`LogicState::from_raw`] builds one, so `Unrecognized` can never
/// alias a named state.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawState", into = "RawState")
)]
pub struct UnknownRaw(RawState);

impl UnknownRaw {
    #[inline]
    pub fn get(self) -> RawState {
        self.0
    }
}

impl From<UnknownRaw> for RawState {
    #[inline]
    fn from(unknown: UnknownRaw) -> RawState {
        unknown.0
    }
}

impl TryFrom<RawState> for UnknownRaw {
    type Error = VsmError;

    fn try_from(raw: RawState) -> Result<UnknownRaw, VsmError> {
        match LogicState::from_raw(raw) {
            LogicState::Unrecognized(unknown) => Ok(unknown),
            named => Err(VsmError::Parse(format!("raw state {raw:#x} is {named}, not unrecognized"))),
        }
    }
}

// ── LogicState ────────────────────────────────────────────────────────────────

/// One of the simulator's fourteen named pin states, or an unrecognized raw
/// value.
///
/// Variants carry the strength/polarity in their names; the conventional
/// three-letter mnemonics are available as associated constants
/// (`LogicState::SHI`, `LogicState::WLO`, …).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogicState {
    #[default]
    Undefined,
    TState,
    FState,
    PullLow,
    InputLow,
    StrongLow,
    WeakLow,
    Float,
    WeakHigh,
    StrongHigh,
    InputHigh,
    PullHigh,
    WeakUndefined,
    StrongUndefined,
    /// Any raw value outside the named set.  Treated as UNDEFINED everywhere.
    Unrecognized(UnknownRaw),
}

/// The fourteen named states in canonical order.
pub const ALL_STATES: [LogicState; 14] = [
    LogicState::UNDEFINED,
    LogicState::TSTATE,
    LogicState::FSTATE,
    LogicState::PLO,
    LogicState::ILO,
    LogicState::SLO,
    LogicState::WLO,
    LogicState::FLT,
    LogicState::WHI,
    LogicState::SHI,
    LogicState::IHI,
    LogicState::PHI,
    LogicState::WUD,
    LogicState::SUD,
];

impl LogicState {
    pub const UNDEFINED: LogicState = LogicState::Undefined;
    pub const TSTATE: LogicState = LogicState::TState;
    pub const FSTATE: LogicState = LogicState::FState;
    pub const PLO: LogicState = LogicState::PullLow;
    pub const ILO: LogicState = LogicState::InputLow;
    pub const SLO: LogicState = LogicState::StrongLow;
    pub const WLO: LogicState = LogicState::WeakLow;
    pub const FLT: LogicState = LogicState::Float;
    pub const WHI: LogicState = LogicState::WeakHigh;
    pub const SHI: LogicState = LogicState::StrongHigh;
    pub const IHI: LogicState = LogicState::InputHigh;
    pub const PHI: LogicState = LogicState::PullHigh;
    pub const WUD: LogicState = LogicState::WeakUndefined;
    pub const SUD: LogicState = LogicState::StrongUndefined;

    /// Classify a raw wire value.  Total: unknown values become
    /// [`Unrecognized`](LogicState::Unrecognized).
    pub fn from_raw(raw: RawState) -> LogicState {
        match raw {
            RAW_UNDEFINED => LogicState::Undefined,
            RAW_TSTATE => LogicState::TState,
            RAW_FSTATE => LogicState::FState,
            RAW_PLO => LogicState::PullLow,
            RAW_ILO => LogicState::InputLow,
            RAW_SLO => LogicState::StrongLow,
            RAW_WLO => LogicState::WeakLow,
            RAW_FLT => LogicState::Float,
            RAW_WHI => LogicState::WeakHigh,
            RAW_SHI => LogicState::StrongHigh,
            RAW_IHI => LogicState::InputHigh,
            RAW_PHI => LogicState::PullHigh,
            RAW_WUD => LogicState::WeakUndefined,
            RAW_SUD => LogicState::StrongUndefined,
            other => LogicState::Unrecognized(UnknownRaw(other)),
        }
    }

    /// The wire value.  `from_raw(s.raw()) == s` for every state.
    pub fn raw(self) -> RawState {
        match self {
            LogicState::Undefined => RAW_UNDEFINED,
            LogicState::TState => RAW_TSTATE,
            LogicState::FState => RAW_FSTATE,
            LogicState::PullLow => RAW_PLO,
            LogicState::InputLow => RAW_ILO,
            LogicState::StrongLow => RAW_SLO,
            LogicState::WeakLow => RAW_WLO,
            LogicState::Float => RAW_FLT,
            LogicState::WeakHigh => RAW_WHI,
            LogicState::StrongHigh => RAW_SHI,
            LogicState::InputHigh => RAW_IHI,
            LogicState::PullHigh => RAW_PHI,
            LogicState::WeakUndefined => RAW_WUD,
            LogicState::StrongUndefined => RAW_SUD,
            LogicState::Unrecognized(unknown) => unknown.0,
        }
    }

    /// Strong rail state for a boolean level: `true` → SHI, `false` → SLO.
    #[inline]
    pub fn from_bool(level: bool) -> LogicState {
        if level { LogicState::SHI } else { LogicState::SLO }
    }

    /// Split the state into its fields.
    pub fn decode(self) -> Decoded {
        use Polarity as P;
        use Strength as S;

        let (polarity, strength, contention) = match self {
            LogicState::Undefined => (P::Undefined, S::Undriven, false),
            LogicState::TState => (P::Floating, S::Undriven, false),
            LogicState::FState => (P::Undefined, S::Undriven, true),
            LogicState::PullLow => (P::Low, S::Pull, false),
            LogicState::InputLow => (P::Low, S::Input, false),
            LogicState::StrongLow => (P::Low, S::Strong, false),
            LogicState::WeakLow => (P::Low, S::Weak, false),
            LogicState::Float => (P::Floating, S::Undriven, false),
            LogicState::WeakHigh => (P::High, S::Weak, false),
            LogicState::StrongHigh => (P::High, S::Strong, false),
            LogicState::InputHigh => (P::High, S::Input, false),
            LogicState::PullHigh => (P::High, S::Pull, false),
            LogicState::WeakUndefined => (P::Undefined, S::Weak, false),
            LogicState::StrongUndefined => (P::Undefined, S::Strong, false),
            LogicState::Unrecognized(_) => (P::Undefined, S::Undriven, false),
        };
        Decoded { polarity, strength, contention, defined: self.is_defined() }
    }

    #[inline]
    pub fn polarity(self) -> Polarity {
        self.decode().polarity
    }

    #[inline]
    pub fn strength(self) -> Strength {
        self.decode().strength
    }

    #[inline]
    pub fn is_low(self) -> bool {
        self.polarity() == Polarity::Low
    }

    #[inline]
    pub fn is_high(self) -> bool {
        self.polarity() == Polarity::High
    }

    #[inline]
    pub fn is_floating(self) -> bool {
        self.polarity() == Polarity::Floating
    }

    #[inline]
    pub fn is_contention(self) -> bool {
        self.decode().contention
    }

    /// `false` for the UNDEFINED sentinel and for unrecognized values.
    ///
    /// WUD and SUD are driven states with an unknown level; they count as
    /// defined.
    #[inline]
    pub fn is_defined(self) -> bool {
        !matches!(self, LogicState::Undefined | LogicState::Unrecognized(_))
    }

    /// Read the state as a logic level.
    ///
    /// Every LOW-polarity state (SLO, WLO, ILO, PLO) reads as
    /// [`Level::Low`], every HIGH-polarity state as [`Level::High`], and
    /// anything floating, undefined or unrecognized as
    /// [`Level::Indeterminate`].
    pub fn to_boolean(self) -> Level {
        match self.polarity() {
            Polarity::Low => Level::Low,
            Polarity::High => Level::High,
            Polarity::Floating | Polarity::Undefined => Level::Indeterminate,
        }
    }

    /// Canonical mnemonic, or `"wrong state"` for unrecognized values.
    pub fn name(self) -> &'static str {
        match self {
            LogicState::Undefined => "UNDEFINED",
            LogicState::TState => "TSTATE",
            LogicState::FState => "FSTATE",
            LogicState::PullLow => "PLO",
            LogicState::InputLow => "ILO",
            LogicState::StrongLow => "SLO",
            LogicState::WeakLow => "WLO",
            LogicState::Float => "FLT",
            LogicState::WeakHigh => "WHI",
            LogicState::StrongHigh => "SHI",
            LogicState::InputHigh => "IHI",
            LogicState::PullHigh => "PHI",
            LogicState::WeakUndefined => "WUD",
            LogicState::StrongUndefined => "SUD",
            LogicState::Unrecognized(_) => "wrong state",
        }
    }
}

impl From<RawState> for LogicState {
    #[inline]
    fn from(raw: RawState) -> LogicState {
        LogicState::from_raw(raw)
    }
}

impl From<LogicState> for RawState {
    #[inline]
    fn from(state: LogicState) -> RawState {
        state.raw()
    }
}

impl fmt::Display for LogicState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogicState {
    type Err = VsmError;

    /// Parse one of the fourteen mnemonics (case-insensitive).
    fn from_str(s: &str) -> Result<LogicState, VsmError> {
        let wanted = s.trim();
        ALL_STATES
            .into_iter()
            .find(|state| state.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| VsmError::Parse(format!("unknown logic state {wanted:?}")))
    }
}
