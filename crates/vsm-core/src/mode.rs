//! Simulator run modes, per-step simulation modes, and log severities.

use std::fmt;

/// Run-control notification sent by the simulator when the user (or a batch
/// job) changes what the simulation is doing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunMode {
    /// Non-interactive batch run.
    Batch,
    Start,
    Stop,
    Suspend,
    /// Free-running animated simulation.
    Animate,
    StepTime,
    StepOver,
    StepInto,
    StepOut,
    StepTo,
    Meta,
    Dump,
}

impl RunMode {
    /// Every run mode, in wire order.
    pub const ALL: [RunMode; 12] = [
        RunMode::Batch,
        RunMode::Start,
        RunMode::Stop,
        RunMode::Suspend,
        RunMode::Animate,
        RunMode::StepTime,
        RunMode::StepOver,
        RunMode::StepInto,
        RunMode::StepOut,
        RunMode::StepTo,
        RunMode::Meta,
        RunMode::Dump,
    ];

    /// Decode the simulator's run-mode integer (`-1` = batch, then `0..=10`).
    pub fn from_raw(raw: i32) -> Option<RunMode> {
        let slot = usize::try_from(raw.checked_add(1)?).ok()?;
        Self::ALL.get(slot).copied()
    }

    /// The simulator's integer for this mode.
    pub fn raw(self) -> i32 {
        Self::ALL
            .iter()
            .position(|&m| m == self)
            .map_or(-1, |slot| slot as i32 - 1)
    }

    /// `true` for the single-step family (time, over, into, out, to).
    pub fn is_step(self) -> bool {
        matches!(
            self,
            RunMode::StepTime
                | RunMode::StepOver
                | RunMode::StepInto
                | RunMode::StepOut
                | RunMode::StepTo
        )
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Phase of the digital simulator in which a per-step `simulate` call happens.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimMode {
    /// Initial evaluation at time zero.
    Boot,
    /// Settling after boot, before time advances.
    Settle,
    #[default]
    Normal,
    /// Final evaluation at the end of the run.
    End,
}

impl SimMode {
    /// Decode the simulator's bit-flag encoding (`1`, `2`, `4`, `8`).
    pub fn from_raw(raw: u32) -> Option<SimMode> {
        match raw {
            0x01 => Some(SimMode::Boot),
            0x02 => Some(SimMode::Settle),
            0x04 => Some(SimMode::Normal),
            0x08 => Some(SimMode::End),
            _ => None,
        }
    }

    pub fn raw(self) -> u32 {
        match self {
            SimMode::Boot => 0x01,
            SimMode::Settle => 0x02,
            SimMode::Normal => 0x04,
            SimMode::End => 0x08,
        }
    }
}

/// Severity of a line sent to the simulator's log sinks.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// Simulation log only.
    Log,
    /// Informational message shown to the user.
    Message,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Log => "log",
            Severity::Message => "message",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}
