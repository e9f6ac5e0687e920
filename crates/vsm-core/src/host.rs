//! The two sides of the simulator boundary.
//!
//! - [`DsimModel`] — simulator → model calls (the model's entry points).
//! - [`SimulatorHost`] — model → simulator calls.
//!
//! The simulator owns the only thread of control.  It calls into the model
//! synchronously, and every host method is a synchronous call back out.  A
//! model instance talks to exactly one host for its whole lifetime.

use std::path::Path;

use crate::{AbsTime, EventId, LogicState, PinHandle, RawState, RelTime, RunMode, Severity, SimMode};

// ── Simulator → model ─────────────────────────────────────────────────────────

/// Digital model entry points, called by the simulator.
///
/// Every call receives the host so the model can call back out; the model
/// never stores the host reference.
pub trait DsimModel {
    type Error: std::error::Error;

    /// Whether the named pin is digital.  Digital-only models answer `true`.
    fn is_digital(&self, _pin_name: &str) -> bool {
        true
    }

    /// One-time activation, before any other notification.
    fn setup(&mut self, host: &mut dyn SimulatorHost) -> Result<(), Self::Error>;

    /// Run-mode change (start, stop, suspend, step, …).
    fn run_control(&mut self, host: &mut dyn SimulatorHost, mode: RunMode) -> Result<(), Self::Error>;

    /// Actuator input from an interactive component.
    fn actuate(
        &mut self,
        host:  &mut dyn SimulatorHost,
        time:  AbsTime,
        state: ActiveState,
    ) -> Result<(), Self::Error>;

    /// Indicator output request.  Returns `true` if `data` was filled in.
    fn indicate(&mut self, host: &mut dyn SimulatorHost, time: AbsTime, data: &mut ActiveData) -> bool;

    /// Per-step evaluation.
    fn simulate(
        &mut self,
        host: &mut dyn SimulatorHost,
        time: AbsTime,
        mode: SimMode,
    ) -> Result<(), Self::Error>;

    /// A timer armed through [`SimulatorHost::arm_timer`] has fired.
    fn callback(
        &mut self,
        host:  &mut dyn SimulatorHost,
        time:  AbsTime,
        event: EventId,
    ) -> Result<(), Self::Error>;

    /// Release the model.  No entry point may do work afterwards.
    fn teardown(&mut self);
}

/// State reported by an interactive actuator (switch position, key code, …).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveState(pub i32);

/// Payload a model may hand back to an indicator component.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActiveData {
    #[default]
    None,
    Integer(i64),
    Real(f64),
    State(LogicState),
}

// ── Model → simulator ─────────────────────────────────────────────────────────

/// Engine → simulator calls.
///
/// Pin queries take a [`PinHandle`] previously returned by
/// [`resolve_pin`](Self::resolve_pin).  Passing any other handle is a host
/// contract violation; implementations may answer with defaults.
pub trait SimulatorHost {
    /// Look up a device pin by its schematic name.
    fn resolve_pin(&mut self, name: &str) -> Option<PinHandle>;

    /// Drive `pin` to `state`, starting at `time`, with `delay` as the
    /// strength-transition delay.
    fn set_pin_state(&mut self, pin: PinHandle, time: AbsTime, delay: RelTime, state: LogicState);

    /// The pin's current input state, as the raw wire integer.
    ///
    /// The engine decodes this itself; hosts must not pre-filter unknown
    /// values.
    fn pin_state(&self, pin: PinHandle) -> RawState;

    /// `true` if the pin's state changed in the current step.
    fn is_active(&self, _pin: PinHandle) -> bool {
        false
    }

    /// `true` if the pin went low → high in the current step.
    fn is_posedge(&self, _pin: PinHandle) -> bool {
        false
    }

    /// `true` if the pin went high → low in the current step.
    fn is_negedge(&self, _pin: PinHandle) -> bool {
        false
    }

    /// `true` on either edge.
    fn is_edge(&self, pin: PinHandle) -> bool {
        self.is_posedge(pin) || self.is_negedge(pin)
    }

    /// `true` if the pin has not changed in the current step.
    fn is_steady(&self, pin: PinHandle) -> bool {
        !self.is_active(pin)
    }

    /// Request a call to the model's `callback` entry point `delay` after the
    /// current time, tagged with `event`.  There is no cancellation.
    fn arm_timer(&mut self, delay: RelTime, event: EventId);

    /// Current simulation time.
    fn now(&self) -> AbsTime;

    /// Write one line to the log sink selected by `severity`.
    fn log(&mut self, severity: Severity, message: &str);

    /// Raw text of a component property, or `None` if it is not set.
    fn property(&self, _name: &str) -> Option<String> {
        None
    }

    /// Read the memory image at `path` into `buffer`, up to its length.  The
    /// host resolves `path`.  Returns the number of bytes read, or `None` if
    /// the image could not be loaded.
    fn load_memory(&mut self, _path: &Path, _buffer: &mut [u8]) -> Option<usize> {
        None
    }
}

/// The simulator's licence server, consulted once when a model is created.
pub trait LicenceServer {
    /// `true` if the model identified by `key` may run against `api_version`.
    fn authorize(&mut self, key: u32, api_version: u32) -> bool;
}

/// A licence server that grants every request.  Useful in tests and in hosts
/// that have no licensing.
pub struct GrantAll;

impl LicenceServer for GrantAll {
    fn authorize(&mut self, _key: u32, _api_version: u32) -> bool {
        true
    }
}
