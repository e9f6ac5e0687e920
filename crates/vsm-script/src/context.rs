//! `DeviceContext` — everything a hook may touch while it runs.

use std::path::Path;

use vsm_core::props::{parse_bool, parse_hex, parse_init, parse_number};
use vsm_core::{AbsTime, EventId, Level, LogicState, PinId, RelTime, Severity, SimulatorHost};
use vsm_events::EventScheduler;
use vsm_pins::{Pin, PinRegistry};

use crate::{ScriptError, ScriptResult};

/// Borrowed view of the device handed to every hook.
///
/// The context borrows the pin registry read-only and the scheduler and
/// host mutably for the duration of one hook call.  It holds no way back to
/// the dispatcher, so a hook cannot trigger another notification.
pub struct DeviceContext<'a> {
    pins:      &'a PinRegistry,
    scheduler: &'a mut EventScheduler,
    host:      &'a mut dyn SimulatorHost,
}

impl<'a> DeviceContext<'a> {
    #[inline]
    pub fn new(
        pins:      &'a PinRegistry,
        scheduler: &'a mut EventScheduler,
        host:      &'a mut dyn SimulatorHost,
    ) -> Self {
        Self { pins, scheduler, host }
    }

    /// Current simulation time.
    pub fn now(&self) -> AbsTime {
        self.host.now()
    }

    pub fn pins(&self) -> &PinRegistry {
        self.pins
    }

    /// Pin number for a declared pin name.
    pub fn pin(&self, name: &str) -> ScriptResult<PinId> {
        self.pins
            .index_of(name)
            .ok_or_else(|| ScriptError::UnknownPin(name.to_owned()))
    }

    // ── Pin state ─────────────────────────────────────────────────────────

    pub fn state(&self, id: PinId) -> ScriptResult<LogicState> {
        Ok(self.pins.state(&*self.host, id)?)
    }

    pub fn level(&self, id: PinId) -> ScriptResult<Level> {
        Ok(self.pins.level(&*self.host, id)?)
    }

    pub fn set_state(&mut self, id: PinId, state: LogicState) -> ScriptResult<()> {
        Ok(self.pins.set_state(&mut *self.host, id, state)?)
    }

    /// Drive SHI for `true`, SLO for `false`.
    pub fn set_level(&mut self, id: PinId, level: bool) -> ScriptResult<()> {
        Ok(self.pins.set_level(&mut *self.host, id, level)?)
    }

    /// See [`PinRegistry::toggle`].
    pub fn toggle(&mut self, id: PinId) -> ScriptResult<Option<LogicState>> {
        Ok(self.pins.toggle(&mut *self.host, id)?)
    }

    pub fn is_low(&self, id: PinId) -> ScriptResult<bool> {
        self.state(id).map(LogicState::is_low)
    }

    pub fn is_high(&self, id: PinId) -> ScriptResult<bool> {
        self.state(id).map(LogicState::is_high)
    }

    pub fn is_floating(&self, id: PinId) -> ScriptResult<bool> {
        self.state(id).map(LogicState::is_floating)
    }

    // ── Pin activity ──────────────────────────────────────────────────────

    pub fn is_active(&self, id: PinId) -> ScriptResult<bool> {
        Ok(self.host.is_active(self.lookup(id)?.handle))
    }

    pub fn is_edge(&self, id: PinId) -> ScriptResult<bool> {
        Ok(self.host.is_edge(self.lookup(id)?.handle))
    }

    pub fn is_posedge(&self, id: PinId) -> ScriptResult<bool> {
        Ok(self.host.is_posedge(self.lookup(id)?.handle))
    }

    pub fn is_negedge(&self, id: PinId) -> ScriptResult<bool> {
        Ok(self.host.is_negedge(self.lookup(id)?.handle))
    }

    pub fn is_steady(&self, id: PinId) -> ScriptResult<bool> {
        Ok(self.host.is_steady(self.lookup(id)?.handle))
    }

    // ── Timers ────────────────────────────────────────────────────────────

    /// Request a `timer_callback` after `delay`, tagged with `event`.
    pub fn arm_timer(&mut self, delay: RelTime, event: EventId) {
        self.scheduler.arm(&mut *self.host, delay, event);
    }

    // ── Instance properties ───────────────────────────────────────────────
    //
    // Missing or unparsable properties yield the caller's default.

    pub fn string_param(&self, name: &str, default: &str) -> String {
        self.host.property(name).unwrap_or_else(|| default.to_owned())
    }

    pub fn bool_param(&self, name: &str, default: bool) -> bool {
        self.parsed(name, default, parse_bool)
    }

    /// Numeric property; SI suffixes (`10k`, `4.7u`) are honoured.
    pub fn num_param(&self, name: &str, default: f64) -> f64 {
        self.parsed(name, default, parse_number)
    }

    pub fn hex_param(&self, name: &str, default: u32) -> u32 {
        self.parsed(name, default, parse_hex)
    }

    pub fn init_param(&self, name: &str, default: i64) -> i64 {
        self.parsed(name, default, parse_init)
    }

    // ── Files ─────────────────────────────────────────────────────────────

    /// Have the host read a memory image into `buffer`, up to its length.
    /// Returns the number of bytes read; the rest of `buffer` is left
    /// untouched.
    pub fn load_image(&mut self, path: &Path, buffer: &mut [u8]) -> ScriptResult<usize> {
        let read = self
            .host
            .load_memory(path, buffer)
            .ok_or_else(|| ScriptError::Image(path.to_path_buf()))?;
        tracing::debug!(path = %path.display(), bytes = read, "loaded memory image");
        Ok(read)
    }

    // ── Logging ───────────────────────────────────────────────────────────

    /// Write to the simulator's log at `severity`.
    pub fn log(&mut self, severity: Severity, message: &str) {
        self.host.log(severity, message);
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn lookup(&self, id: PinId) -> ScriptResult<&Pin> {
        Ok(self.pins.get(id)?)
    }

    fn parsed<T, E>(&self, name: &str, default: T, parse: fn(&str) -> Result<T, E>) -> T {
        match self.host.property(name) {
            Some(text) => parse(&text).unwrap_or_else(|_| {
                tracing::debug!(property = name, value = %text, "unparsable property, using default");
                default
            }),
            None => default,
        }
    }
}
