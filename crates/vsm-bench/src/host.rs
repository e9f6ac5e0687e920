//! `BenchHost` — a `SimulatorHost` backed by plain in-memory state.

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as HashMap;

use vsm_core::{AbsTime, EventId, LogicState, PinHandle, RawState, RelTime, Severity, SimulatorHost};
use vsm_events::TimerQueue;

/// One simulated pin.
#[derive(Clone, Debug)]
pub struct BenchPin {
    pub name:       String,
    /// Current raw state.  Raw so tests can inject unrecognized values.
    pub state:      RawState,
    /// State before the most recent change.
    pub previous:   RawState,
    /// Time of the most recent change.
    pub changed_at: Option<AbsTime>,
    /// Step in which the most recent change happened.
    changed_in: Option<u64>,
}

/// One `set_pin_state` call made by the model.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Drive {
    pub pin:   PinHandle,
    pub time:  AbsTime,
    pub delay: RelTime,
    pub state: LogicState,
}

/// One line written to a log sink.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LogLine {
    pub time:     AbsTime,
    pub severity: Severity,
    pub message:  String,
}

/// In-memory simulator host.
///
/// Build with the fluent `with_*` methods, hand it to a
/// [`Bench`](crate::Bench) (or pass `&mut host` directly to a model), then
/// inspect [`drives`](Self::drives), [`log_lines`](Self::log_lines) and pin
/// states.
#[derive(Debug, Default)]
pub struct BenchHost {
    now:        AbsTime,
    pins:       Vec<BenchPin>,
    by_name:    HashMap<String, PinHandle>,
    properties: HashMap<String, String>,
    timers:     TimerQueue,
    drives:     Vec<Drive>,
    log:        Vec<LogLine>,
    /// Index of the open step; edge flags see changes made during it.
    step:       u64,
}

impl BenchHost {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Add pins by name, all starting UNDEFINED.
    pub fn with_pins<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.add_pin(name);
        }
        self
    }

    /// Set a component property.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Add one pin and return its handle.  Re-adding a name returns the
    /// existing handle.
    pub fn add_pin(&mut self, name: impl Into<String>) -> PinHandle {
        let name = name.into();
        if let Some(&handle) = self.by_name.get(&name) {
            return handle;
        }
        let handle = PinHandle(self.pins.len() as u32);
        self.pins.push(BenchPin {
            name:       name.clone(),
            state:      LogicState::UNDEFINED.raw(),
            previous:   LogicState::UNDEFINED.raw(),
            changed_at: None,
            changed_in: None,
        });
        self.by_name.insert(name, handle);
        handle
    }

    // ── Stimulus ──────────────────────────────────────────────────────────

    /// Drive a pin from outside the model (a stimulus generator).
    ///
    /// Returns `false` if no pin has that name.
    pub fn drive_input(&mut self, name: &str, state: LogicState) -> bool {
        self.drive_raw(name, state.raw())
    }

    /// Like [`drive_input`](Self::drive_input) with an arbitrary raw value.
    pub fn drive_raw(&mut self, name: &str, raw: RawState) -> bool {
        match self.by_name.get(name).copied() {
            Some(handle) => {
                self.apply(handle, raw);
                true
            }
            None => false,
        }
    }

    /// Move the clock to `time`.  Does not fire timers; see
    /// [`pop_due_timer`](Self::pop_due_timer).
    ///
    /// # Panics
    /// Panics if `time` is earlier than the current time.
    pub fn advance_to(&mut self, time: AbsTime) {
        assert!(time >= self.now, "bench time cannot go backwards ({time} < {})", self.now);
        self.now = time;
    }

    /// Close the current step.  Pin changes made so far stop showing as
    /// edges.
    pub fn end_step(&mut self) {
        self.step += 1;
    }

    /// Take the earliest timer due at or before `limit`.
    pub fn pop_due_timer(&mut self, limit: AbsTime) -> Option<(AbsTime, EventId)> {
        self.timers.pop_due(limit)
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn pin(&self, name: &str) -> Option<&BenchPin> {
        self.by_name.get(name).and_then(|h| self.pins.get(h.0 as usize))
    }

    /// Decoded state of the named pin.
    pub fn state_of(&self, name: &str) -> Option<LogicState> {
        self.pin(name).map(|p| LogicState::from_raw(p.state))
    }

    /// Every drive the model has made, oldest first.
    pub fn drives(&self) -> &[Drive] {
        &self.drives
    }

    /// Drives made to the named pin, oldest first.
    pub fn drives_of(&self, name: &str) -> Vec<Drive> {
        let Some(&handle) = self.by_name.get(name) else {
            return vec![];
        };
        self.drives.iter().filter(|d| d.pin == handle).copied().collect()
    }

    /// Everything written to the log sinks, oldest first.
    pub fn log_lines(&self) -> &[LogLine] {
        &self.log
    }

    /// Messages logged at [`Severity::Error`].
    pub fn errors(&self) -> Vec<&str> {
        self.log
            .iter()
            .filter(|l| l.severity == Severity::Error)
            .map(|l| l.message.as_str())
            .collect()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn next_timer(&self) -> Option<AbsTime> {
        self.timers.next_time()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn apply(&mut self, handle: PinHandle, raw: RawState) {
        let (now, step) = (self.now, self.step);
        if let Some(pin) = self.pins.get_mut(handle.0 as usize) {
            if pin.state != raw {
                pin.previous = pin.state;
                pin.state = raw;
                pin.changed_at = Some(now);
                pin.changed_in = Some(step);
            }
        }
    }

    fn read_image(path: &Path, buffer: &mut [u8]) -> io::Result<usize> {
        let mut limited = File::open(path)?.take(buffer.len() as u64);
        let mut read = 0;
        loop {
            match limited.read(&mut buffer[read..])? {
                0 => return Ok(read),
                n => read += n,
            }
        }
    }

    fn changed_now(&self, pin: PinHandle) -> Option<&BenchPin> {
        self.pins
            .get(pin.0 as usize)
            .filter(|p| p.changed_in == Some(self.step))
    }
}

impl SimulatorHost for BenchHost {
    fn resolve_pin(&mut self, name: &str) -> Option<PinHandle> {
        self.by_name.get(name).copied()
    }

    fn set_pin_state(&mut self, pin: PinHandle, time: AbsTime, delay: RelTime, state: LogicState) {
        self.drives.push(Drive { pin, time, delay, state });
        self.apply(pin, state.raw());
    }

    fn pin_state(&self, pin: PinHandle) -> RawState {
        self.pins
            .get(pin.0 as usize)
            .map_or(LogicState::UNDEFINED.raw(), |p| p.state)
    }

    fn is_active(&self, pin: PinHandle) -> bool {
        self.changed_now(pin).is_some()
    }

    fn is_posedge(&self, pin: PinHandle) -> bool {
        self.changed_now(pin).is_some_and(|p| {
            !LogicState::from_raw(p.previous).is_high() && LogicState::from_raw(p.state).is_high()
        })
    }

    fn is_negedge(&self, pin: PinHandle) -> bool {
        self.changed_now(pin).is_some_and(|p| {
            !LogicState::from_raw(p.previous).is_low() && LogicState::from_raw(p.state).is_low()
        })
    }

    fn arm_timer(&mut self, delay: RelTime, event: EventId) {
        self.timers.push(self.now + delay, event);
    }

    fn now(&self) -> AbsTime {
        self.now
    }

    fn log(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Error => tracing::error!(target: "vsm_bench::sim", "{message}"),
            Severity::Warning => tracing::warn!(target: "vsm_bench::sim", "{message}"),
            Severity::Log | Severity::Message => tracing::info!(target: "vsm_bench::sim", "{message}"),
        }
        self.log.push(LogLine { time: self.now, severity, message: message.to_owned() });
    }

    fn property(&self, name: &str) -> Option<String> {
        self.properties.get(name).cloned()
    }

    /// Paths resolve against the process working directory.
    fn load_memory(&mut self, path: &Path, buffer: &mut [u8]) -> Option<usize> {
        match Self::read_image(path, buffer) {
            Ok(read) => Some(read),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "memory image not loaded");
                None
            }
        }
    }
}
