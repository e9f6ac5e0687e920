//! `EventScheduler` — arms host timers and forwards their fires.

use vsm_core::{AbsTime, EventId, RelTime, SimulatorHost};

/// One fired timer, exactly as the simulator reported it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct TimerFire {
    pub time:  AbsTime,
    pub event: EventId,
}

/// Bridges script timer requests to the simulator's event queue.
///
/// There is no cancellation: an armed timer always fires unless the model is
/// torn down first.  A script that wants to ignore a stale timer must check
/// the `EventId` it receives.
#[derive(Debug, Default)]
pub struct EventScheduler {
    armed: u64,
    fired: u64,
}

impl EventScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the host to call back `delay` from now, tagged with `event`.
    pub fn arm<H>(&mut self, host: &mut H, delay: RelTime, event: EventId)
    where
        H: SimulatorHost + ?Sized,
    {
        tracing::trace!(%delay, %event, at = %(host.now() + delay), "arming timer");
        host.arm_timer(delay, event);
        self.armed += 1;
    }

    /// Record a fire reported by the host and pass it through unchanged.
    pub fn fire(&mut self, time: AbsTime, event: EventId) -> TimerFire {
        self.fired += 1;
        TimerFire { time, event }
    }

    /// Timers armed through this scheduler so far.
    pub fn armed(&self) -> u64 {
        self.armed
    }

    /// Fires received so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Armed timers that have not fired yet, assuming the host fires only
    /// what this scheduler armed.
    pub fn outstanding(&self) -> u64 {
        self.armed.saturating_sub(self.fired)
    }
}
