//! Unit tests for vsm-events.

use vsm_core::{AbsTime, EventId, LogicState, PinHandle, RawState, RelTime, Severity, SimulatorHost};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Host that only records timer requests.
#[derive(Default)]
struct TimerLog {
    now:   AbsTime,
    armed: Vec<(RelTime, EventId)>,
}

impl SimulatorHost for TimerLog {
    fn resolve_pin(&mut self, _name: &str) -> Option<PinHandle> {
        None
    }

    fn set_pin_state(&mut self, _: PinHandle, _: AbsTime, _: RelTime, _: LogicState) {}

    fn pin_state(&self, _pin: PinHandle) -> RawState {
        LogicState::UNDEFINED.raw()
    }

    fn arm_timer(&mut self, delay: RelTime, event: EventId) {
        self.armed.push((delay, event));
    }

    fn now(&self) -> AbsTime {
        self.now
    }

    fn log(&mut self, _severity: Severity, _message: &str) {}
}

// ── EventScheduler ────────────────────────────────────────────────────────────

#[cfg(test)]
mod scheduler {
    use super::*;
    use crate::{EventScheduler, TimerFire};

    #[test]
    fn arm_forwards_to_host() {
        let mut host = TimerLog::default();
        let mut sched = EventScheduler::new();
        sched.arm(&mut host, RelTime::from_nanos(10), EventId(3));
        sched.arm(&mut host, RelTime::from_nanos(5), EventId(4));
        assert_eq!(
            host.armed,
            vec![(RelTime::from_nanos(10), EventId(3)), (RelTime::from_nanos(5), EventId(4))]
        );
        assert_eq!(sched.armed(), 2);
        assert_eq!(sched.outstanding(), 2);
    }

    #[test]
    fn fire_passes_pair_through_unchanged() {
        let mut sched = EventScheduler::new();
        let fire = sched.fire(AbsTime(12_345), EventId(u32::MAX - 1));
        assert_eq!(fire, TimerFire { time: AbsTime(12_345), event: EventId(u32::MAX - 1) });
        assert_eq!(sched.fired(), 1);
    }

    #[test]
    fn outstanding_never_underflows() {
        let mut sched = EventScheduler::new();
        sched.fire(AbsTime(1), EventId(1));
        assert_eq!(sched.outstanding(), 0);
    }

    #[test]
    fn arm_through_trait_object() {
        let mut host = TimerLog::default();
        let dyn_host: &mut dyn SimulatorHost = &mut host;
        let mut sched = EventScheduler::new();
        sched.arm(dyn_host, RelTime::ZERO, EventId(0));
        assert_eq!(host.armed.len(), 1);
    }
}

// ── TimerQueue ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod timer_queue {
    use super::*;
    use crate::TimerQueue;

    #[test]
    fn pops_in_time_order() {
        let mut q = TimerQueue::new();
        q.push(AbsTime(30), EventId(3));
        q.push(AbsTime(10), EventId(1));
        q.push(AbsTime(20), EventId(2));
        assert_eq!(q.pop_due(AbsTime(100)), Some((AbsTime(10), EventId(1))));
        assert_eq!(q.pop_due(AbsTime(100)), Some((AbsTime(20), EventId(2))));
        assert_eq!(q.pop_due(AbsTime(100)), Some((AbsTime(30), EventId(3))));
        assert!(q.is_empty());
    }

    #[test]
    fn equal_times_keep_push_order() {
        let mut q = TimerQueue::new();
        q.push(AbsTime(5), EventId(9));
        q.push(AbsTime(5), EventId(1));
        q.push(AbsTime(5), EventId(9));
        assert_eq!(q.len(), 3);
        assert_eq!(q.time_count(), 1);
        assert_eq!(q.drain_time(AbsTime(5)), Some(vec![EventId(9), EventId(1), EventId(9)]));
        assert!(q.is_empty());
    }

    #[test]
    fn pop_due_respects_limit() {
        let mut q = TimerQueue::new();
        q.push(AbsTime(50), EventId(0));
        assert_eq!(q.pop_due(AbsTime(49)), None);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_time(), Some(AbsTime(50)));
        assert_eq!(q.pop_due(AbsTime(50)), Some((AbsTime(50), EventId(0))));
        assert_eq!(q.next_time(), None);
    }

    #[test]
    fn drain_absent_time_returns_none() {
        let mut q = TimerQueue::new();
        assert!(q.drain_time(AbsTime(1)).is_none());
    }
}
