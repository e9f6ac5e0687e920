//! `TimerQueue` — time-ordered pending timer store.
//!
//! Timers due at the same time keep the order they were pushed in, so a
//! host built on this queue fires them deterministically.
//!
//! # Performance note
//!
//! `BTreeMap` gives O(log T) insert and pop where T = number of distinct
//! pending fire times.  Device models rarely keep more than a handful of
//! timers in flight.

use std::collections::{BTreeMap, VecDeque};

use vsm_core::{AbsTime, EventId};

/// A priority queue mapping fire times → events due at that time.
#[derive(Debug, Default)]
pub struct TimerQueue {
    inner: BTreeMap<AbsTime, VecDeque<EventId>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` to fire at `time`.
    ///
    /// The same `EventId` may be queued any number of times.
    pub fn push(&mut self, time: AbsTime, event: EventId) {
        self.inner.entry(time).or_default().push_back(event);
        self.total += 1;
    }

    /// Remove and return the earliest timer due at or before `limit`.
    pub fn pop_due(&mut self, limit: AbsTime) -> Option<(AbsTime, EventId)> {
        let mut entry = self.inner.first_entry()?;
        let time = *entry.key();
        if time > limit {
            return None;
        }
        let event = entry.get_mut().pop_front()?;
        if entry.get().is_empty() {
            entry.remove();
        }
        self.total -= 1;
        Some((time, event))
    }

    /// Remove and return everything due at exactly `time`, in push order.
    pub fn drain_time(&mut self, time: AbsTime) -> Option<Vec<EventId>> {
        let events = self.inner.remove(&time)?;
        self.total -= events.len();
        Some(events.into())
    }

    /// The earliest pending fire time, or `None` if empty.
    pub fn next_time(&self) -> Option<AbsTime> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct pending fire times.
    pub fn time_count(&self) -> usize {
        self.inner.len()
    }
}
