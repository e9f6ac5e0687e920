//! `vsm-events` — timed callbacks between a device model and its simulator.
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`scheduler`]   | `EventScheduler` (arm / fire), `TimerFire`             |
//! | [`timer_queue`] | `TimerQueue` (`BTreeMap<AbsTime, VecDeque<EventId>>`)  |
//!
//! # Ordering model (summary)
//!
//! ```text
//! script ── arm(delay, id) ──▶ EventScheduler ── arm_timer ──▶ simulator queue
//! script ◀── timer_callback ── dispatcher ◀── fire(time, id) ── simulator
//! ```
//!
//! The scheduler does no ordering of its own: the simulator's queue decides
//! when each armed timer fires.  `TimerQueue` is that queue for hosts that
//! do not have one (the reference bench host).

pub mod scheduler;
pub mod timer_queue;

#[cfg(test)]
mod tests;

pub use scheduler::{EventScheduler, TimerFire};
pub use timer_queue::TimerQueue;
