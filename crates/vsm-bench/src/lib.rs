//! `vsm-bench` — an in-memory stand-in for the simulator.
//!
//! Real device models run inside a circuit simulator.  The bench lets them
//! run anywhere else: unit tests, demos, regression fixtures.
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`host`]   | `BenchHost` — implements `SimulatorHost` over plain vectors  |
//! | [`driver`] | `Bench<M>` — steps any `DsimModel` through time              |
//!
//! # Fidelity
//!
//! The bench is deliberately simple:
//!
//! - A drive takes effect immediately.  Its transition delay is recorded in
//!   the [`Drive`] log but not simulated.
//! - There is no net resolution: the last writer (model or stimulus) wins.
//! - Edge flags (`is_posedge`, …) are true from the change until the end of
//!   the step it belongs to.  A step ends after its `simulate` call.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let host = BenchHost::new().with_pins(["CLK", "LED"]).with_property("moddll", "blinky");
//! let mut bench = Bench::new(model, host, RelTime::from_micros(1));
//! bench.setup()?;
//! bench.run_mode(RunMode::Start)?;
//! bench.run_for(RelTime::from_millis(1))?;
//! ```

pub mod driver;
pub mod host;

#[cfg(test)]
mod tests;

pub use driver::{Bench, BenchStats};
pub use host::{BenchHost, BenchPin, Drive, LogLine};
