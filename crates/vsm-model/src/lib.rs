//! `vsm-model` — the device model instance the simulator talks to.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`dispatcher`] | `LifecycleDispatcher`, `Phase`: implements `DsimModel`      |
//! | [`builder`]    | `ModelBuilder`: licence check, then a dispatcher           |
//! | [`config`]     | `ModelConfig` (model key, API version, script property)    |
//! | [`observer`]   | `DispatchObserver` trait, `NoopObserver`                   |
//! | [`error`]      | `ModelError`, `ModelResult<T>`                             |
//!
//! # Lifecycle
//!
//! ```text
//! create   licence check                       (ModelBuilder::create)
//! setup    read `moddll` → load script → build pins → probe hooks → device_init
//! ...      run_control / simulate / callback   → on_stop, on_suspend,
//!                                                device_simulate, timer_callback
//! teardown drop the script                     (idempotent)
//! ```
//!
//! # Cargo features
//!
//! | Feature | Effect                                                   |
//! |---------|----------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on `ModelConfig`.              |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use vsm_bench::{Bench, BenchHost};
//! use vsm_core::{GrantAll, RelTime, RunMode};
//! use vsm_model::ModelBuilder;
//!
//! let model = ModelBuilder::new(catalog).create(&mut GrantAll)?;
//! let host = BenchHost::new().with_pins(["LED"]).with_property("moddll", "blinky");
//! let mut bench = Bench::new(model, host, RelTime::from_micros(10));
//! bench.setup()?;
//! bench.run_mode(RunMode::Start)?;
//! bench.run_for(RelTime::from_millis(5))?;
//! bench.teardown();
//! ```

pub mod builder;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod observer;

#[cfg(test)]
mod tests;

pub use builder::ModelBuilder;
pub use config::{DEFAULT_API_VERSION, DEFAULT_SCRIPT_PROPERTY, ModelConfig};
pub use dispatcher::{LifecycleDispatcher, NO_DEVICE_MODEL, Phase};
pub use error::{ModelError, ModelResult};
pub use observer::{DispatchObserver, NoopObserver};
