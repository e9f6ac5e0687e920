//! `vsm-script` — the scripted half of a device model.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`script`]  | `DeviceScript` trait: pin table plus optional hooks           |
//! | [`hooks`]   | `Hook`, `HookSet`, `HookTable` (presence probed once at load) |
//! | [`context`] | `DeviceContext<'a>`: pins, timers, properties, log for a hook |
//! | [`loader`]  | `ScriptLoader` trait, `ScriptCatalog`                         |
//! | [`noop`]    | `NoopScript`: declares pins, implements no hooks              |
//! | [`error`]   | `ScriptError`, `ScriptResult<T>`                              |
//!
//! # Hook calls
//!
//! A hook runs with a [`DeviceContext`] that borrows the pin registry, the
//! event scheduler and the simulator host.  Nothing in the context refers
//! back to the dispatcher that made the call, so hooks never nest.

pub mod context;
pub mod error;
pub mod hooks;
pub mod loader;
pub mod noop;
pub mod script;


pub use context::DeviceContext;
pub use error::{ScriptError, ScriptResult};
pub use hooks::{Hook, HookSet, HookTable};
pub use loader::{ScriptFactory, ScriptCatalog, ScriptLoader};
pub use noop::NoopScript;
pub use script::DeviceScript;
