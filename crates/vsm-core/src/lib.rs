//! `vsm-core` — foundational types for scripted VSM device models.
//!
//! This crate is a dependency of every other `vsm-*` crate.  It has no
//! `vsm-*` dependencies and only `thiserror` (plus optional `serde`) outside
//! the standard library.
//!
//! # What lives here
//!
//! | Module    | Contents                                                    |
//! |-----------|-------------------------------------------------------------|
//! | [`logic`] | `LogicState` codec, `Polarity`, `Strength`, `Level`         |
//! | [`ids`]   | `PinHandle`, `PinId`, `EventId`                             |
//! | [`time`]  | `AbsTime`, `RelTime` (integer picoseconds)                  |
//! | [`mode`]  | `RunMode`, `SimMode`, `Severity`                            |
//! | [`host`]  | `DsimModel`, `SimulatorHost`, `LicenceServer`               |
//! | [`props`] | property text parsers (bool, number, hex, init)             |
//! | [`error`] | `VsmError`, `VsmResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to the public value types.  |

pub mod error;
pub mod host;
pub mod ids;
pub mod logic;
pub mod mode;
pub mod props;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{VsmError, VsmResult};
pub use host::{ActiveData, ActiveState, DsimModel, GrantAll, LicenceServer, SimulatorHost};
pub use ids::{EventId, PinHandle, PinId};
pub use logic::{ALL_STATES, Decoded, Level, LogicState, Polarity, RawState, Strength, UnknownRaw};
pub use mode::{RunMode, Severity, SimMode};
pub use time::{AbsTime, RelTime};
