//! `vsm-pins` — the device's pin table and resolved pin registry.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`decl`]     | `PinDecl`, `PinTable`, `validate_table`                  |
//! | [`registry`] | `Pin`, `PinRegistry`, `PIN_CAPACITY`                     |
//! | [`loader`]   | `load_pin_table_csv`, `load_pin_table_reader`            |
//! | [`error`]    | `PinError`, `PinResult<T>`                               |
//!
//! # Numbering
//!
//! Pins are numbered from 1 in declaration order.  A `PinId` of 0, or one
//! past the last declared pin, is rejected with `PinError::OutOfRange`.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the name lookup map.       |

pub mod decl;
pub mod error;
pub mod loader;
pub mod registry;


pub use decl::{PinDecl, PinTable, validate_table};
pub use error::{PinError, PinResult};
pub use loader::{load_pin_table_csv, load_pin_table_reader};
pub use registry::{PIN_CAPACITY, Pin, PinRegistry};
