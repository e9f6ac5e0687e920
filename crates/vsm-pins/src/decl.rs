//! Pin declaration records: the device's declarative pin table.

use std::collections::HashSet;

use vsm_core::RelTime;

use crate::{PinError, PinResult};

/// One row of a device's pin table.
///
/// `on_time` is the transition delay applied whenever the engine drives this
/// pin, in either direction.  `off_time` is kept as declared data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinDecl {
    pub name:     String,
    pub on_time:  RelTime,
    pub off_time: RelTime,
}

impl PinDecl {
    pub fn new(name: impl Into<String>, on_time: RelTime, off_time: RelTime) -> Self {
        Self { name: name.into(), on_time, off_time }
    }

    /// A pin with zero transition delays.
    pub fn instant(name: impl Into<String>) -> Self {
        Self::new(name, RelTime::ZERO, RelTime::ZERO)
    }
}

/// An ordered pin table.  Row order defines pin numbering (first row = pin 1).
pub type PinTable = Vec<PinDecl>;

/// Check that every row has a usable, unique name.
///
/// `entry` in the returned error is 1-based, matching pin numbering.
pub fn validate_table(table: &[PinDecl]) -> PinResult<()> {
    let mut seen = HashSet::with_capacity(table.len());
    for (i, decl) in table.iter().enumerate() {
        let entry = i + 1;
        let name = decl.name.trim();
        if name.is_empty() {
            return Err(PinError::Malformed { entry, reason: "empty pin name".into() });
        }
        if name.len() != decl.name.len() {
            return Err(PinError::Malformed {
                entry,
                reason: format!("pin name {:?} has surrounding whitespace", decl.name),
            });
        }
        if !seen.insert(name) {
            return Err(PinError::Malformed {
                entry,
                reason: format!("duplicate pin name {name:?}"),
            });
        }
    }
    Ok(())
}
