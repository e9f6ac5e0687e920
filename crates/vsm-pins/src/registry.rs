//! `PinRegistry` — the device's resolved, fixed-size pin table.
//!
//! Built once at setup from the script's declaration table and never resized.
//! Every pin carries the simulator handle it resolved to plus its transition
//! delays; all state changes the engine makes go through this registry so
//! those delays are applied uniformly.

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap;

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as HashMap;

use vsm_core::{Level, LogicState, PinHandle, PinId, RelTime, SimulatorHost};

use crate::decl::{PinDecl, validate_table};
use crate::{PinError, PinResult};

/// Maximum number of pins a device may declare.
pub const PIN_CAPACITY: usize = 32;

// ── Pin ───────────────────────────────────────────────────────────────────────

/// One resolved device pin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pin {
    /// 1-based pin number (declaration order).
    pub id:       PinId,
    pub name:     String,
    /// Simulator-side handle.  Resolved once; never changes afterwards.
    pub handle:   PinHandle,
    pub on_time:  RelTime,
    pub off_time: RelTime,
}

impl Pin {
    /// Transition delay for every drive of this pin, whatever the target
    /// state.  `off_time` is carried as declared but never applied.
    #[inline]
    pub fn drive_delay(&self) -> RelTime {
        self.on_time
    }
}

// ── PinRegistry ───────────────────────────────────────────────────────────────

/// Ordered, fixed-capacity collection of the device's pins.
#[derive(Debug, Default)]
pub struct PinRegistry {
    pins:    Vec<Pin>,
    by_name: HashMap<String, PinId>,
}

impl PinRegistry {
    /// Resolve every declared pin through `host`.
    ///
    /// # Errors
    ///
    /// - [`PinError::Missing`] if `table` is `None`.
    /// - [`PinError::CapacityExceeded`] for more than [`PIN_CAPACITY`] rows.
    /// - [`PinError::Malformed`] for an empty or duplicate name.
    /// - [`PinError::Unresolved`] if the host does not know a name.
    ///
    /// On error nothing is returned; there is no partially built registry.
    pub fn build<H>(table: Option<&[PinDecl]>, host: &mut H) -> PinResult<PinRegistry>
    where
        H: SimulatorHost + ?Sized,
    {
        let table = table.ok_or(PinError::Missing)?;
        if table.len() > PIN_CAPACITY {
            return Err(PinError::CapacityExceeded { got: table.len(), capacity: PIN_CAPACITY });
        }
        validate_table(table)?;

        let mut pins = Vec::with_capacity(table.len());
        let mut by_name = HashMap::default();
        for (slot, decl) in table.iter().enumerate() {
            let handle = host
                .resolve_pin(&decl.name)
                .ok_or_else(|| PinError::Unresolved(decl.name.clone()))?;
            // Capacity was checked above, so the slot always fits a PinId.
            let id = PinId::from_slot(slot).ok_or(PinError::CapacityExceeded {
                got:      table.len(),
                capacity: PIN_CAPACITY,
            })?;
            tracing::debug!(pin = %decl.name, %id, handle = handle.0, "resolved pin");

            by_name.insert(decl.name.clone(), id);
            pins.push(Pin {
                id,
                name: decl.name.clone(),
                handle,
                on_time: decl.on_time,
                off_time: decl.off_time,
            });
        }

        tracing::info!(count = pins.len(), "pin registry built");
        Ok(PinRegistry { pins, by_name })
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Look up a pin by 1-based number.
    pub fn get(&self, id: PinId) -> PinResult<&Pin> {
        id.slot()
            .and_then(|slot| self.pins.get(slot))
            .ok_or(PinError::OutOfRange { id, count: self.pins.len() })
    }

    /// Pin number for a declared name.
    pub fn index_of(&self, name: &str) -> Option<PinId> {
        self.by_name.get(name).copied()
    }

    /// All pins in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Pin> {
        self.pins.iter()
    }

    // ── Signal access ─────────────────────────────────────────────────────

    /// Decoded current state of pin `id`.
    pub fn state<H>(&self, host: &H, id: PinId) -> PinResult<LogicState>
    where
        H: SimulatorHost + ?Sized,
    {
        let pin = self.get(id)?;
        Ok(LogicState::from_raw(host.pin_state(pin.handle)))
    }

    /// Current state of pin `id` read as a level.
    pub fn level<H>(&self, host: &H, id: PinId) -> PinResult<Level>
    where
        H: SimulatorHost + ?Sized,
    {
        self.state(host, id).map(LogicState::to_boolean)
    }

    /// Drive pin `id` to `state` at the host's current time, delayed by the
    /// pin's `on_time`.
    pub fn set_state<H>(&self, host: &mut H, id: PinId, state: LogicState) -> PinResult<()>
    where
        H: SimulatorHost + ?Sized,
    {
        let pin = self.get(id)?;
        let now = host.now();
        host.set_pin_state(pin.handle, now, pin.drive_delay(), state);
        Ok(())
    }

    /// Drive pin `id` to the strong rail for `level`.
    pub fn set_level<H>(&self, host: &mut H, id: PinId, level: bool) -> PinResult<()>
    where
        H: SimulatorHost + ?Sized,
    {
        self.set_state(host, id, LogicState::from_bool(level))
    }

    /// Flip a pin between the strong rails.
    ///
    /// SHI becomes SLO and SLO becomes SHI.  Any other state is left alone,
    /// weak and pull levels included.  Returns the state driven, or `None`
    /// when the pin was not on a strong rail.
    pub fn toggle<H>(&self, host: &mut H, id: PinId) -> PinResult<Option<LogicState>>
    where
        H: SimulatorHost + ?Sized,
    {
        let next = match self.state(&*host, id)? {
            LogicState::StrongHigh => LogicState::SLO,
            LogicState::StrongLow => LogicState::SHI,
            _ => return Ok(None),
        };
        self.set_state(host, id, next)?;
        Ok(Some(next))
    }
}

impl<'a> IntoIterator for &'a PinRegistry {
    type Item = &'a Pin;
    type IntoIter = std::slice::Iter<'a, Pin>;

    fn into_iter(self) -> Self::IntoIter {
        self.pins.iter()
    }
}
