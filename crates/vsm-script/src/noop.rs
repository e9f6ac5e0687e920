//! A script that declares pins and does nothing else.

use vsm_pins::PinTable;

use crate::{DeviceScript, HookSet};

/// A [`DeviceScript`] with a pin table and no hooks.
///
/// Useful for passive parts (connectors, test points) and as a placeholder
/// in tests.
#[derive(Clone, Debug, Default)]
pub struct NoopScript {
    pins: PinTable,
}

impl NoopScript {
    pub fn new(pins: PinTable) -> Self {
        Self { pins }
    }
}

impl DeviceScript for NoopScript {
    fn device_pins(&self) -> Option<PinTable> {
        Some(self.pins.clone())
    }

    fn hooks(&self) -> HookSet {
        HookSet::EMPTY
    }
}
