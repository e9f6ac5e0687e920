//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` so host
//! adapters can move them across their own API without conversion helpers.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID": the maximum inner value.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// `false` only for the `INVALID` sentinel.
            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(raw: $inner) -> $name {
                $name(raw)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Opaque reference into the simulator's pin namespace.
    ///
    /// Handed out by [`SimulatorHost::resolve_pin`][crate::SimulatorHost::resolve_pin]
    /// and never interpreted by the engine.
    pub struct PinHandle(u32);
}

typed_id! {
    /// Tag round-tripped through a timer arm/fire pair.
    pub struct EventId(u32);
}

typed_id! {
    /// 1-based pin number, in declaration order of the pin table.
    ///
    /// `PinId(1)` is the first declared pin.  `PinId(0)` is never issued.
    pub struct PinId(u16);
}

impl PinId {
    /// The first declared pin.
    pub const FIRST: PinId = PinId(1);

    /// Zero-based storage slot, or `None` for `PinId(0)`.
    #[inline]
    pub fn slot(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }

    /// The pin id stored at zero-based `slot`.
    #[inline]
    pub fn from_slot(slot: usize) -> Option<PinId> {
        slot
            .checked_add(1)
            .and_then(|n| u16::try_from(n).ok())
            .map(PinId)
    }
}
