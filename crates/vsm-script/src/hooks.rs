//! Optional script capabilities and their cached presence table.

use std::fmt;

use crate::DeviceScript;

/// One optional script entry point.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Hook {
    DeviceInit,
    DeviceSimulate,
    TimerCallback,
    OnStop,
    OnSuspend,
}

impl Hook {
    pub const ALL: [Hook; 5] = [
        Hook::DeviceInit,
        Hook::DeviceSimulate,
        Hook::TimerCallback,
        Hook::OnStop,
        Hook::OnSuspend,
    ];

    /// Name of the hook as scripts spell it.
    pub fn name(self) -> &'static str {
        match self {
            Hook::DeviceInit => "device_init",
            Hook::DeviceSimulate => "device_simulate",
            Hook::TimerCallback => "timer_callback",
            Hook::OnStop => "on_stop",
            Hook::OnSuspend => "on_suspend",
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── HookSet ───────────────────────────────────────────────────────────────────

/// A set of [`Hook`]s, one bit each.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct HookSet(u8);

impl HookSet {
    pub const EMPTY: HookSet = HookSet(0);
    pub const ALL: HookSet = HookSet(0b1_1111);

    /// This set plus `hook`.
    #[must_use]
    pub fn with(self, hook: Hook) -> HookSet {
        HookSet(self.0 | hook.bit())
    }

    pub fn insert(&mut self, hook: Hook) {
        self.0 |= hook.bit();
    }

    #[inline]
    pub fn contains(self, hook: Hook) -> bool {
        self.0 & hook.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in [`Hook::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Hook> {
        Hook::ALL.into_iter().filter(move |&h| self.contains(h))
    }
}

impl FromIterator<Hook> for HookSet {
    fn from_iter<I: IntoIterator<Item = Hook>>(iter: I) -> Self {
        iter.into_iter().fold(HookSet::EMPTY, HookSet::with)
    }
}

// ── HookTable ─────────────────────────────────────────────────────────────────

/// Which hooks a loaded script provides.
///
/// Probed once right after the script is loaded and never updated; a script
/// cannot gain or lose hooks while it runs.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct HookTable {
    present: HookSet,
}

impl HookTable {
    pub fn probe(script: &dyn DeviceScript) -> HookTable {
        let present = script.hooks();
        for hook in Hook::ALL {
            tracing::debug!(hook = hook.name(), present = present.contains(hook), "probed hook");
        }
        HookTable { present }
    }

    #[inline]
    pub fn is_present(&self, hook: Hook) -> bool {
        self.present.contains(hook)
    }

    pub fn present(&self) -> HookSet {
        self.present
    }
}
