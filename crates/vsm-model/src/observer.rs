//! Dispatcher observer trait for diagnostics and test instrumentation.

use vsm_core::{AbsTime, RunMode};
use vsm_pins::PinRegistry;
use vsm_script::{Hook, HookTable, ScriptError};

use crate::ModelError;

/// Callbacks invoked by [`LifecycleDispatcher`][crate::LifecycleDispatcher]
/// at each lifecycle point.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — hook counter
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct HookCounter { calls: usize }
///
/// impl DispatchObserver for HookCounter {
///     fn on_hook(&mut self, _hook: Hook, _time: AbsTime) {
///         self.calls += 1;
///     }
/// }
/// ```
pub trait DispatchObserver {
    /// Setup succeeded.  `hooks` is the probed hook table.
    fn on_setup(&mut self, _pins: &PinRegistry, _hooks: HookTable) {}

    /// Setup failed; the dispatcher is now rejecting notifications.
    fn on_setup_failed(&mut self, _error: &ModelError) {}

    /// A run-control notification arrived (before any hook it triggers).
    fn on_run_mode(&mut self, _mode: RunMode) {}

    /// A present hook is about to run.
    fn on_hook(&mut self, _hook: Hook, _time: AbsTime) {}

    /// A hook returned an error at run time.
    fn on_hook_error(&mut self, _hook: Hook, _error: &ScriptError) {}

    /// The script context was dropped.
    fn on_teardown(&mut self) {}
}

/// A [`DispatchObserver`] that does nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopObserver;

impl DispatchObserver for NoopObserver {}
