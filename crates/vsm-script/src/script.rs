//! The `DeviceScript` trait — the user-supplied half of a device model.

use vsm_core::{AbsTime, EventId};
use vsm_pins::PinTable;

use crate::{DeviceContext, HookSet, ScriptResult};

/// A loaded device script.
///
/// A script declares its pins and which hooks it implements.  The dispatcher
/// only calls hooks listed in [`hooks`](Self::hooks); the default method
/// bodies exist so simple scripts need not spell out the ones they skip.
///
/// Every hook receives a [`DeviceContext`] for reading and driving pins,
/// arming timers, reading properties and logging.  An `Err` from a hook is
/// reported to the simulator's error log; it does not stop the device.
///
/// # Example
///
/// ```rust,ignore
/// struct Blinky { led: PinId }
///
/// impl DeviceScript for Blinky {
///     fn device_pins(&self) -> Option<PinTable> {
///         Some(vec![PinDecl::instant("LED")])
///     }
///
///     fn hooks(&self) -> HookSet {
///         HookSet::EMPTY.with(Hook::DeviceInit).with(Hook::TimerCallback)
///     }
///
///     fn device_init(&mut self, ctx: &mut DeviceContext<'_>) -> ScriptResult<()> {
///         self.led = ctx.pin("LED")?;
///         ctx.arm_timer(RelTime::from_millis(1), EventId(0));
///         Ok(())
///     }
///
///     fn timer_callback(&mut self, ctx: &mut DeviceContext<'_>, _: AbsTime, id: EventId)
///         -> ScriptResult<()>
///     {
///         ctx.toggle(self.led)?;
///         ctx.arm_timer(RelTime::from_millis(1), id);
///         Ok(())
///     }
/// }
/// ```
pub trait DeviceScript {
    /// The device's pin table, or `None` if the script does not declare one.
    fn device_pins(&self) -> Option<PinTable>;

    /// Hooks this script implements.
    fn hooks(&self) -> HookSet;

    /// Called once at setup, after the pin registry is built.
    fn device_init(&mut self, _ctx: &mut DeviceContext<'_>) -> ScriptResult<()> {
        Ok(())
    }

    /// Called on every simulator step.
    fn device_simulate(&mut self, _ctx: &mut DeviceContext<'_>) -> ScriptResult<()> {
        Ok(())
    }

    /// Called when a timer armed with [`DeviceContext::arm_timer`] fires.
    fn timer_callback(
        &mut self,
        _ctx:   &mut DeviceContext<'_>,
        _time:  AbsTime,
        _event: EventId,
    ) -> ScriptResult<()> {
        Ok(())
    }

    /// Called when the simulation stops.
    fn on_stop(&mut self, _ctx: &mut DeviceContext<'_>) -> ScriptResult<()> {
        Ok(())
    }

    /// Called when the simulation is paused.
    fn on_suspend(&mut self, _ctx: &mut DeviceContext<'_>) -> ScriptResult<()> {
        Ok(())
    }
}
