//! `LifecycleDispatcher` — routes simulator notifications to script hooks.

use vsm_core::{
    AbsTime, ActiveData, ActiveState, DsimModel, EventId, RunMode, Severity, SimMode,
    SimulatorHost,
};
use vsm_events::EventScheduler;
use vsm_pins::{PinError, PinRegistry};
use vsm_script::{DeviceContext, DeviceScript, Hook, HookTable, ScriptLoader, ScriptResult};

use crate::{DispatchObserver, ModelConfig, ModelError, ModelResult, NoopObserver};

/// Message written to the simulator's error log when a script declares no
/// pin table.
pub const NO_DEVICE_MODEL: &str = "No device model found, it is fatal error";

/// Where a dispatcher is in its life.
///
/// ```text
/// Created ──setup ok──▶ Active ──teardown──▶ TornDown
///    │                                          ▲
///    └──setup err──▶ Failed ──────teardown──────┘
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    Created,
    Active,
    Failed,
    TornDown,
}

/// Everything that exists only between a successful setup and teardown.
struct Device {
    script:    Box<dyn DeviceScript>,
    pins:      PinRegistry,
    hooks:     HookTable,
    scheduler: EventScheduler,
}

impl Device {
    /// Run `f` against the script with a fresh context.
    fn run<F>(&mut self, host: &mut dyn SimulatorHost, f: F) -> ScriptResult<()>
    where
        F: FnOnce(&mut dyn DeviceScript, &mut DeviceContext<'_>) -> ScriptResult<()>,
    {
        let mut ctx = DeviceContext::new(&self.pins, &mut self.scheduler, host);
        f(self.script.as_mut(), &mut ctx)
    }
}

/// The model instance the simulator talks to.
///
/// One dispatcher owns one script for its whole life.  Notifications arrive
/// through [`DsimModel`] and are mapped to hooks:
///
/// | Notification                 | Hook              |
/// |------------------------------|-------------------|
/// | `setup`                      | `device_init`     |
/// | `run_control(Stop)`          | `on_stop`         |
/// | `run_control(Suspend)`       | `on_suspend`      |
/// | `simulate` (any `SimMode`)   | `device_simulate` |
/// | `callback`                   | `timer_callback`  |
///
/// A hook the script does not provide is skipped silently.  Every
/// notification other than `setup` is rejected unless the dispatcher is
/// [`Phase::Active`].
///
/// Build one with [`ModelBuilder`](crate::ModelBuilder).
pub struct LifecycleDispatcher<L: ScriptLoader, O: DispatchObserver = NoopObserver> {
    config:   ModelConfig,
    loader:   L,
    observer: O,
    phase:    Phase,
    device:   Option<Device>,
}

impl<L: ScriptLoader, O: DispatchObserver> LifecycleDispatcher<L, O> {
    pub(crate) fn new(config: ModelConfig, loader: L, observer: O) -> Self {
        Self { config, loader, observer, phase: Phase::Created, device: None }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// The resolved pins, while active.
    pub fn pins(&self) -> Option<&PinRegistry> {
        self.device.as_ref().map(|d| &d.pins)
    }

    /// The probed hook table, while active.
    pub fn hooks(&self) -> Option<HookTable> {
        self.device.as_ref().map(|d| d.hooks)
    }

    /// Timer counters, while active.
    pub fn scheduler(&self) -> Option<&EventScheduler> {
        self.device.as_ref().map(|d| &d.scheduler)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn build_device(&mut self, host: &mut dyn SimulatorHost) -> ModelResult<Device> {
        let property = &self.config.script_property;
        let name = host
            .property(property)
            .ok_or_else(|| ModelError::NoScriptName(property.clone()))?;
        tracing::info!(script = %name, "loading device script");
        let script = self.loader.load(&name)?;

        let table = script.device_pins();
        let pins = PinRegistry::build(table.as_deref(), &mut *host)?;
        let hooks = HookTable::probe(script.as_ref());

        let mut device = Device { script, pins, hooks, scheduler: EventScheduler::new() };
        if hooks.is_present(Hook::DeviceInit) {
            self.observer.on_hook(Hook::DeviceInit, host.now());
            device
                .run(host, |s, ctx| s.device_init(ctx))
                .map_err(|source| ModelError::Hook { hook: Hook::DeviceInit, source })?;
        }
        Ok(device)
    }

    /// Run `hook` if the script provides it.  Errors are logged to the host
    /// and returned; the dispatcher stays active.
    fn dispatch<F>(&mut self, host: &mut dyn SimulatorHost, hook: Hook, f: F) -> ModelResult<()>
    where
        F: FnOnce(&mut dyn DeviceScript, &mut DeviceContext<'_>) -> ScriptResult<()>,
    {
        let device = active(self.phase, &mut self.device)?;
        if !device.hooks.is_present(hook) {
            tracing::trace!(%hook, "hook absent, skipped");
            return Ok(());
        }
        self.observer.on_hook(hook, host.now());
        device.run(&mut *host, f).map_err(|source| {
            tracing::error!(%hook, error = %source, "hook failed");
            host.log(Severity::Error, &format!("{hook}: {source}"));
            self.observer.on_hook_error(hook, &source);
            ModelError::Hook { hook, source }
        })
    }
}

/// The live device, or the error for the phase that has none.
fn active(phase: Phase, device: &mut Option<Device>) -> ModelResult<&mut Device> {
    match phase {
        Phase::Active => device.as_mut().ok_or(ModelError::NotActive),
        Phase::Created => Err(ModelError::NotActive),
        Phase::Failed => Err(ModelError::SetupFailed),
        Phase::TornDown => Err(ModelError::TornDown),
    }
}

impl<L: ScriptLoader, O: DispatchObserver> DsimModel for LifecycleDispatcher<L, O> {
    type Error = ModelError;

    /// Load the script, build its pins, probe hooks, run `device_init`.
    ///
    /// Any failure is written to the host's error log and leaves the
    /// dispatcher [`Phase::Failed`].
    fn setup(&mut self, host: &mut dyn SimulatorHost) -> ModelResult<()> {
        match self.phase {
            Phase::Created => {}
            Phase::Active => return Err(ModelError::AlreadyActive),
            Phase::Failed => return Err(ModelError::SetupFailed),
            Phase::TornDown => return Err(ModelError::TornDown),
        }

        match self.build_device(host) {
            Ok(device) => {
                tracing::info!(
                    pins = device.pins.len(),
                    hooks = device.hooks.present().len(),
                    "device model ready"
                );
                self.observer.on_setup(&device.pins, device.hooks);
                self.device = Some(device);
                self.phase = Phase::Active;
                Ok(())
            }
            Err(err) => {
                let message = match &err {
                    ModelError::Pins(PinError::Missing) => NO_DEVICE_MODEL.to_owned(),
                    other => other.to_string(),
                };
                tracing::error!(error = %err, "device model setup failed");
                host.log(Severity::Error, &message);
                self.observer.on_setup_failed(&err);
                self.phase = Phase::Failed;
                Err(err)
            }
        }
    }

    fn run_control(&mut self, host: &mut dyn SimulatorHost, mode: RunMode) -> ModelResult<()> {
        active(self.phase, &mut self.device)?;
        tracing::debug!(%mode, "run control");
        self.observer.on_run_mode(mode);
        match mode {
            RunMode::Stop => self.dispatch(host, Hook::OnStop, |s, ctx| s.on_stop(ctx)),
            RunMode::Suspend => self.dispatch(host, Hook::OnSuspend, |s, ctx| s.on_suspend(ctx)),
            RunMode::Batch
            | RunMode::Start
            | RunMode::Animate
            | RunMode::StepTime
            | RunMode::StepOver
            | RunMode::StepInto
            | RunMode::StepOut
            | RunMode::StepTo
            | RunMode::Meta
            | RunMode::Dump => Ok(()),
        }
    }

    fn actuate(
        &mut self,
        _host:  &mut dyn SimulatorHost,
        _time:  AbsTime,
        _state: ActiveState,
    ) -> ModelResult<()> {
        active(self.phase, &mut self.device).map(|_| ())
    }

    fn indicate(
        &mut self,
        _host: &mut dyn SimulatorHost,
        _time: AbsTime,
        _data: &mut ActiveData,
    ) -> bool {
        false
    }

    fn simulate(
        &mut self,
        host: &mut dyn SimulatorHost,
        time: AbsTime,
        mode: SimMode,
    ) -> ModelResult<()> {
        tracing::trace!(%time, ?mode, "simulate");
        self.dispatch(host, Hook::DeviceSimulate, |s, ctx| s.device_simulate(ctx))
    }

    fn callback(
        &mut self,
        host:  &mut dyn SimulatorHost,
        time:  AbsTime,
        event: EventId,
    ) -> ModelResult<()> {
        let fire = active(self.phase, &mut self.device)?.scheduler.fire(time, event);
        tracing::trace!(time = %fire.time, event = %fire.event, "timer fired");
        self.dispatch(host, Hook::TimerCallback, |s, ctx| {
            s.timer_callback(ctx, fire.time, fire.event)
        })
    }

    /// Drop the script.  Safe to call more than once.
    fn teardown(&mut self) {
        if self.phase == Phase::TornDown {
            return;
        }
        self.device = None;
        self.phase = Phase::TornDown;
        tracing::info!("device model torn down");
        self.observer.on_teardown();
    }
}
