//! Unit tests for vsm-model.

use std::cell::RefCell;
use std::rc::Rc;

use vsm_bench::{Bench, BenchHost};
use vsm_core::{
    AbsTime, ActiveData, ActiveState, DsimModel, EventId, GrantAll, LicenceServer, LogicState,
    PinId, RelTime, RunMode, SimMode,
};
use vsm_pins::{PinDecl, PinError, PinRegistry, PinTable};
use vsm_script::{
    DeviceContext, DeviceScript, Hook, HookSet, HookTable, NoopScript, ScriptCatalog, ScriptError,
    ScriptResult,
};

use crate::{
    DispatchObserver, LifecycleDispatcher, ModelBuilder, ModelConfig, ModelError,
    NO_DEVICE_MODEL, NoopObserver, Phase,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

type Journal = Rc<RefCell<Vec<String>>>;

/// Script that journals every hook call.
#[derive(Clone)]
struct Probe {
    journal: Journal,
    hooks:   HookSet,
    pins:    Option<PinTable>,
    fail:    Option<Hook>,
    /// Re-arming timer period, first armed by `device_init`.
    period:  Option<RelTime>,
}

impl Probe {
    fn new(journal: &Journal) -> Self {
        Self {
            journal: Rc::clone(journal),
            hooks:   HookSet::ALL,
            pins:    Some(vec![PinDecl::instant("CLK"), PinDecl::instant("LED")]),
            fail:    None,
            period:  None,
        }
    }

    fn record(&self, hook: Hook, entry: String) -> ScriptResult<()> {
        self.journal.borrow_mut().push(entry);
        if self.fail == Some(hook) {
            return Err(ScriptError::Runtime(format!("{hook} exploded")));
        }
        Ok(())
    }
}

impl DeviceScript for Probe {
    fn device_pins(&self) -> Option<PinTable> {
        self.pins.clone()
    }

    fn hooks(&self) -> HookSet {
        self.hooks
    }

    fn device_init(&mut self, ctx: &mut DeviceContext<'_>) -> ScriptResult<()> {
        if !ctx.pins().is_empty() {
            ctx.set_level(PinId::FIRST, false)?;
        }
        if let Some(period) = self.period {
            ctx.arm_timer(period, EventId(1));
        }
        self.record(Hook::DeviceInit, "device_init".into())
    }

    fn device_simulate(&mut self, _ctx: &mut DeviceContext<'_>) -> ScriptResult<()> {
        self.record(Hook::DeviceSimulate, "device_simulate".into())
    }

    fn timer_callback(
        &mut self,
        ctx:   &mut DeviceContext<'_>,
        time:  AbsTime,
        event: EventId,
    ) -> ScriptResult<()> {
        if let Some(period) = self.period {
            ctx.arm_timer(period, EventId(event.0 + 1));
        }
        self.record(Hook::TimerCallback, format!("timer_callback:{}:{}", time.0, event.0))
    }

    fn on_stop(&mut self, _ctx: &mut DeviceContext<'_>) -> ScriptResult<()> {
        self.record(Hook::OnStop, "on_stop".into())
    }

    fn on_suspend(&mut self, _ctx: &mut DeviceContext<'_>) -> ScriptResult<()> {
        self.record(Hook::OnSuspend, "on_suspend".into())
    }
}

fn catalog_with(probe: Probe) -> ScriptCatalog {
    ScriptCatalog::new()
        .with("probe", move || Box::new(probe.clone()) as Box<dyn DeviceScript>)
        .with("passive", || {
            Box::new(NoopScript::new(vec![PinDecl::instant("CLK")])) as Box<dyn DeviceScript>
        })
}

fn model(probe: Probe) -> LifecycleDispatcher<ScriptCatalog> {
    ModelBuilder::new(catalog_with(probe)).create(&mut GrantAll).unwrap()
}

fn host(script: &str) -> BenchHost {
    BenchHost::new().with_pins(["CLK", "LED"]).with_property("moddll", script)
}

fn entries(journal: &Journal) -> Vec<String> {
    journal.borrow().clone()
}

/// Observer that journals its callbacks.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl DispatchObserver for Recorder {
    fn on_setup(&mut self, pins: &PinRegistry, hooks: HookTable) {
        self.events.push(format!("setup:{}:{}", pins.len(), hooks.present().len()));
    }

    fn on_setup_failed(&mut self, _error: &ModelError) {
        self.events.push("setup_failed".into());
    }

    fn on_run_mode(&mut self, mode: RunMode) {
        self.events.push(format!("run:{mode}"));
    }

    fn on_hook(&mut self, hook: Hook, time: AbsTime) {
        self.events.push(format!("hook:{hook}@{}", time.0));
    }

    fn on_hook_error(&mut self, hook: Hook, _error: &ScriptError) {
        self.events.push(format!("error:{hook}"));
    }

    fn on_teardown(&mut self) {
        self.events.push("teardown".into());
    }
}

struct Refuse;

impl LicenceServer for Refuse {
    fn authorize(&mut self, _key: u32, _api_version: u32) -> bool {
        false
    }
}

// ── Creation ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod create {
    use super::*;

    #[test]
    fn refused_licence_yields_no_model() {
        let journal = Journal::default();
        let config = ModelConfig { model_key: 0xBEEF, ..ModelConfig::default() };
        let result = ModelBuilder::new(catalog_with(Probe::new(&journal)))
            .config(config)
            .create(&mut Refuse);
        match result {
            Err(ModelError::Unauthorized { key, api_version }) => {
                assert_eq!(key, 0xBEEF);
                assert_eq!(api_version, crate::DEFAULT_API_VERSION);
            }
            Err(other) => panic!("expected Unauthorized, got {other}"),
            Ok(_) => panic!("expected Unauthorized"),
        }
    }

    #[test]
    fn licence_sees_configured_key_and_version() {
        struct Expect(Vec<(u32, u32)>);
        impl LicenceServer for Expect {
            fn authorize(&mut self, key: u32, api_version: u32) -> bool {
                self.0.push((key, api_version));
                true
            }
        }
        let mut licence = Expect(vec![]);
        let config = ModelConfig { model_key: 7, api_version: 3, ..ModelConfig::default() };
        let model = ModelBuilder::new(ScriptCatalog::new())
            .config(config.clone())
            .create(&mut licence)
            .unwrap();
        assert_eq!(licence.0, [(7, 3)]);
        assert_eq!(model.config(), &config);
        assert_eq!(model.phase(), Phase::Created);
    }

    #[test]
    fn default_config_reads_moddll() {
        let config = ModelConfig::default();
        assert_eq!(config.script_property, "moddll");
        assert_eq!(config.api_version, 110);
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod setup {
    use super::*;

    #[test]
    fn builds_pins_probes_hooks_and_runs_init() {
        let journal = Journal::default();
        let mut model = model(Probe::new(&journal));
        let mut host = host("probe");
        model.setup(&mut host).unwrap();

        assert_eq!(model.phase(), Phase::Active);
        assert_eq!(model.pins().unwrap().len(), 2);
        assert_eq!(model.pins().unwrap().index_of("LED"), Some(PinId(2)));
        assert_eq!(model.hooks().unwrap().present(), HookSet::ALL);
        assert_eq!(entries(&journal), ["device_init"]);
        assert_eq!(host.state_of("CLK"), Some(LogicState::SLO));
        assert!(host.errors().is_empty());
    }

    #[test]
    fn script_property_is_configurable() {
        let journal = Journal::default();
        let config = ModelConfig { script_property: "script".into(), ..ModelConfig::default() };
        let mut model = ModelBuilder::new(catalog_with(Probe::new(&journal)))
            .config(config)
            .create(&mut GrantAll)
            .unwrap();
        let mut host = BenchHost::new().with_pins(["CLK", "LED"]).with_property("script", "probe");
        model.setup(&mut host).unwrap();
        assert_eq!(model.phase(), Phase::Active);
    }

    #[test]
    fn missing_pin_table_is_fatal() {
        let journal = Journal::default();
        let probe = Probe { pins: None, ..Probe::new(&journal) };
        let mut model = model(probe);
        let mut host = host("probe");

        assert!(matches!(model.setup(&mut host), Err(ModelError::Pins(PinError::Missing))));
        assert_eq!(host.errors(), [NO_DEVICE_MODEL]);
        assert_eq!(model.phase(), Phase::Failed);
        assert!(entries(&journal).is_empty());
    }

    #[test]
    fn failed_setup_rejects_everything_after() {
        let journal = Journal::default();
        let mut model = model(Probe { pins: None, ..Probe::new(&journal) });
        let mut host = host("probe");
        let _ = model.setup(&mut host);

        assert!(matches!(model.setup(&mut host), Err(ModelError::SetupFailed)));
        assert!(matches!(model.run_control(&mut host, RunMode::Stop), Err(ModelError::SetupFailed)));
        assert!(matches!(
            model.simulate(&mut host, AbsTime(1), SimMode::Normal),
            Err(ModelError::SetupFailed)
        ));
        assert!(matches!(
            model.callback(&mut host, AbsTime(1), EventId(0)),
            Err(ModelError::SetupFailed)
        ));
        assert!(entries(&journal).is_empty());
    }

    #[test]
    fn missing_script_property() {
        let mut model = model(Probe::new(&Journal::default()));
        let mut host = BenchHost::new().with_pins(["CLK", "LED"]);
        match model.setup(&mut host) {
            Err(ModelError::NoScriptName(prop)) => assert_eq!(prop, "moddll"),
            other => panic!("expected NoScriptName, got {other:?}"),
        }
        assert_eq!(host.errors().len(), 1);
    }

    #[test]
    fn unknown_script() {
        let mut model = model(Probe::new(&Journal::default()));
        let mut host = host("ghost");
        assert!(matches!(
            model.setup(&mut host),
            Err(ModelError::Script(ScriptError::NotFound(_)))
        ));
        assert_eq!(model.phase(), Phase::Failed);
    }

    #[test]
    fn unresolved_pin() {
        let mut model = model(Probe::new(&Journal::default()));
        let mut host = BenchHost::new().with_pins(["CLK"]).with_property("moddll", "probe");
        match model.setup(&mut host) {
            Err(ModelError::Pins(PinError::Unresolved(name))) => assert_eq!(name, "LED"),
            other => panic!("expected Unresolved, got {other:?}"),
        }
    }

    #[test]
    fn failing_device_init_is_a_setup_failure() {
        let journal = Journal::default();
        let mut model = model(Probe { fail: Some(Hook::DeviceInit), ..Probe::new(&journal) });
        let mut host = host("probe");
        assert!(matches!(
            model.setup(&mut host),
            Err(ModelError::Hook { hook: Hook::DeviceInit, .. })
        ));
        assert_eq!(model.phase(), Phase::Failed);
        assert_eq!(host.errors().len(), 1);
        assert!(model.pins().is_none());
    }

    #[test]
    fn second_setup_is_rejected() {
        let mut model = model(Probe::new(&Journal::default()));
        let mut host = host("probe");
        model.setup(&mut host).unwrap();
        assert!(matches!(model.setup(&mut host), Err(ModelError::AlreadyActive)));
        assert_eq!(model.phase(), Phase::Active);
    }

    #[test]
    fn notifications_before_setup_are_rejected() {
        let mut model = model(Probe::new(&Journal::default()));
        let mut host = host("probe");
        assert!(matches!(model.run_control(&mut host, RunMode::Start), Err(ModelError::NotActive)));
        assert!(matches!(
            model.simulate(&mut host, AbsTime(0), SimMode::Boot),
            Err(ModelError::NotActive)
        ));
    }
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dispatch {
    use super::*;

    #[test]
    fn hook_order_through_the_bench() {
        let journal = Journal::default();
        let probe = Probe { period: Some(RelTime(100)), ..Probe::new(&journal) };
        let mut bench = Bench::new(model(probe), host("probe"), RelTime(250));

        bench.setup().unwrap();
        bench.run_mode(RunMode::Start).unwrap();
        bench.step().unwrap();
        bench.run_mode(RunMode::Suspend).unwrap();
        bench.run_mode(RunMode::Stop).unwrap();

        assert_eq!(
            entries(&journal),
            [
                "device_init",
                "timer_callback:100:1",
                "timer_callback:200:2",
                "device_simulate",
                "on_suspend",
                "on_stop",
            ]
        );
        let sched = bench.model.scheduler().unwrap();
        assert_eq!(sched.armed(), 3);
        assert_eq!(sched.fired(), 2);
        assert_eq!(sched.outstanding(), 1);
    }

    #[test]
    fn timer_fire_passes_time_and_id_unchanged() {
        let journal = Journal::default();
        let mut model = model(Probe::new(&journal));
        let mut host = host("probe");
        model.setup(&mut host).unwrap();
        model.callback(&mut host, AbsTime(12_345), EventId(77)).unwrap();
        model.callback(&mut host, AbsTime(12_345), EventId(3)).unwrap();
        assert_eq!(
            entries(&journal)[1..],
            ["timer_callback:12345:77", "timer_callback:12345:3"]
        );
    }

    #[test]
    fn absent_hooks_are_silently_skipped() {
        let mut model = model(Probe::new(&Journal::default()));
        let mut host = BenchHost::new().with_pins(["CLK"]).with_property("moddll", "passive");
        model.setup(&mut host).unwrap();
        assert!(model.hooks().unwrap().present().is_empty());

        for mode in RunMode::ALL {
            model.run_control(&mut host, mode).unwrap();
        }
        model.simulate(&mut host, AbsTime(5), SimMode::Normal).unwrap();
        model.callback(&mut host, AbsTime(9), EventId(1)).unwrap();
        assert_eq!(model.scheduler().unwrap().fired(), 1);
        assert!(host.drives().is_empty());
        assert!(host.errors().is_empty());
    }

    #[test]
    fn only_stop_and_suspend_reach_the_script() {
        let journal = Journal::default();
        let mut model = model(Probe::new(&journal));
        let mut host = host("probe");
        model.setup(&mut host).unwrap();
        for mode in RunMode::ALL {
            model.run_control(&mut host, mode).unwrap();
        }
        assert_eq!(entries(&journal), ["device_init", "on_stop", "on_suspend"]);
    }

    #[test]
    fn simulate_runs_in_every_sim_mode() {
        let journal = Journal::default();
        let mut model = model(Probe::new(&journal));
        let mut host = host("probe");
        model.setup(&mut host).unwrap();
        for mode in [SimMode::Boot, SimMode::Settle, SimMode::Normal, SimMode::End] {
            model.simulate(&mut host, AbsTime(0), mode).unwrap();
        }
        assert_eq!(entries(&journal).len(), 5);
    }

    #[test]
    fn hook_error_is_logged_and_model_stays_active() {
        let journal = Journal::default();
        let mut model = model(Probe { fail: Some(Hook::DeviceSimulate), ..Probe::new(&journal) });
        let mut host = host("probe");
        model.setup(&mut host).unwrap();

        let err = model.simulate(&mut host, AbsTime(1), SimMode::Normal).unwrap_err();
        assert!(matches!(err, ModelError::Hook { hook: Hook::DeviceSimulate, .. }));
        assert_eq!(host.errors().len(), 1);
        assert!(host.errors()[0].contains("device_simulate"));
        assert_eq!(model.phase(), Phase::Active);

        model.run_control(&mut host, RunMode::Stop).unwrap();
        assert_eq!(entries(&journal).last().map(String::as_str), Some("on_stop"));
    }

    #[test]
    fn interactive_entry_points_are_inert() {
        let journal = Journal::default();
        let mut model = model(Probe::new(&journal));
        let mut host = host("probe");
        model.setup(&mut host).unwrap();
        let mut data = ActiveData::default();
        assert!(model.actuate(&mut host, AbsTime(0), ActiveState(1)).is_ok());
        assert!(!model.indicate(&mut host, AbsTime(0), &mut data));
        assert_eq!(data, ActiveData::None);
        assert!(model.is_digital("CLK"));
        assert_eq!(entries(&journal).len(), 1);
    }
}

// ── Teardown ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod teardown {
    use super::*;

    #[test]
    fn drops_script_and_rejects_later_calls() {
        let journal = Journal::default();
        let mut model = model(Probe::new(&journal));
        let mut host = host("probe");
        model.setup(&mut host).unwrap();
        let live = Rc::strong_count(&journal);

        model.teardown();
        assert_eq!(Rc::strong_count(&journal), live - 1);
        assert_eq!(model.phase(), Phase::TornDown);
        assert!(model.pins().is_none());

        assert!(matches!(
            model.simulate(&mut host, AbsTime(1), SimMode::Normal),
            Err(ModelError::TornDown)
        ));
        assert!(matches!(model.run_control(&mut host, RunMode::Stop), Err(ModelError::TornDown)));
        assert!(matches!(
            model.callback(&mut host, AbsTime(1), EventId(1)),
            Err(ModelError::TornDown)
        ));
        assert!(matches!(model.setup(&mut host), Err(ModelError::TornDown)));
        assert_eq!(entries(&journal), ["device_init"]);
    }

    #[test]
    fn is_idempotent() {
        let mut model = ModelBuilder::new(catalog_with(Probe::new(&Journal::default())))
            .observer(Recorder::default())
            .create(&mut GrantAll)
            .unwrap();
        model.teardown();
        model.teardown();
        assert_eq!(model.phase(), Phase::TornDown);
        assert_eq!(model.observer().events, ["teardown"]);
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer {
    use super::*;

    #[test]
    fn sees_every_lifecycle_point() {
        let journal = Journal::default();
        let probe = Probe { fail: Some(Hook::OnStop), ..Probe::new(&journal) };
        let mut model = ModelBuilder::new(catalog_with(probe))
            .observer(Recorder::default())
            .create(&mut GrantAll)
            .unwrap();
        let mut host = host("probe");

        model.setup(&mut host).unwrap();
        host.advance_to(AbsTime(40));
        model.simulate(&mut host, AbsTime(40), SimMode::Normal).unwrap();
        let _ = model.run_control(&mut host, RunMode::Stop);
        model.teardown();

        assert_eq!(
            model.observer().events,
            [
                "hook:device_init@0",
                "setup:2:5",
                "hook:device_simulate@40",
                "run:Stop",
                "hook:on_stop@40",
                "error:on_stop",
                "teardown",
            ]
        );
    }

    #[test]
    fn reports_setup_failure() {
        let mut model = ModelBuilder::new(ScriptCatalog::new())
            .observer(Recorder::default())
            .create(&mut GrantAll)
            .unwrap();
        let mut host = host("probe");
        let _ = model.setup(&mut host);
        assert_eq!(model.observer().events, ["setup_failed"]);
        model.observer_mut().events.clear();
        assert!(model.observer().events.is_empty());
    }

    #[test]
    fn noop_observer_is_the_default() {
        let model: LifecycleDispatcher<ScriptCatalog, NoopObserver> =
            ModelBuilder::new(ScriptCatalog::new()).create(&mut GrantAll).unwrap();
        assert_eq!(model.phase(), Phase::Created);
    }
}
