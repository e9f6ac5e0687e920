//! Unit tests for vsm-bench.

use vsm_core::{
    AbsTime, ActiveData, ActiveState, DsimModel, EventId, LogicState, PinHandle, RelTime, RunMode,
    Severity, SimMode, SimulatorHost,
};

use crate::{Bench, BenchHost};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Model that records every entry point it sees and re-arms a periodic timer.
#[derive(Default)]
struct Recorder {
    calls:  Vec<String>,
    period: Option<RelTime>,
}

#[derive(Debug)]
struct Never;

impl std::fmt::Display for Never {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("never")
    }
}

impl std::error::Error for Never {}

impl DsimModel for Recorder {
    type Error = Never;

    fn setup(&mut self, host: &mut dyn SimulatorHost) -> Result<(), Never> {
        self.calls.push("setup".into());
        if let Some(period) = self.period {
            host.arm_timer(period, EventId(0));
        }
        Ok(())
    }

    fn run_control(&mut self, _host: &mut dyn SimulatorHost, mode: RunMode) -> Result<(), Never> {
        self.calls.push(format!("run:{mode}"));
        Ok(())
    }

    fn actuate(&mut self, _: &mut dyn SimulatorHost, _: AbsTime, _: ActiveState) -> Result<(), Never> {
        Ok(())
    }

    fn indicate(&mut self, _: &mut dyn SimulatorHost, _: AbsTime, _: &mut ActiveData) -> bool {
        false
    }

    fn simulate(&mut self, host: &mut dyn SimulatorHost, time: AbsTime, _: SimMode) -> Result<(), Never> {
        self.calls.push(format!("sim:{}", time.0));
        if host.is_posedge(PinHandle(0)) {
            self.calls.push("posedge".into());
        }
        Ok(())
    }

    fn callback(&mut self, host: &mut dyn SimulatorHost, time: AbsTime, event: EventId) -> Result<(), Never> {
        assert_eq!(host.now(), time);
        self.calls.push(format!("cb:{}:{}", time.0, event.0));
        if let Some(period) = self.period {
            host.arm_timer(period, EventId(event.0 + 1));
        }
        Ok(())
    }

    fn teardown(&mut self) {
        self.calls.push("teardown".into());
    }
}

// ── BenchHost ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod host {
    use super::*;

    #[test]
    fn resolves_declared_pins_only() {
        let mut host = BenchHost::new().with_pins(["CLK", "DATA"]);
        assert!(host.resolve_pin("CLK").is_some());
        assert!(host.resolve_pin("DATA").is_some());
        assert!(host.resolve_pin("NOPE").is_none());
        assert_eq!(host.add_pin("CLK"), host.resolve_pin("CLK").unwrap());
    }

    #[test]
    fn load_memory_reads_files_up_to_buffer_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eeprom.bin");
        std::fs::write(&path, [0xAAu8, 0xBB, 0xCC]).unwrap();

        let mut host = BenchHost::new();
        let mut two = [0u8; 2];
        assert_eq!(host.load_memory(&path, &mut two), Some(2));
        assert_eq!(two, [0xAA, 0xBB]);

        let mut four = [0u8; 4];
        assert_eq!(host.load_memory(&path, &mut four), Some(3));
        assert_eq!(four, [0xAA, 0xBB, 0xCC, 0]);

        assert_eq!(host.load_memory(&dir.path().join("absent.bin"), &mut four), None);
    }

    #[test]
    fn pins_start_undefined() {
        let host = BenchHost::new().with_pins(["A"]);
        assert_eq!(host.state_of("A"), Some(LogicState::UNDEFINED));
    }

    #[test]
    fn set_pin_state_applies_and_records() {
        let mut host = BenchHost::new().with_pins(["A"]);
        let a = host.resolve_pin("A").unwrap();
        host.set_pin_state(a, AbsTime(10), RelTime(5), LogicState::SHI);
        assert_eq!(host.state_of("A"), Some(LogicState::SHI));
        assert_eq!(host.drives().len(), 1);
        assert_eq!(host.drives()[0].delay, RelTime(5));
        assert_eq!(host.drives_of("A")[0].state, LogicState::SHI);
        assert!(host.drives_of("B").is_empty());
    }

    #[test]
    fn edge_flags_last_one_step() {
        let mut host = BenchHost::new().with_pins(["CLK"]);
        let clk = host.resolve_pin("CLK").unwrap();
        host.drive_input("CLK", LogicState::SLO);
        host.end_step();
        assert!(!host.is_active(clk));
        assert!(host.is_steady(clk));

        host.drive_input("CLK", LogicState::SHI);
        host.advance_to(AbsTime(1));
        assert!(host.is_active(clk));
        assert!(host.is_posedge(clk));
        assert!(!host.is_negedge(clk));
        assert!(host.is_edge(clk));

        host.end_step();
        assert!(!host.is_edge(clk));
        host.drive_input("CLK", LogicState::WLO);
        assert!(host.is_negedge(clk));
        assert_eq!(host.pin("CLK").unwrap().changed_at, Some(AbsTime(1)));
    }

    #[test]
    fn raw_stimulus_is_kept_verbatim() {
        let mut host = BenchHost::new().with_pins(["X"]);
        assert!(host.drive_raw("X", 0x7F));
        let x = host.resolve_pin("X").unwrap();
        assert_eq!(host.pin_state(x), 0x7F);
        assert!(!host.drive_raw("Y", 0));
    }

    #[test]
    fn timers_are_relative_to_now() {
        let mut host = BenchHost::new();
        host.advance_to(AbsTime(100));
        host.arm_timer(RelTime(50), EventId(1));
        assert_eq!(host.next_timer(), Some(AbsTime(150)));
        assert_eq!(host.pop_due_timer(AbsTime(149)), None);
        assert_eq!(host.pop_due_timer(AbsTime(150)), Some((AbsTime(150), EventId(1))));
        assert_eq!(host.pending_timers(), 0);
    }

    #[test]
    fn log_and_properties() {
        let mut host = BenchHost::new().with_property("moddll", "blinky");
        host.log(Severity::Warning, "careful");
        host.log(Severity::Error, "broken");
        assert_eq!(host.property("moddll").as_deref(), Some("blinky"));
        assert_eq!(host.property("missing"), None);
        assert_eq!(host.log_lines().len(), 2);
        assert_eq!(host.errors(), vec!["broken"]);
    }

    #[test]
    #[should_panic]
    fn time_cannot_go_backwards() {
        let mut host = BenchHost::new();
        host.advance_to(AbsTime(10));
        host.advance_to(AbsTime(5));
    }
}

// ── Bench driver ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod driver {
    use super::*;

    #[test]
    fn step_fires_due_timers_before_simulate() {
        let model = Recorder { period: Some(RelTime(30)), ..Recorder::default() };
        let mut bench = Bench::new(model, BenchHost::new(), RelTime(100));
        bench.setup().unwrap();
        bench.run_mode(RunMode::Start).unwrap();
        bench.step().unwrap();
        assert_eq!(
            bench.model.calls,
            vec!["setup", "run:Start", "cb:30:0", "cb:60:1", "cb:90:2", "sim:100"]
        );
        assert_eq!(bench.stats().timers, 3);
        assert_eq!(bench.now(), AbsTime(100));
    }

    #[test]
    fn run_for_reports_this_call_only() {
        let mut bench = Bench::new(Recorder::default(), BenchHost::new(), RelTime(10));
        bench.run_for(RelTime(25)).unwrap();
        let stats = bench.run_for(RelTime(20)).unwrap();
        assert_eq!(stats.steps, 2);
        assert_eq!(bench.stats().steps, 5);
        assert_eq!(bench.now(), AbsTime(50));
    }

    #[test]
    fn stimulus_between_steps_is_seen_by_the_next_step_only() {
        let host = BenchHost::new().with_pins(["CLK"]);
        let mut bench = Bench::new(Recorder::default(), host, RelTime(10));
        bench.host.drive_input("CLK", LogicState::SLO);
        bench.step().unwrap();
        bench.host.drive_input("CLK", LogicState::SHI);
        bench.step().unwrap();
        bench.step().unwrap();
        assert_eq!(bench.model.calls, vec!["sim:10", "sim:20", "posedge", "sim:30"]);
    }

    #[test]
    fn teardown_reaches_model() {
        let mut bench = Bench::new(Recorder::default(), BenchHost::new(), RelTime(1));
        bench.teardown();
        assert_eq!(bench.model.calls, vec!["teardown"]);
    }
}
