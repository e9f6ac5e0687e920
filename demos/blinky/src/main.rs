//! blinky — smallest scripted device for the VSM model engine.
//!
//! A clock-gated LED blinker run on the in-memory bench.  The device has an
//! enable input (EN), a clock input (CLK) and an LED output.  While EN is
//! not low the LED toggles every `period`; rising CLK edges are counted and
//! reported when the simulation stops.
//!
//! Set `RUST_LOG=debug` to watch the dispatcher work.

use std::io::Cursor;
use std::time::Instant;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use vsm_bench::{Bench, BenchHost};
use vsm_core::{AbsTime, EventId, GrantAll, LogicState, PinId, RelTime, RunMode, Severity};
use vsm_model::{DispatchObserver, ModelBuilder, ModelConfig};
use vsm_pins::{PinTable, load_pin_table_reader};
use vsm_script::{
    DeviceContext, DeviceScript, Hook, HookSet, ScriptCatalog, ScriptError, ScriptResult,
};

// ── Constants ─────────────────────────────────────────────────────────────────

const STEP:        RelTime = RelTime::from_micros(50);
const RUN_FOR:     RelTime = RelTime::from_millis(10);
const CLOCK_HALF:  RelTime = RelTime::from_micros(100);
const BLINK_TIMER: EventId = EventId(1);

// ── Pin table ─────────────────────────────────────────────────────────────────

// LED drives take 20 ns; inputs switch instantly.
const PINS_CSV: &str = "\
name,on_time,off_time\n\
EN,0,0\n\
CLK,0,0\n\
LED,20n,35n\n\
";

// ── Device script ─────────────────────────────────────────────────────────────

struct Blinky {
    pins:   PinTable,
    period: RelTime,
    en:     PinId,
    clk:    PinId,
    led:    PinId,
    edges:  u64,
    blinks: u64,
}

impl Blinky {
    fn new(pins: PinTable) -> Self {
        Self {
            pins,
            period: RelTime::ZERO,
            en:     PinId::INVALID,
            clk:    PinId::INVALID,
            led:    PinId::INVALID,
            edges:  0,
            blinks: 0,
        }
    }
}

impl DeviceScript for Blinky {
    fn device_pins(&self) -> Option<PinTable> {
        Some(self.pins.clone())
    }

    fn hooks(&self) -> HookSet {
        [Hook::DeviceInit, Hook::DeviceSimulate, Hook::TimerCallback, Hook::OnStop]
            .into_iter()
            .collect()
    }

    fn device_init(&mut self, ctx: &mut DeviceContext<'_>) -> ScriptResult<()> {
        self.en = ctx.pin("EN")?;
        self.clk = ctx.pin("CLK")?;
        self.led = ctx.pin("LED")?;
        self.period = RelTime::from_secs_f64(ctx.num_param("period", 1e-3));
        if self.period == RelTime::ZERO {
            return Err(ScriptError::Runtime("period must be positive".into()));
        }

        ctx.set_level(self.led, false)?;
        ctx.arm_timer(self.period, BLINK_TIMER);
        ctx.log(Severity::Message, &format!("blinky ready, period {}", self.period));
        Ok(())
    }

    fn device_simulate(&mut self, ctx: &mut DeviceContext<'_>) -> ScriptResult<()> {
        if ctx.is_posedge(self.clk)? {
            self.edges += 1;
        }
        Ok(())
    }

    fn timer_callback(
        &mut self,
        ctx:   &mut DeviceContext<'_>,
        _time: AbsTime,
        event: EventId,
    ) -> ScriptResult<()> {
        if event != BLINK_TIMER {
            return Ok(());
        }
        if !ctx.is_low(self.en)? && ctx.toggle(self.led)?.is_some() {
            self.blinks += 1;
        }
        ctx.arm_timer(self.period, BLINK_TIMER);
        Ok(())
    }

    fn on_stop(&mut self, ctx: &mut DeviceContext<'_>) -> ScriptResult<()> {
        let summary = format!("stopped: {} LED toggles, {} clock edges", self.blinks, self.edges);
        ctx.log(Severity::Message, &summary);
        Ok(())
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct HookCounter {
    calls: [u64; Hook::ALL.len()],
}

impl DispatchObserver for HookCounter {
    fn on_hook(&mut self, hook: Hook, _time: AbsTime) {
        if let Some(slot) = Hook::ALL.iter().position(|&h| h == hook) {
            self.calls[slot] += 1;
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== blinky — scripted VSM device on the bench ===");
    println!("Step: {STEP}  |  Run: {RUN_FOR}  |  Clock half-period: {CLOCK_HALF}");
    println!();

    // 1. Pin table and script catalog.
    let pins = load_pin_table_reader(Cursor::new(PINS_CSV))?;
    println!("Pin table: {} pins", pins.len());
    let catalog = ScriptCatalog::new()
        .with("blinky", move || Box::new(Blinky::new(pins.clone())) as Box<dyn DeviceScript>);

    // 2. Licensed model instance.
    let model = ModelBuilder::new(catalog)
        .config(ModelConfig { model_key: 0x0B11_4C1E, ..ModelConfig::default() })
        .observer(HookCounter::default())
        .create(&mut GrantAll)?;

    // 3. Bench host with the component's properties.
    let host = BenchHost::new()
        .with_pins(["EN", "CLK", "LED"])
        .with_property("moddll", "blinky")
        .with_property("period", "500u");
    let mut bench = Bench::new(model, host, STEP);

    // 4. Set up and start.
    bench.setup()?;
    bench.run_mode(RunMode::Start)?;
    bench.host.drive_input("EN", LogicState::SHI);

    // 5. Run with a square wave on CLK; disable for the last quarter.
    let t0 = Instant::now();
    let until = bench.now() + RUN_FOR;
    let disable_at = bench.now() + RelTime(RUN_FOR.as_picos() / 4 * 3);
    let mut clk_high = false;
    let mut next_clock = bench.now();
    while bench.now() < until {
        if bench.now() >= next_clock {
            clk_high = !clk_high;
            bench.host.drive_input("CLK", LogicState::from_bool(clk_high));
            next_clock += CLOCK_HALF;
        }
        if bench.now() >= disable_at {
            bench.host.drive_input("EN", LogicState::SLO);
        }
        bench.step()?;
    }
    let elapsed = t0.elapsed();

    bench.run_mode(RunMode::Stop)?;

    // 6. Summary.
    let stats = bench.stats();
    println!("Simulated {} in {:.3} ms wall time", bench.now(), elapsed.as_secs_f64() * 1e3);
    println!("  steps  : {}", stats.steps);
    println!("  timers : {}", stats.timers);
    println!();

    println!("{:<16} {:>8}", "Hook", "Calls");
    println!("{}", "-".repeat(25));
    for (hook, calls) in Hook::ALL.iter().zip(bench.model.observer().calls) {
        println!("{:<16} {:>8}", hook.name(), calls);
    }
    println!();

    println!("{:<14} {:<6} {:>8}", "Time", "LED", "Delay");
    println!("{}", "-".repeat(30));
    for drive in bench.host.drives_of("LED") {
        let (time, delay) = (drive.time.to_string(), drive.delay.to_string());
        println!("{:<14} {:<6} {:>8}", time, drive.state.name(), delay);
    }
    println!();

    for line in bench.host.log_lines() {
        println!("[{}] {}", line.severity, line.message);
    }

    bench.teardown();
    Ok(())
}
