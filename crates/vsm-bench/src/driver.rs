//! `Bench<M>` — fixed-step driver for any [`DsimModel`].

use vsm_core::{AbsTime, DsimModel, RelTime, RunMode, SimMode};

use crate::BenchHost;

/// Counters accumulated by [`Bench::run_for`] and [`Bench::step`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BenchStats {
    pub steps:  u64,
    pub timers: u64,
}

/// Steps a model through simulated time against a [`BenchHost`].
///
/// Each [`step`](Self::step):
///
/// 1. fires every timer due up to the end of the step, in time order, with
///    the host clock set to each timer's fire time;
/// 2. moves the clock to the end of the step;
/// 3. calls the model's per-step `simulate`;
/// 4. closes the step, so edges seen by this `simulate` are not seen again.
///
/// Stimulus driven between steps belongs to the next step.
pub struct Bench<M: DsimModel> {
    pub model: M,
    pub host:  BenchHost,
    step:      RelTime,
    stats:     BenchStats,
}

impl<M: DsimModel> Bench<M> {
    /// Create a bench advancing `step` per call to [`step`](Self::step).
    ///
    /// # Panics
    /// Panics if `step` is zero.
    pub fn new(model: M, host: BenchHost, step: RelTime) -> Self {
        assert!(step > RelTime::ZERO, "bench step must be non-zero");
        Self { model, host, step, stats: BenchStats::default() }
    }

    pub fn setup(&mut self) -> Result<(), M::Error> {
        self.model.setup(&mut self.host)
    }

    pub fn run_mode(&mut self, mode: RunMode) -> Result<(), M::Error> {
        self.model.run_control(&mut self.host, mode)
    }

    pub fn now(&self) -> AbsTime {
        vsm_core::SimulatorHost::now(&self.host)
    }

    pub fn stats(&self) -> BenchStats {
        self.stats
    }

    /// Advance one step.
    pub fn step(&mut self) -> Result<(), M::Error> {
        let end = self.now() + self.step;
        while let Some((time, event)) = self.host.pop_due_timer(end) {
            self.host.advance_to(time);
            self.model.callback(&mut self.host, time, event)?;
            self.stats.timers += 1;
        }
        self.host.advance_to(end);
        let result = self.model.simulate(&mut self.host, end, SimMode::Normal);
        self.host.end_step();
        result?;
        self.stats.steps += 1;
        Ok(())
    }

    /// Step until at least `duration` has elapsed.  Returns the stats for
    /// this call only.
    pub fn run_for(&mut self, duration: RelTime) -> Result<BenchStats, M::Error> {
        let before = self.stats;
        let until = self.now() + duration;
        while self.now() < until {
            self.step()?;
        }
        Ok(BenchStats {
            steps:  self.stats.steps - before.steps,
            timers: self.stats.timers - before.timers,
        })
    }

    pub fn teardown(&mut self) {
        self.model.teardown();
    }
}
