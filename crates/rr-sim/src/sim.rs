//! The `Sim` struct and its tick loop.

use rr_core::{DrawSource, SimClock, SimConfig};
use rr_road::Circuit;

use crate::observer::{NoopObserver, SimObserver};
use crate::record::{RunSummary, TickRecord};

/// The main simulation runner.
///
/// `Sim<D>` owns the circuit, the clock, the injected draw source, and the
/// accumulated run history.  Create via [`SimBuilder`][crate::SimBuilder],
/// or [`Sim::from_circuit`] for explicitly laid-out scenarios.
///
/// The state machine is trivial by design: `Idle(ticks = n)` → `tick()` →
/// `Idle(ticks = n + 1)`.  Each tick is atomic from the caller's
/// perspective and a pure function of the prior state plus the next draws.
#[derive(Debug)]
pub struct Sim<D: DrawSource> {
    /// Global configuration (seed, tick duration, snapshot interval).
    pub config: SimConfig,

    /// Simulation clock — tracks the current tick.
    pub clock: SimClock,

    /// The closed-loop roadway being simulated.
    pub circuit: Circuit,

    /// The injected random-draw stream.  Exactly one draw is consumed per
    /// vehicle per tick, in processing order.
    draws: D,

    /// Records of every tick executed so far, consumed by reporting.
    history: Vec<TickRecord>,
}

impl<D: DrawSource> Sim<D> {
    /// Assemble a sim around an already-constructed circuit.
    pub fn from_circuit(config: SimConfig, circuit: Circuit, draws: D) -> Self {
        Self {
            clock: config.make_clock(),
            config,
            circuit,
            draws,
            history: Vec::new(),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Advance the simulation by one tick and return its record.
    pub fn tick(&mut self) -> &TickRecord {
        let now = self.clock.current_tick;
        self.circuit.step_tick(&mut self.draws);
        let record = TickRecord {
            tick: now,
            speeds: self.circuit.speeds(),
            occupancy: self.circuit.occupancy_mask(),
            stopped: self.circuit.stopped_count(),
        };
        self.history.push(record);
        self.clock.advance();
        &self.history[self.history.len() - 1]
    }

    /// Run `duration` ticks and summarize them.
    pub fn run_for(&mut self, duration: u64) -> RunSummary {
        self.run_with(duration, &mut NoopObserver)
    }

    /// Run `duration` ticks, invoking observer hooks at every tick
    /// boundary.  Snapshots fire every `config.output_interval_ticks` ticks
    /// (disabled at 0).
    pub fn run_with<O: SimObserver>(&mut self, duration: u64, observer: &mut O) -> RunSummary {
        let run_start = self.history.len();
        for _ in 0..duration {
            let now = self.clock.current_tick;
            observer.on_tick_start(now);
            self.tick();
            if let Some(record) = self.history.last() {
                observer.on_tick_end(now, record);
            }
            if self.config.output_interval_ticks > 0
                && now.0 % self.config.output_interval_ticks == 0
            {
                observer.on_snapshot(now, &self.circuit);
            }
        }
        let summary = self.summarize(run_start);
        observer.on_run_end(&summary);
        summary
    }

    /// Records of every tick executed so far.
    pub fn history(&self) -> &[TickRecord] {
        &self.history
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Summarize the ticks recorded since `run_start`.
    fn summarize(&self, run_start: usize) -> RunSummary {
        let run = &self.history[run_start..];
        RunSummary {
            ticks_run: run.len() as u64,
            mean_final_speed: run.last().map(TickRecord::mean_speed).unwrap_or(0.0),
            jam_detected: run.iter().any(|r| r.stopped > 0),
        }
    }
}
