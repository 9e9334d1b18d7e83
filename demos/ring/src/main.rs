//! ring — the classic closed-loop scenario.
//!
//! 30 cars on a 1000-unit single-segment loop, one hour of simulated
//! driving.  Tick summaries and per-vehicle snapshots land in
//! `output/ring/` as CSV.
//!
//! Run with:
//!   cargo run -p ring --release

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use rr_core::{SimConfig, Tick};
use rr_output::{CsvWriter, SimOutputObserver};
use rr_road::SegmentSpec;
use rr_sim::{SimObserver, SimBuilder, TickRecord};

// ── Constants ─────────────────────────────────────────────────────────────────

const VEHICLE_COUNT:         u32 = 30;
const SEED:                  u64 = 42;
const TICKS:                 u64 = 3_600; // 1 tick = 1 second → one hour
const OUTPUT_INTERVAL_TICKS: u64 = 60;    // vehicle snapshot once a minute

// ── Progress + CSV observer ───────────────────────────────────────────────────

/// Prints a progress line once a simulated minute and forwards everything to
/// the CSV bridge.
struct ProgressObserver {
    inner: SimOutputObserver<CsvWriter>,
    start: Instant,
}

impl SimObserver for ProgressObserver {
    fn on_tick_end(&mut self, tick: Tick, record: &TickRecord) {
        if tick.0 % 60 == 0 {
            println!(
                "  {tick:>6}  mean speed {:5.1}  stopped {:2}  ({:.3}s)",
                record.mean_speed(),
                record.stopped,
                self.start.elapsed().as_secs_f64(),
            );
        }
        self.inner.on_tick_end(tick, record);
    }

    fn on_snapshot(&mut self, tick: Tick, circuit: &rr_road::Circuit) {
        self.inner.on_snapshot(tick, circuit);
    }

    fn on_run_end(&mut self, summary: &rr_sim::RunSummary) {
        self.inner.on_run_end(summary);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== ring — {VEHICLE_COUNT} cars, {TICKS} ticks, seed {SEED} ===");

    let mut config = SimConfig::with_seed(SEED);
    config.output_interval_ticks = OUTPUT_INTERVAL_TICKS;

    let mut sim = SimBuilder::new(config.clone())
        .segment(SegmentSpec::cars(VEHICLE_COUNT))
        .build()?;

    let out_dir = Path::new("output/ring");
    std::fs::create_dir_all(out_dir)?;
    let mut obs = ProgressObserver {
        inner: SimOutputObserver::new(CsvWriter::new(out_dir)?, &config),
        start: Instant::now(),
    };

    let summary = sim.run_with(TICKS, &mut obs);
    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    println!();
    println!(
        "Done in {:.3}s — mean final speed {:.1}, jam: {}",
        obs.start.elapsed().as_secs_f64(),
        summary.mean_final_speed,
        summary.jam_detected,
    );
    println!("Output written to {}", out_dir.display());

    Ok(())
}
