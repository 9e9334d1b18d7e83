//! Per-tick and per-run result types handed to observers and reporting.

use rr_core::Tick;

/// The observable outcome of one tick: a read-only snapshot fed to
/// out-of-band sinks (reporting, visualization) after the tick completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickRecord {
    /// The tick this record describes.
    pub tick: Tick,
    /// Every vehicle's resulting speed, in vehicle-id order.
    pub speeds: Vec<u32>,
    /// Per-cell occupancy over the whole loop: 1 = empty, 0 = covered by a
    /// vehicle body.  Length equals the circuit's total length.
    pub occupancy: Vec<u8>,
    /// Number of vehicles with speed 0 this tick.
    pub stopped: usize,
}

impl TickRecord {
    /// Mean of the speed vector.  0.0 for an empty vector (cannot happen
    /// for a validly constructed circuit).
    pub fn mean_speed(&self) -> f64 {
        if self.speeds.is_empty() {
            return 0.0;
        }
        self.speeds.iter().map(|&s| s as f64).sum::<f64>() / self.speeds.len() as f64
    }

    /// Number of cells covered by some vehicle body.
    pub fn occupied_cells(&self) -> usize {
        self.occupancy.iter().filter(|&&c| c == 0).count()
    }
}

/// Aggregate outcome of a `run_for` call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    /// Ticks executed by this run.
    pub ticks_run: u64,
    /// Mean speed over the final tick's speed vector.
    pub mean_final_speed: f64,
    /// Whether congestion emerged: true iff at least one vehicle was
    /// stopped on at least one tick of this run.  Defined globally across
    /// all segments; per-segment breakdowns are derivable from the tick
    /// records by external reporting.
    pub jam_detected: bool,
}
