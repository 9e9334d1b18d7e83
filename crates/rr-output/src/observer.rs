//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use rr_core::{SimConfig, Tick, VehicleId};
use rr_road::Circuit;
use rr_sim::{RunSummary, SimObserver, TickRecord};

use crate::row::{TickSummaryRow, VehicleSnapshotRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes vehicle snapshots and tick summaries to an
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After the run returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:             W,
    tick_duration_secs: u32,
    last_error:         Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for simulated
    /// time conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            tick_duration_secs: config.tick_duration_secs,
            last_error:         None,
        }
    }

    /// Take the stored write error (if any) after the run returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn sim_time(&self, tick: Tick) -> u64 {
        tick.0 * self.tick_duration_secs as u64
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, record: &TickRecord) {
        let row = TickSummaryRow {
            tick:             tick.0,
            sim_time_secs:    self.sim_time(tick),
            mean_speed:       record.mean_speed(),
            stopped_vehicles: record.stopped as u64,
            occupied_cells:   record.occupied_cells() as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, circuit: &Circuit) {
        let rows: Vec<VehicleSnapshotRow> = (0..circuit.vehicle_count())
            .map(|i| {
                let v = circuit.vehicle(VehicleId(i as u32));
                VehicleSnapshotRow {
                    vehicle_id: v.id.0,
                    tick:       tick.0,
                    segment:    v.segment.0,
                    position:   v.position,
                    speed:      v.speed,
                    gap:        v.gap,
                }
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, _summary: &RunSummary) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
