//! `rr-output` — simulation output writers for the ring-road simulation.
//!
//! The CSV backend creates two files in the configured output directory:
//!
//! | File                    | Contents                                    |
//! |-------------------------|---------------------------------------------|
//! | `tick_summaries.csv`    | One row per tick: mean speed, stopped count |
//! | `vehicle_snapshots.csv` | Per-vehicle state at snapshot intervals     |
//!
//! The backend implements [`OutputWriter`] and is driven by
//! [`SimOutputObserver`], which implements `rr_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rr_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, &config);
//! sim.run_with(3600, &mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{TickSummaryRow, VehicleSnapshotRow};
pub use writer::OutputWriter;
