//! `rr-sim` — tick loop orchestrator for the ring-road traffic simulation.
//!
//! # Tick loop
//!
//! ```text
//! for each tick:
//!   ① Step      — Circuit::step_tick: snapshot, update cascade per vehicle
//!                 (rearmost first, ring order), migrations, residuals.
//!   ② Record    — capture the speed vector, occupancy mask, and stopped
//!                 count into a TickRecord appended to the run history.
//!   ③ Observe   — on_tick_end(&record); on_snapshot every
//!                 config.output_interval_ticks ticks.
//!   ④ Advance   — SimClock::advance.
//! ```
//!
//! Each tick is atomic from the caller's perspective: there are no
//! suspended or partial states, and the whole loop is single-threaded.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rr_core::SimConfig;
//! use rr_road::SegmentSpec;
//! use rr_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::with_seed(42))
//!     .segment(SegmentSpec::cars(30))
//!     .build()?;
//! let summary = sim.run_for(3600);
//! println!("mean speed {:.1}, jam: {}", summary.mean_final_speed, summary.jam_detected);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod record;
pub mod sim;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use record::{RunSummary, TickRecord};
pub use sim::Sim;
