//! Simulation observer trait for progress reporting and data collection.

use rr_core::Tick;
use rr_road::Circuit;

use crate::record::{RunSummary, TickRecord};

/// Callbacks invoked by [`Sim::run_with`][crate::Sim::run_with] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — jam logger
///
/// ```rust,ignore
/// struct JamLogger;
///
/// impl SimObserver for JamLogger {
///     fn on_tick_end(&mut self, tick: Tick, record: &TickRecord) {
///         if record.stopped > 0 {
///             println!("{tick}: {} vehicles stopped", record.stopped);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with the tick's record.
    fn on_tick_end(&mut self, _tick: Tick, _record: &TickRecord) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks; never called when the interval is 0).
    ///
    /// Provides read-only access to the full circuit so output writers can
    /// record detailed state without the sim knowing about any specific
    /// output format.
    fn on_snapshot(&mut self, _tick: Tick, _circuit: &Circuit) {}

    /// Called once after the final tick of a run completes.
    fn on_run_end(&mut self, _summary: &RunSummary) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call
/// `run_with` but don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
