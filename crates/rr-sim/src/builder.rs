//! Fluent builder for constructing a [`Sim`].

use rr_core::{DrawSource, SimConfig, SimRng};
use rr_road::{Circuit, ManualVehicle, SegmentSpec};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`] — seed, tick duration, snapshot interval
/// - At least one [`SegmentSpec`] via `.segment(..)` / `.segments(..)`
///
/// # Optional inputs
///
/// | Method          | Default                                        |
/// |-----------------|------------------------------------------------|
/// | `.vehicles(v)`  | Even spacing from each spec's `vehicle_count`  |
///
/// When `.vehicles(..)` is supplied, the specs' `vehicle_count` fields are
/// ignored and the circuit is laid out exactly as given.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig::with_seed(42))
///     .segment(SegmentSpec::cars(30))
///     .build()?;
/// let summary = sim.run_for(3600);
/// ```
pub struct SimBuilder {
    config:   SimConfig,
    segments: Vec<SegmentSpec>,
    vehicles: Option<Vec<ManualVehicle>>,
}

impl SimBuilder {
    /// Create a builder with the global configuration.
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            segments: Vec::new(),
            vehicles: None,
        }
    }

    /// Append one segment to the loop, in ring order.
    pub fn segment(mut self, spec: SegmentSpec) -> Self {
        self.segments.push(spec);
        self
    }

    /// Append several segments to the loop, in ring order.
    pub fn segments<I: IntoIterator<Item = SegmentSpec>>(mut self, specs: I) -> Self {
        self.segments.extend(specs);
        self
    }

    /// Place vehicles at explicit positions instead of the default even
    /// spacing.  Positions are segment-local front-bumper coordinates.
    pub fn vehicles(mut self, vehicles: Vec<ManualVehicle>) -> Self {
        self.vehicles = Some(vehicles);
        self
    }

    /// Validate inputs, lay out the circuit, and return a ready-to-run
    /// [`Sim`] seeded from the config.
    pub fn build(self) -> SimResult<Sim<SimRng>> {
        let seed = self.config.seed;
        self.build_with_draws(SimRng::new(seed))
    }

    /// Like [`build`][Self::build], but with an externally supplied draw
    /// source (e.g. [`rr_core::ScriptedDraws`] in tests).
    pub fn build_with_draws<D: DrawSource>(self, draws: D) -> SimResult<Sim<D>> {
        if self.config.tick_duration_secs == 0 {
            return Err(SimError::Config(
                "tick duration must be at least one second".into(),
            ));
        }

        let circuit = match self.vehicles {
            Some(v) => {
                let dims: Vec<(i64, f64)> = self
                    .segments
                    .iter()
                    .map(|s| (s.length, s.slow_factor))
                    .collect();
                Circuit::with_layout(&dims, v)?
            }
            None => Circuit::new(&self.segments)?,
        };

        Ok(Sim::from_circuit(self.config, circuit, draws))
    }
}
