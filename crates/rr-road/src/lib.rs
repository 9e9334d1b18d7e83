//! `rr-road` — vehicle update rule and circuit topology for the ring-road
//! traffic simulation.
//!
//! The model is a discrete-time, discrete-space car-following simulation on a
//! closed loop (a Nagel–Schreckenberg variant).  The loop is a ring of one or
//! more [`RoadSegment`]s; each holds an ordered run of vehicles and a local
//! slowdown multiplier.  Per tick every vehicle reacts to the vehicle ahead
//! through a four-branch priority cascade (stop / match speed / random
//! slowdown / accelerate), then vehicles that ran off the end of their
//! segment migrate to the next one around the ring.
//!
//! # Determinism
//!
//! Everything is single-threaded and sequential.  "Vehicle ahead" inputs are
//! read from an immutable pre-tick snapshot, so update order cannot change
//! the kinematics; the only order-sensitive resource is the random draw
//! stream, which is pinned to processing order (segments in ring order,
//! rearmost vehicle first) at exactly one draw per vehicle per tick.

pub mod circuit;
pub mod error;
pub mod profile;
pub mod segment;
pub mod vehicle;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use circuit::{Circuit, ManualVehicle, SegmentSpec};
pub use error::{CircuitError, CircuitResult};
pub use profile::{BehaviorProfile, SafetyGap};
pub use segment::RoadSegment;
pub use vehicle::{AheadView, Vehicle};
