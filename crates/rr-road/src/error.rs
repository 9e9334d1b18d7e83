//! Error types for rr-road.
//!
//! All variants are configuration-class errors: they are rejected when a
//! [`Circuit`][crate::Circuit] is constructed and can never surface during
//! steady-state ticking.  Tick-time defects (overlap, negative gap) are
//! internal invariant violations checked by debug assertions instead.

use rr_core::SegmentId;
use thiserror::Error;

/// Errors raised while constructing a [`Circuit`][crate::Circuit].
#[derive(Debug, Error)]
pub enum CircuitError {
    #[error("a circuit needs at least one segment")]
    NoSegments,

    #[error("a circuit needs at least one vehicle")]
    NoVehicles,

    #[error(
        "segment {segment} cannot hold its vehicles: {required} cells required \
         (footprints plus one free cell each), {available} available"
    )]
    Overcrowded {
        segment:   SegmentId,
        required:  i64,
        available: i64,
    },

    #[error("invalid vehicle placement: {0}")]
    InvalidPlacement(String),
}

/// Alias for `Result<T, CircuitError>`.
pub type CircuitResult<T> = Result<T, CircuitError>;
