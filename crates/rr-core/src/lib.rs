//! `rr-core` — foundational types for the ring-road traffic simulation.
//!
//! This crate is a dependency of every other `rr-*` crate.  It intentionally
//! has no `rr-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                          |
//! |-----------|---------------------------------------------------|
//! | [`ids`]   | `VehicleId`, `SegmentId`                          |
//! | [`time`]  | `Tick`, `SimClock`, `SimConfig`                   |
//! | [`rng`]   | `DrawSource`, `SimRng`, `ScriptedDraws`           |
//! | [`error`] | `RrError`, `RrResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{RrError, RrResult};
pub use ids::{SegmentId, VehicleId};
pub use rng::{DrawSource, ScriptedDraws, SimRng};
pub use time::{SimClock, SimConfig, Tick};
