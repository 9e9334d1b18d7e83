//! A bounded interval of the circuit with its own local conditions.

use rr_core::{SegmentId, VehicleId};

use crate::BehaviorProfile;

/// One segment of the circuit ring.
///
/// The `vehicles` run is ordered by position ascending — index 0 is the
/// rearmost vehicle, the last index the frontmost.  The order always
/// reflects physical order on the road: vehicles never reorder relative to
/// each other (single lane, no overtaking), and a migrating vehicle enters
/// at index 0 of the next segment.
#[derive(Clone, Debug)]
pub struct RoadSegment {
    /// Ring index of this segment.
    pub id: SegmentId,
    /// Fixed length of this segment's interval, in position units.
    pub length: i64,
    /// Scales every resident vehicle's random-slow probability — models
    /// local conditions such as a school zone or roadworks.
    pub slow_factor: f64,
    /// Resident vehicles, rear to front.
    pub vehicles: Vec<VehicleId>,
    /// Rear-bumper-only record of a vehicle whose front has migrated to the
    /// next segment but whose rear is still inside this one.  Followers in
    /// this segment keep seeing its blocking bumper through this record
    /// until the rear clears, at which point it is dropped.
    pub residual: Option<VehicleId>,
}

impl RoadSegment {
    pub fn new(id: SegmentId, length: i64, slow_factor: f64) -> Self {
        Self {
            id,
            length,
            slow_factor,
            vehicles: Vec::new(),
            residual: None,
        }
    }

    /// Number of vehicles whose kinematics this segment owns.  The residual
    /// record is a projection of a vehicle owned elsewhere and is not
    /// counted.
    #[inline]
    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    /// Plan evenly spaced front positions for `count` vehicles of the given
    /// profile.
    ///
    /// Fronts sit at `length - 1 + n * spacing` with
    /// `spacing = segment_length / count`, so the first vehicle's rear
    /// bumper starts at cell 0.  The ring is closed exactly by the caller,
    /// which sets the last vehicle's gap to the distance to the next
    /// segment's first vehicle rather than the uniform spacing.
    pub fn plan_placements(&self, count: u32, profile: &BehaviorProfile) -> Vec<i64> {
        if count == 0 {
            return Vec::new();
        }
        let spacing = self.length / count as i64;
        (0..count as i64)
            .map(|n| profile.length as i64 - 1 + n * spacing)
            .collect()
    }

    /// The vehicle ahead of the one at `index` in this segment's order, or
    /// `None` for the frontmost vehicle (its ahead lives in the next segment
    /// around the ring and is resolved by the circuit).
    #[inline]
    pub fn vehicle_ahead_of(&self, index: usize) -> Option<VehicleId> {
        self.vehicles.get(index + 1).copied()
    }
}
