//! One simulated vehicle and its per-tick update rule.

use rr_core::{SegmentId, VehicleId};

use crate::BehaviorProfile;

/// Read-only view of the vehicle immediately ahead, with its coordinates
/// already unwrapped into the reacting vehicle's frame (one segment length
/// added per ring boundary between them).
///
/// Callers must take this from the pre-tick snapshot, never from a vehicle
/// updated earlier in the same tick.
#[derive(Copy, Clone, Debug)]
pub struct AheadView {
    /// The trailing edge of the vehicle ahead.
    pub rear_bumper: i64,
    /// Its speed at the start of the tick.
    pub speed: u32,
}

/// A vehicle on the circuit.
///
/// `position` is the front of the vehicle in the local coordinates of its
/// authoritative segment.  It may temporarily exceed the segment length
/// between the update and migration phases of a tick, and the derived
/// [`rear_bumper`][Vehicle::rear_bumper] may be negative while the vehicle
/// straddles a segment boundary.
#[derive(Clone, Debug)]
pub struct Vehicle {
    /// Stable identity, assigned at circuit construction.
    pub id: VehicleId,
    /// The segment that owns this vehicle's kinematics.
    pub segment: SegmentId,
    /// Front coordinate, local to `segment`.
    pub position: i64,
    /// Current speed in position units per tick.  Always within
    /// `[0, profile.desired_speed]`.
    pub speed: u32,
    /// Distance from this vehicle's front to the rear bumper of the vehicle
    /// ahead, recomputed after every move.
    pub gap: i64,
    /// Behavioral parameters (plain data; see [`BehaviorProfile`]).
    pub profile: BehaviorProfile,
}

impl Vehicle {
    pub fn new(id: VehicleId, segment: SegmentId, position: i64, profile: BehaviorProfile) -> Self {
        Self {
            id,
            segment,
            position,
            speed: profile.start_speed.min(profile.desired_speed),
            gap: 0,
            profile,
        }
    }

    /// The trailing edge of the vehicle.  Negative while the rear is still
    /// inside the previous segment.
    #[inline]
    pub fn rear_bumper(&self) -> i64 {
        self.position - self.profile.length as i64 + 1
    }

    /// Whether the vehicle is stopped.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.speed == 0
    }

    /// Advance one tick against the vehicle ahead.
    ///
    /// The four branches form a strict priority cascade — the first match
    /// wins and the rest are skipped:
    ///
    /// 1. **stop** — the planned move would reach the bumper ahead: halt and
    ///    clamp the front to one cell behind it;
    /// 2. **match speed** — the planned move enters the safety zone: adopt
    ///    the ahead vehicle's speed;
    /// 3. **random slowdown** — `draw` falls under the local slowdown
    ///    probability: shed `slow_decrement`, floored at zero;
    /// 4. **accelerate** — gain `accel_step`, capped at `desired_speed`.
    ///
    /// `draw` is consumed by the caller for every vehicle on every tick, so
    /// branch selection never changes the draw stream alignment.
    ///
    /// Returns `true` if the front has advanced past `segment_len` and the
    /// vehicle must migrate to the next segment.
    pub fn step(
        &mut self,
        ahead: AheadView,
        local_slow_factor: f64,
        draw: f64,
        segment_len: i64,
    ) -> bool {
        let planned = self.position + self.speed as i64;

        if planned >= ahead.rear_bumper {
            self.speed = 0;
            self.position = ahead.rear_bumper - 1;
        } else if planned > ahead.rear_bumper - self.profile.safety_gap.margin(self.speed) {
            self.speed = ahead.speed.min(self.profile.desired_speed);
        } else if draw < self.profile.slow_probability * local_slow_factor {
            self.speed = self.speed.saturating_sub(self.profile.slow_decrement);
        } else if self.speed < self.profile.desired_speed {
            self.speed = (self.speed + self.profile.accel_step).min(self.profile.desired_speed);
        }

        // Branch 1 already placed the front; its speed is zero so the clamp
        // stands.  All other branches move by the resolved speed.
        self.position += self.speed as i64;
        self.gap = ahead.rear_bumper - self.position;

        debug_assert!(self.speed <= self.profile.desired_speed);
        self.position >= segment_len
    }

    /// Relocate into the next segment: subtract the old segment's length and
    /// take the new segment's identity.  The id is preserved.
    pub(crate) fn migrate(&mut self, old_segment_len: i64, into: SegmentId) {
        self.position -= old_segment_len;
        self.segment = into;
    }
}
