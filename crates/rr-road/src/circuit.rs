//! The `Circuit` — a closed loop of ring-ordered road segments.
//!
//! # Tick algorithm
//!
//! 1. Take an immutable snapshot of every vehicle's `(rear bumper, speed)`.
//!    All "vehicle ahead" inputs for the tick come from this snapshot, which
//!    breaks the circular same-tick dependency between ring-adjacent
//!    vehicles: update order cannot change the kinematics, and since the
//!    vehicle ahead never moves backwards, a follower that clamps against
//!    the snapshot bumper can never end the tick overlapping.
//! 2. Update every vehicle — segments in ring order, rearmost first within
//!    each segment — consuming exactly one random draw per vehicle.
//! 3. Migrate vehicles that ran past the end of their segment to index 0 of
//!    the next segment (`position -= segment length`), identity preserved.
//! 4. Rebuild the residual bumper records: a vehicle whose rear bumper is
//!    negative still physically occupies the tail of the previous
//!    segment(s), and followers there must keep seeing its bumper.

use rr_core::{DrawSource, SegmentId, VehicleId};

use crate::error::{CircuitError, CircuitResult};
use crate::profile::BehaviorProfile;
use crate::segment::RoadSegment;
use crate::vehicle::{AheadView, Vehicle};

// ── Construction inputs ───────────────────────────────────────────────────────

/// Description of one segment for [`Circuit::new`].
#[derive(Clone, Debug)]
pub struct SegmentSpec {
    /// Length of the segment's interval in position units.
    pub length: i64,
    /// Local multiplier applied to resident vehicles' slowdown probability.
    pub slow_factor: f64,
    /// Vehicles to place, evenly spaced, at construction.
    pub vehicle_count: u32,
    /// Profile shared by this segment's initial vehicles.
    pub profile: BehaviorProfile,
}

impl SegmentSpec {
    /// A 1000-unit segment with no local slowdown scaling and `count`
    /// passenger cars.
    pub fn cars(count: u32) -> Self {
        Self {
            length: 1000,
            slow_factor: 1.0,
            vehicle_count: count,
            profile: BehaviorProfile::car(),
        }
    }
}

/// An explicitly placed vehicle for [`Circuit::with_layout`] — used to set
/// up boundary and collision scenarios that even spacing cannot express.
#[derive(Clone, Debug)]
pub struct ManualVehicle {
    pub segment: SegmentId,
    /// Front coordinate, local to `segment`.
    pub position: i64,
    pub speed: u32,
    pub profile: BehaviorProfile,
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// Pre-tick state of one vehicle, local to its authoritative segment.
#[derive(Copy, Clone)]
struct VehicleSnap {
    rear_bumper: i64,
    speed: u32,
}

// ── Circuit ───────────────────────────────────────────────────────────────────

/// The full closed-loop roadway.
///
/// Owns every vehicle (indexed by [`VehicleId`]) and the ring of segments
/// that partition the loop.  Vehicles are created once at construction and
/// never destroyed — migration only moves their record between segment runs.
#[derive(Clone, Debug)]
pub struct Circuit {
    segments: Vec<RoadSegment>,
    /// All vehicles, indexed by id.  Ids are assigned in ring order (segment
    /// by segment, rear to front) at construction.
    vehicles: Vec<Vehicle>,
    /// Global start coordinate of each segment (prefix sums of lengths).
    starts: Vec<i64>,
    total_length: i64,
}

impl Circuit {
    // ── Construction ──────────────────────────────────────────────────────

    /// Build a circuit with evenly spaced vehicles per segment.
    ///
    /// # Errors
    ///
    /// All configuration problems are rejected here, never at tick time:
    /// zero segments, zero vehicles overall, non-positive segment lengths,
    /// and any segment too short for its vehicles' footprints plus one free
    /// cell each.
    pub fn new(specs: &[SegmentSpec]) -> CircuitResult<Circuit> {
        if specs.is_empty() {
            return Err(CircuitError::NoSegments);
        }
        if specs.iter().all(|s| s.vehicle_count == 0) {
            return Err(CircuitError::NoVehicles);
        }

        let mut segments = Vec::with_capacity(specs.len());
        let mut vehicles = Vec::new();

        for (idx, spec) in specs.iter().enumerate() {
            let sid = SegmentId(idx as u16);
            if spec.length <= 0 || spec.slow_factor < 0.0 {
                return Err(CircuitError::InvalidPlacement(format!(
                    "segment {sid}: length and slow factor must be positive"
                )));
            }
            let required = spec.vehicle_count as i64 * (spec.profile.length as i64 + 1);
            if required > spec.length {
                return Err(CircuitError::Overcrowded {
                    segment: sid,
                    required,
                    available: spec.length,
                });
            }

            let mut segment = RoadSegment::new(sid, spec.length, spec.slow_factor);
            for position in segment.plan_placements(spec.vehicle_count, &spec.profile) {
                let vid = VehicleId(vehicles.len() as u32);
                vehicles.push(Vehicle::new(vid, sid, position, spec.profile));
                segment.vehicles.push(vid);
            }
            segments.push(segment);
        }

        let mut circuit = Self::assemble(segments, vehicles);
        circuit.rebuild_residuals();
        circuit.recompute_gaps();
        Ok(circuit)
    }

    /// Build a circuit from explicit vehicle placements.
    ///
    /// `segments` gives each segment's `(length, slow_factor)`; vehicles may
    /// be listed in any order and are sorted into physical order per
    /// segment.  A vehicle whose rear bumper is negative (straddling back
    /// into the previous segment) is accepted and gets its residual record
    /// immediately.
    pub fn with_layout(
        segments: &[(i64, f64)],
        mut layout: Vec<ManualVehicle>,
    ) -> CircuitResult<Circuit> {
        if segments.is_empty() {
            return Err(CircuitError::NoSegments);
        }
        if layout.is_empty() {
            return Err(CircuitError::NoVehicles);
        }
        for mv in &layout {
            let Some(&(len, _)) = segments.get(mv.segment.index()) else {
                return Err(CircuitError::InvalidPlacement(format!(
                    "vehicle placed on unknown segment {}",
                    mv.segment
                )));
            };
            if mv.position < 0 || mv.position >= len {
                return Err(CircuitError::InvalidPlacement(format!(
                    "position {} outside segment {} (length {len})",
                    mv.position, mv.segment
                )));
            }
            if mv.speed > mv.profile.desired_speed {
                return Err(CircuitError::InvalidPlacement(format!(
                    "start speed {} exceeds desired speed {}",
                    mv.speed, mv.profile.desired_speed
                )));
            }
        }

        layout.sort_by_key(|mv| (mv.segment, mv.position));

        let mut segs: Vec<RoadSegment> = segments
            .iter()
            .enumerate()
            .map(|(idx, &(len, slow))| RoadSegment::new(SegmentId(idx as u16), len, slow))
            .collect();

        let mut vehicles = Vec::with_capacity(layout.len());
        for mv in layout {
            let vid = VehicleId(vehicles.len() as u32);
            let mut vehicle = Vehicle::new(vid, mv.segment, mv.position, mv.profile);
            vehicle.speed = mv.speed;
            vehicles.push(vehicle);
            segs[mv.segment.index()].vehicles.push(vid);
        }

        let mut circuit = Self::assemble(segs, vehicles);
        circuit.rebuild_residuals();
        circuit.recompute_gaps();
        circuit
            .check_invariants()
            .map_err(CircuitError::InvalidPlacement)?;
        Ok(circuit)
    }

    fn assemble(segments: Vec<RoadSegment>, vehicles: Vec<Vehicle>) -> Circuit {
        let mut starts = Vec::with_capacity(segments.len());
        let mut total = 0;
        for seg in &segments {
            starts.push(total);
            total += seg.length;
        }
        Circuit {
            segments,
            vehicles,
            starts,
            total_length: total,
        }
    }

    // ── Read accessors ────────────────────────────────────────────────────

    /// Total length of the closed loop (sum of segment lengths).
    #[inline]
    pub fn total_length(&self) -> i64 {
        self.total_length
    }

    #[inline]
    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    #[inline]
    pub fn vehicle(&self, id: VehicleId) -> &Vehicle {
        &self.vehicles[id.index()]
    }

    #[inline]
    pub fn segments(&self) -> &[RoadSegment] {
        &self.segments
    }

    /// Every vehicle's speed this tick, in id order.
    pub fn speeds(&self) -> Vec<u32> {
        self.vehicles.iter().map(|v| v.speed).collect()
    }

    /// Number of vehicles currently stopped.
    pub fn stopped_count(&self) -> usize {
        self.vehicles.iter().filter(|v| v.is_stopped()).count()
    }

    /// Per-cell occupancy over the whole loop: 1 = empty, 0 = covered by
    /// some vehicle's `[rear bumper, front]` interval (wraparound-aware).
    pub fn occupancy_mask(&self) -> Vec<u8> {
        let mut mask = vec![1u8; self.total_length as usize];
        for v in &self.vehicles {
            let front = self.starts[v.segment.index()] + v.position;
            for d in 0..v.profile.length as i64 {
                let cell = (front - d).rem_euclid(self.total_length);
                mask[cell as usize] = 0;
            }
        }
        mask
    }

    // ── The tick ──────────────────────────────────────────────────────────

    /// Advance the whole circuit by one tick.
    ///
    /// Consumes exactly one draw from `draws` per vehicle, in processing
    /// order, regardless of which cascade branch each vehicle takes.
    pub fn step_tick<D: DrawSource>(&mut self, draws: &mut D) {
        let snaps: Vec<VehicleSnap> = self
            .vehicles
            .iter()
            .map(|v| VehicleSnap {
                rear_bumper: v.rear_bumper(),
                speed: v.speed,
            })
            .collect();

        for s in 0..self.segments.len() {
            let slow_factor = self.segments[s].slow_factor;
            let segment_len = self.segments[s].length;
            for i in 0..self.segments[s].vehicles.len() {
                let vid = self.segments[s].vehicles[i];
                let ahead = self.ahead_view(s, i, &snaps);
                let draw = draws.next_draw();
                self.vehicles[vid.index()].step(ahead, slow_factor, draw, segment_len);
            }
        }

        self.resolve_migrations();
        self.rebuild_residuals();

        #[cfg(debug_assertions)]
        if let Err(msg) = self.check_invariants() {
            panic!("invariant violation after tick: {msg}");
        }
    }

    /// Snapshot view of the vehicle ahead of position `i` in segment `s`,
    /// unwrapped into that vehicle's coordinate frame.
    ///
    /// Resolution order: the next vehicle in this segment's run; else the
    /// segment's residual straddler; else the first vehicle of the next
    /// non-empty segment walking the ring.  A lone vehicle sees its own
    /// snapshot one full circuit ahead.
    fn ahead_view(&self, s: usize, i: usize, snaps: &[VehicleSnap]) -> AheadView {
        let segment = &self.segments[s];

        if let Some(aid) = segment.vehicle_ahead_of(i) {
            let snap = snaps[aid.index()];
            return AheadView {
                rear_bumper: snap.rear_bumper,
                speed: snap.speed,
            };
        }

        if let Some(rid) = segment.residual {
            let snap = snaps[rid.index()];
            let offset = self.forward_offset(s, self.vehicles[rid.index()].segment.index());
            return AheadView {
                rear_bumper: snap.rear_bumper + offset,
                speed: snap.speed,
            };
        }

        let n = self.segments.len();
        let mut offset = segment.length;
        let mut k = (s + 1) % n;
        loop {
            if let Some(&aid) = self.segments[k].vehicles.first() {
                let snap = snaps[aid.index()];
                return AheadView {
                    rear_bumper: snap.rear_bumper + offset,
                    speed: snap.speed,
                };
            }
            // The walk always terminates: segment `s` itself is non-empty.
            offset += self.segments[k].length;
            k = (k + 1) % n;
        }
    }

    /// Arc distance from segment `from`'s origin to segment `to`'s origin,
    /// walking forward at least one segment (so `from == to` yields the full
    /// circuit length on a one-segment ring, not zero).
    fn forward_offset(&self, from: usize, to: usize) -> i64 {
        let n = self.segments.len();
        let mut offset = self.segments[from].length;
        let mut k = (from + 1) % n;
        while k != to {
            offset += self.segments[k].length;
            k = (k + 1) % n;
        }
        offset
    }

    /// Move vehicles that ran past their segment's end to index 0 of the
    /// next segment around the ring, subtracting the old length.  Repeats
    /// until stable so a fast vehicle can cross several short segments in
    /// one tick.
    fn resolve_migrations(&mut self) {
        let n = self.segments.len();
        loop {
            let mut moved_any = false;
            for s in 0..n {
                let segment_len = self.segments[s].length;
                let next = (s + 1) % n;
                let next_id = self.segments[next].id;
                while let Some(&vid) = self.segments[s].vehicles.last() {
                    if self.vehicles[vid.index()].position < segment_len {
                        break;
                    }
                    self.segments[s].vehicles.pop();
                    self.vehicles[vid.index()].migrate(segment_len, next_id);
                    // The migrant entered the boundary last, so it is the
                    // rearmost vehicle of its new segment.
                    self.segments[next].vehicles.insert(0, vid);
                    moved_any = true;
                }
            }
            if !moved_any {
                break;
            }
        }
    }

    /// Derive every segment's residual record from vehicle geometry: a
    /// vehicle whose rear bumper is negative still covers the tail of the
    /// segment(s) behind it.  Rebuilding from scratch each tick drops a
    /// record on exactly the tick the rear clears.
    fn rebuild_residuals(&mut self) {
        for segment in &mut self.segments {
            segment.residual = None;
        }
        let n = self.segments.len();
        for idx in 0..self.vehicles.len() {
            let (vid, home, mut rear) = {
                let v = &self.vehicles[idx];
                (v.id, v.segment.index(), v.rear_bumper())
            };
            let mut p = home;
            while rear < 0 {
                p = (p + n - 1) % n;
                rear += self.segments[p].length;
                self.segments[p].residual = Some(vid);
                if p == home {
                    break;
                }
            }
        }
    }

    /// Recompute every vehicle's stored gap from current geometry.  Used at
    /// construction; during ticking the gap is refreshed by the update rule.
    fn recompute_gaps(&mut self) {
        let snaps: Vec<VehicleSnap> = self
            .vehicles
            .iter()
            .map(|v| VehicleSnap {
                rear_bumper: v.rear_bumper(),
                speed: v.speed,
            })
            .collect();
        for s in 0..self.segments.len() {
            for i in 0..self.segments[s].vehicles.len() {
                let vid = self.segments[s].vehicles[i];
                let ahead = self.ahead_view(s, i, &snaps);
                let v = &mut self.vehicles[vid.index()];
                v.gap = ahead.rear_bumper - v.position;
            }
        }
    }

    // ── Invariant checks ──────────────────────────────────────────────────

    /// Verify the structural invariants: conservation of the vehicle count,
    /// physical ordering within each segment, speed bounds, and no overlap
    /// between any vehicle and the one ahead of it (wraparound-aware).
    ///
    /// Checked by a debug assertion after every tick; a failure always
    /// indicates a defect in the ahead lookup or migration logic, never a
    /// user error.
    pub fn check_invariants(&self) -> Result<(), String> {
        let listed: usize = self.segments.iter().map(|s| s.vehicles.len()).sum();
        if listed != self.vehicles.len() {
            return Err(format!(
                "vehicle count not conserved: {listed} listed across segments, {} owned",
                self.vehicles.len()
            ));
        }

        let snaps: Vec<VehicleSnap> = self
            .vehicles
            .iter()
            .map(|v| VehicleSnap {
                rear_bumper: v.rear_bumper(),
                speed: v.speed,
            })
            .collect();

        for s in 0..self.segments.len() {
            let segment = &self.segments[s];
            for i in 0..segment.vehicles.len() {
                let vid = segment.vehicles[i];
                let v = &self.vehicles[vid.index()];
                if v.segment != segment.id {
                    return Err(format!("{} listed in segment {} but owned by {}", v.id, segment.id, v.segment));
                }
                if v.speed > v.profile.desired_speed {
                    return Err(format!("{} speed {} exceeds desired {}", v.id, v.speed, v.profile.desired_speed));
                }
                if v.position >= segment.length {
                    return Err(format!("{} front {} beyond segment {} length {}", v.id, v.position, segment.id, segment.length));
                }
                if let Some(&next) = segment.vehicles.get(i + 1) {
                    let ahead = &self.vehicles[next.index()];
                    if ahead.position < v.position {
                        return Err(format!("segment {} order broken between {} and {}", segment.id, v.id, ahead.id));
                    }
                }
                let ahead = self.ahead_view(s, i, &snaps);
                if self.vehicles.len() > 1 && ahead.rear_bumper <= v.position {
                    return Err(format!(
                        "overlap: {} front {} reaches bumper ahead at {}",
                        v.id, v.position, ahead.rear_bumper
                    ));
                }
            }
        }
        Ok(())
    }
}
