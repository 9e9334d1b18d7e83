//! Plain data row types written by output backends.

/// A snapshot of one vehicle's state at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSnapshotRow {
    pub vehicle_id: u32,
    pub tick:       u64,
    /// Ring index of the segment that owns the vehicle.
    pub segment:    u16,
    /// Front coordinate, local to the owning segment.
    pub position:   i64,
    pub speed:      u32,
    /// Clearance to the rear bumper of the vehicle ahead.
    pub gap:        i64,
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:             u64,
    pub sim_time_secs:    u64,
    pub mean_speed:       f64,
    pub stopped_vehicles: u64,
    /// Cells of the loop covered by some vehicle body.
    pub occupied_cells:   u64,
}
