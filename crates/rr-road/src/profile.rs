//! Per-vehicle behavioral parameters.
//!
//! Vehicle variants (passenger car, long truck, cautious driver, …) are
//! plain data, not a type hierarchy: one [`BehaviorProfile`] value per
//! vehicle carries its physical footprint and driving parameters, and the
//! safety-gap policy is a small strategy enum rather than virtual dispatch.

/// How much clearance a driver keeps before matching the speed of the
/// vehicle ahead.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SafetyGap {
    /// Safety margin equals the current speed (one second of headway).
    #[default]
    OwnSpeed,
    /// Safety margin equals twice the current speed — used by long or
    /// heavily loaded vehicles that need more room to react.
    DoubleSpeed,
}

impl SafetyGap {
    /// The safety margin in position units at the given speed.
    #[inline]
    pub fn margin(self, speed: u32) -> i64 {
        match self {
            SafetyGap::OwnSpeed => speed as i64,
            SafetyGap::DoubleSpeed => 2 * speed as i64,
        }
    }
}

/// The behavioral and physical parameters of one vehicle.
///
/// All fields are plain data so heterogeneous fleets are built by mixing
/// profile values, never by subclassing.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorProfile {
    /// Physical footprint in position units.
    pub length: u32,
    /// Upper bound on speed, in position units per tick.
    pub desired_speed: u32,
    /// Speed assigned at initial placement.
    pub start_speed: u32,
    /// Speed gained per tick when the acceleration branch fires.
    pub accel_step: u32,
    /// Base probability of a spontaneous slowdown per tick, before the
    /// segment's local multiplier is applied.
    pub slow_probability: f64,
    /// Speed lost when the slowdown branch fires.
    pub slow_decrement: u32,
    /// Safety-gap policy for the match-speed branch.
    pub safety_gap: SafetyGap,
}

impl BehaviorProfile {
    /// A passenger car: 5 units long, cruises just under the 33-unit/tick
    /// desired speed, keeps one speed's worth of headway.
    pub fn car() -> Self {
        Self {
            length: 5,
            desired_speed: 33,
            start_speed: 28,
            accel_step: 2,
            slow_probability: 0.1,
            slow_decrement: 2,
            safety_gap: SafetyGap::OwnSpeed,
        }
    }

    /// A long truck: 25 units of footprint, slower top speed, and double
    /// headway so it never needs to brake hard.
    pub fn truck() -> Self {
        Self {
            length: 25,
            desired_speed: 25,
            start_speed: 22,
            accel_step: 1,
            slow_probability: 0.1,
            slow_decrement: 2,
            safety_gap: SafetyGap::DoubleSpeed,
        }
    }

    /// Override the desired speed, clamping the start speed to it.
    pub fn with_desired_speed(mut self, desired_speed: u32) -> Self {
        self.desired_speed = desired_speed;
        self.start_speed = self.start_speed.min(desired_speed);
        self
    }

    /// Override the base slowdown probability.
    pub fn with_slow_probability(mut self, p: f64) -> Self {
        self.slow_probability = p;
        self
    }
}

impl Default for BehaviorProfile {
    fn default() -> Self {
        BehaviorProfile::car()
    }
}
