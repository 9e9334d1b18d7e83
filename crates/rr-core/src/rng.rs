//! Deterministic random-draw sources for the slowdown rule.
//!
//! # Determinism strategy
//!
//! The update cascade consumes exactly **one** uniform draw in `[0, 1)` per
//! vehicle per tick, taken before the cascade runs, whether or not the
//! stochastic-slowdown branch is reached.  Draw order is therefore pinned to
//! vehicle-processing order (segments in ring order, rearmost vehicle first)
//! and a fixed seed reproduces a run bit for bit regardless of which branch
//! each vehicle takes.
//!
//! The source is an injected dependency rather than a global stream so test
//! suites can substitute scripted sequences — see [`ScriptedDraws`].

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── DrawSource ────────────────────────────────────────────────────────────────

/// A stream of uniform draws in `[0, 1)` consumed by the update cascade.
///
/// Implementations must be deterministic given their construction inputs.
pub trait DrawSource {
    /// Produce the next draw.  Must always return a value in `[0, 1)`.
    fn next_draw(&mut self) -> f64;
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG seeded from the run's master seed.
///
/// Used only in single-threaded contexts.  If parallel randomness is ever
/// needed, give each worker its own `SimRng` derived via [`SimRng::child`].
#[derive(Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset — useful for
    /// seeding auxiliary streams deterministically from the root seed.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

impl DrawSource for SimRng {
    #[inline]
    fn next_draw(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

// ── ScriptedDraws ─────────────────────────────────────────────────────────────

/// A `DrawSource` that replays a fixed sequence of draws.
///
/// When the sequence is exhausted the last value repeats forever, so long
/// runs stay total; an empty script repeats `1.0 - f64::EPSILON` (a draw
/// that never triggers the slowdown branch).
pub struct ScriptedDraws {
    draws: Vec<f64>,
    next: usize,
}

impl ScriptedDraws {
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, next: 0 }
    }

    /// A source whose every draw fails the slowdown test (`p < 1` always).
    pub fn never_slow() -> Self {
        Self::new(vec![1.0 - f64::EPSILON])
    }

    /// A source whose every draw passes the slowdown test (for `p > 0`).
    pub fn always_slow() -> Self {
        Self::new(vec![0.0])
    }
}

impl DrawSource for ScriptedDraws {
    fn next_draw(&mut self) -> f64 {
        match self.draws.get(self.next) {
            Some(&d) => {
                if self.next + 1 < self.draws.len() {
                    self.next += 1;
                }
                d
            }
            None => 1.0 - f64::EPSILON,
        }
    }
}
