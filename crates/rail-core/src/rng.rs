//! Deterministic per-unit and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each unit gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (unit_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive unit IDs uniformly across the seed space.
//! Units never share RNG state, so decision-phase sampling has no ordering
//! dependency and runs are reproducible for a given seed and fleet size.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::UnitId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── UnitRng ───────────────────────────────────────────────────────────────────

/// Per-unit deterministic RNG.
///
/// Create one per unit at fleet spawn; store in a parallel `Vec<UnitRng>`
/// alongside the fleet state.  The dispatcher draws the dispatch coin and the
/// destination choice from it; the integrator draws acceleration samples.
pub struct UnitRng(SmallRng);

impl UnitRng {
    /// Seed deterministically from the run's global seed and a unit ID.
    pub fn new(global_seed: u64, unit: UnitId) -> Self {
        let seed = global_seed ^ (unit.0 as u64).wrapping_mul(MIXING_CONSTANT);
        UnitRng(SmallRng::seed_from_u64(seed))
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

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations (scenario setup, exogenous
/// events).  Used only in single-threaded contexts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
