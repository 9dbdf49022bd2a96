//! Run configuration and the physical/coupling constant profiles.
//!
//! All distances are metres, speeds m/s, accelerations m/s².  The defaults
//! are the corridor's operating envelope: 100 km/h cruise, ±1 m/s² traction,
//! and the three-ring coupling thresholds (270 m approach, 10 m brake, 1 m
//! couple).

// ── KinematicsProfile ─────────────────────────────────────────────────────────

/// Bounds and tolerances for the per-tick motion integrator.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KinematicsProfile {
    /// Maximum acceleration magnitude per tick, m/s².
    pub max_accel_mps2: f64,
    /// Speed ceiling, m/s.  27.78 m/s = 100 km/h.
    pub max_speed_mps: f64,
    /// A unit within this distance of its destination snaps onto it and
    /// anchors, m.
    pub arrival_tolerance_m: f64,
}

impl Default for KinematicsProfile {
    fn default() -> Self {
        Self {
            max_accel_mps2:      1.0,
            max_speed_mps:       27.78,
            arrival_tolerance_m: 0.5,
        }
    }
}

// ── CouplingProfile ───────────────────────────────────────────────────────────

/// Distance thresholds and speed set-points for the coupling state machine.
///
/// Invariant (checked by the sim builder):
/// `approach_threshold_m > brake_threshold_m > couple_threshold_m > 0`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CouplingProfile {
    /// Pairs further apart than this do not interact, m.
    pub approach_threshold_m: f64,
    /// Inside this ring the trailing unit's speed is capped, m.
    pub brake_threshold_m: f64,
    /// Inside this ring the pair couples, m.
    pub couple_threshold_m: f64,
    /// Speed the trailing unit is nudged toward while approaching, m/s.
    pub approach_speed_mps: f64,
    /// Per-tick nudge increment toward `approach_speed_mps`, m/s.
    pub approach_step_mps: f64,
    /// Speed cap inside the brake ring, m/s.
    pub brake_speed_mps: f64,
}

impl Default for CouplingProfile {
    fn default() -> Self {
        Self {
            approach_threshold_m: 270.0,
            brake_threshold_m:    10.0,
            couple_threshold_m:   1.0,
            approach_speed_mps:   2.7,
            approach_step_mps:    0.5,
            brake_speed_mps:      0.5,
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically assembled by the application crate (possibly from a config file)
/// and handed to `SimBuilder`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Simulated seconds per tick (Δt).  Default: 1.0.
    pub tick_secs: f64,

    /// Per-tick probability that an anchored unit is dispatched.
    pub dispatch_probability: f64,

    /// Emit a state snapshot every N ticks.  1 = every tick; 0 = never.
    pub output_interval_ticks: u64,

    /// Motion integrator bounds.
    pub kinematics: KinematicsProfile,

    /// Coupling state-machine thresholds.
    pub coupling: CouplingProfile,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_ticks:           3_600,
            seed:                  0,
            tick_secs:             1.0,
            dispatch_probability:  0.3,
            output_interval_ticks: 1,
            kinematics:            KinematicsProfile::default(),
            coupling:              CouplingProfile::default(),
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> crate::Tick {
        crate::Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> crate::SimClock {
        crate::SimClock::new(self.tick_secs)
    }
}
