//! Fluent builder for constructing a [`Sim`].

use rail_block::OccupancyBoard;
use rail_core::SimConfig;
use rail_coupling::CouplingEngine;
use rail_dispatch::DispatchPolicy;
use rail_fleet::{FleetStore, UnitRngs};
use rail_motion::Integrator;
use rail_topology::Corridor;

use crate::{Sim, SimError, SimResult};

/// Builder for [`Sim<D>`].
///
/// Validates the configuration, spawns one anchored unit per station slot,
/// seeds the per-unit RNGs, and sizes the occupancy board to the corridor.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, corridor, RandomDispatch::new(0.3))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<D: DispatchPolicy> {
    config:   SimConfig,
    corridor: Corridor,
    policy:   D,
}

impl<D: DispatchPolicy> SimBuilder<D> {
    pub fn new(config: SimConfig, corridor: Corridor, policy: D) -> Self {
        Self { config, corridor, policy }
    }

    /// Validate the configuration and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<D>> {
        validate(&self.config)?;

        let fleet = FleetStore::spawn(&self.corridor);
        let rngs = UnitRngs::new(fleet.len(), self.config.seed);
        let board = OccupancyBoard::new(&self.corridor);
        let coupling = CouplingEngine::new(self.config.coupling.clone());
        let integrator = Integrator::new(self.config.kinematics.clone());

        Ok(Sim {
            clock: self.config.make_clock(),
            config: self.config,
            corridor: self.corridor,
            fleet,
            rngs,
            board,
            coupling,
            integrator,
            policy: self.policy,
        })
    }
}

fn validate(config: &SimConfig) -> SimResult<()> {
    if !config.dispatch_probability.is_finite()
        || !(0.0..=1.0).contains(&config.dispatch_probability)
    {
        return Err(SimError::Config(format!(
            "dispatch probability {} outside [0, 1]",
            config.dispatch_probability
        )));
    }
    if !config.tick_secs.is_finite() || config.tick_secs <= 0.0 {
        return Err(SimError::Config(format!(
            "tick step {} must be positive",
            config.tick_secs
        )));
    }

    let k = &config.kinematics;
    if k.max_accel_mps2 <= 0.0 || k.max_speed_mps <= 0.0 || k.arrival_tolerance_m <= 0.0 {
        return Err(SimError::Config(
            "kinematics bounds must all be positive".into(),
        ));
    }

    let c = &config.coupling;
    if !(c.approach_threshold_m > c.brake_threshold_m
        && c.brake_threshold_m > c.couple_threshold_m
        && c.couple_threshold_m > 0.0)
    {
        return Err(SimError::Config(format!(
            "coupling thresholds must be strictly ordered: approach {} > brake {} > couple {} > 0",
            c.approach_threshold_m, c.brake_threshold_m, c.couple_threshold_m
        )));
    }
    if c.approach_speed_mps <= 0.0 || c.approach_step_mps <= 0.0 || c.brake_speed_mps <= 0.0 {
        return Err(SimError::Config(
            "coupling speed set-points must all be positive".into(),
        ));
    }

    Ok(())
}
