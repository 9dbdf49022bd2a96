//! `rail-motion` — the kinematics integrator.
//!
//! Advances every moving unit once per tick under bounded random
//! acceleration, consulting the occupancy board before any segment-boundary
//! crossing.  An admission failure stalls the unit at the boundary with zero
//! speed — the corridor's back-pressure mechanism; it simply re-tries next
//! tick.
//!
//! Runs in two phases matching the rest of the workspace: `plan` samples
//! accelerations read-only, `advance` commits movement in ascending `UnitId`
//! order so same-tick admission races resolve deterministically.

pub mod integrator;

#[cfg(test)]
mod tests;

pub use integrator::Integrator;
