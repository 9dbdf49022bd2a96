//! `rail-fleet` — the mutable collection of units.
//!
//! Units are created once at fleet spawn (one per station anchoring slot) and
//! never leave the simulation.  All other crates address them by `UnitId`,
//! which indexes directly into [`FleetStore::states`].

pub mod store;
pub mod unit;

#[cfg(test)]
mod tests;

pub use store::{FleetStore, UnitRngs};
pub use unit::{UnitState, UnitStatus};
