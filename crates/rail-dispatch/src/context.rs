//! Read-only world state passed to every dispatch callback.

use rail_core::Tick;
use rail_fleet::FleetStore;
use rail_topology::Corridor;

/// A read-only view of the simulation state for one tick's dispatch phase.
///
/// Built once per tick by the orchestrator and shared across all per-unit
/// policy calls, so a policy can never observe a half-applied tick.
pub struct DispatchContext<'a> {
    /// Current simulation tick.
    pub tick: Tick,

    /// The corridor topology.
    pub corridor: &'a Corridor,

    /// Every unit's state, read-only.
    pub fleet: &'a FleetStore,
}

impl<'a> DispatchContext<'a> {
    #[inline]
    pub fn new(tick: Tick, corridor: &'a Corridor, fleet: &'a FleetStore) -> Self {
        Self { tick, corridor, fleet }
    }
}
