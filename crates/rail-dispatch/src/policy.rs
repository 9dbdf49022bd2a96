//! The `DispatchPolicy` trait and the order it produces.

use rail_core::{StationId, UnitId, UnitRng};

use crate::DispatchContext;

/// A decided dispatch: send `unit` toward `destination`.
///
/// Orders are pure decisions; the orchestrator applies them (deriving the
/// travel direction from the position delta) after the whole fleet has been
/// consulted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DispatchOrder {
    pub unit: UnitId,
    pub destination: StationId,
}

/// Pluggable dispatch behavior.
///
/// The orchestrator calls [`plan`][Self::plan] once per tick for every unit,
/// in ascending `UnitId` order, against a read-only [`DispatchContext`] and
/// the unit's own deterministic RNG — so decisions never depend on orders
/// applied earlier in the same tick.
///
/// Return `None` to leave the unit alone.  Orders for units that are not
/// anchored are ignored by the orchestrator.
pub trait DispatchPolicy: Send + Sync + 'static {
    fn plan(
        &self,
        unit: UnitId,
        ctx:  &DispatchContext<'_>,
        rng:  &mut UnitRng,
    ) -> Option<DispatchOrder>;
}
