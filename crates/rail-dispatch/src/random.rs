//! The stochastic baseline dispatcher.

use rail_core::{StationId, UnitId, UnitRng};

use crate::{DispatchContext, DispatchOrder, DispatchPolicy};

/// A station this close to the unit counts as "where it already is" and is
/// excluded from the destination draw.
const CURRENT_STATION_TOLERANCE_M: f64 = 1.0;

/// Dispatches each anchored unit with a fixed per-tick probability toward a
/// uniformly chosen other station.
///
/// Moving units are never re-dispatched; a single-station corridor produces
/// no orders at all.
pub struct RandomDispatch {
    /// Per-tick dispatch probability, in `[0, 1]`.
    pub probability: f64,
}

impl RandomDispatch {
    pub fn new(probability: f64) -> Self {
        Self { probability }
    }
}

impl DispatchPolicy for RandomDispatch {
    fn plan(
        &self,
        unit: UnitId,
        ctx:  &DispatchContext<'_>,
        rng:  &mut UnitRng,
    ) -> Option<DispatchOrder> {
        let state = ctx.fleet.get(unit);
        if !state.is_anchored() {
            return None;
        }
        if !rng.gen_bool(self.probability) {
            return None;
        }

        let here = state.position_m;
        let candidates: Vec<StationId> = ctx
            .corridor
            .stations()
            .filter(|(_, s)| (s.position_m - here).abs() >= CURRENT_STATION_TOLERANCE_M)
            .map(|(id, _)| id)
            .collect();

        rng.choose(&candidates)
            .map(|&destination| DispatchOrder { unit, destination })
    }
}
