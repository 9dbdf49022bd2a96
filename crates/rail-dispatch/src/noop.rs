//! A policy that never dispatches anything.

use rail_core::{UnitId, UnitRng};

use crate::{DispatchContext, DispatchOrder, DispatchPolicy};

/// Never issues an order.  Useful for tests and passive runs where traffic
/// is injected by hand.
pub struct NoopDispatch;

impl DispatchPolicy for NoopDispatch {
    fn plan(
        &self,
        _unit: UnitId,
        _ctx:  &DispatchContext<'_>,
        _rng:  &mut UnitRng,
    ) -> Option<DispatchOrder> {
        None
    }
}
