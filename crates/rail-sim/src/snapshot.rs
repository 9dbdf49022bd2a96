//! The per-tick external view of the world.

use rail_core::{GroupId, SegmentId, StationId, Tick, UnitId};
use rail_fleet::UnitStatus;

/// One unit's externally visible state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitRow {
    pub unit:        UnitId,
    pub position_m:  f64,
    pub speed_mps:   f64,
    pub status:      UnitStatus,
    pub destination: Option<StationId>,
    pub group:       Option<GroupId>,
}

/// One segment's occupant slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentRow {
    pub segment:  SegmentId,
    pub occupant: Option<UnitId>,
}

/// One coupling group: ordered members plus the current leader.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupRow {
    pub group:   GroupId,
    pub members: Vec<UnitId>,
    pub leader:  UnitId,
}

/// Everything an external display or logger needs about one tick, decoupled
/// from the simulation's internal stores.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimSnapshot {
    pub tick:     Tick,
    pub units:    Vec<UnitRow>,
    pub segments: Vec<SegmentRow>,
    pub groups:   Vec<GroupRow>,
}
