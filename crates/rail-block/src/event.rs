//! Occupancy transition events.

use rail_core::{SegmentId, UnitId};

/// What happened to a segment's occupant slot.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockEventKind {
    /// The unit became the segment's occupant.
    Enter,
    /// The unit released the segment.
    Exit,
}

/// One occupancy transition, emitted during the movement commit phase and
/// forwarded to observers.  Persisting these is an external logging concern;
/// the core only reports them.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockEvent {
    pub segment: SegmentId,
    pub unit: UnitId,
    pub kind: BlockEventKind,
}

impl BlockEvent {
    pub fn enter(segment: SegmentId, unit: UnitId) -> Self {
        Self { segment, unit, kind: BlockEventKind::Enter }
    }

    pub fn exit(segment: SegmentId, unit: UnitId) -> Self {
        Self { segment, unit, kind: BlockEventKind::Exit }
    }
}
