//! The `OccupancyBoard` — one occupant slot per segment.

use rail_core::{SegmentId, UnitId};
use rail_topology::Corridor;

/// Owns segment occupant assignment and arbitrates admission.
///
/// All decisions are synchronous within a single tick's commit phase: when
/// two units target the same segment in one tick, whichever commits first
/// wins [`try_enter`] and the other stalls.
pub struct OccupancyBoard {
    /// Occupant per segment, indexed by `SegmentId`.
    occupants: Vec<Option<UnitId>>,

    /// Segment span copies `(low_m, high_m)` for position lookup, sorted.
    spans: Vec<(f64, f64)>,
}

impl OccupancyBoard {
    /// An all-free board sized to the corridor's segment list.
    pub fn new(corridor: &Corridor) -> Self {
        Self {
            occupants: vec![None; corridor.segment_count()],
            spans: corridor
                .segments()
                .map(|seg| (seg.low_m, seg.high_m))
                .collect(),
        }
    }

    pub fn segment_count(&self) -> usize {
        self.occupants.len()
    }

    /// Current occupant of `segment`, if any.
    #[inline]
    pub fn occupant(&self, segment: SegmentId) -> Option<UnitId> {
        self.occupants[segment.index()]
    }

    /// Admit `unit` into `segment`.
    ///
    /// Succeeds (and records the occupant) iff the segment is free or already
    /// held by `unit`; fails without side effect otherwise.
    #[must_use]
    pub fn try_enter(&mut self, segment: SegmentId, unit: UnitId) -> bool {
        match self.occupants[segment.index()] {
            None => {
                self.occupants[segment.index()] = Some(unit);
                true
            }
            Some(holder) => holder == unit,
        }
    }

    /// Release `segment` iff it is held by `unit`.  Idempotent — releasing a
    /// free segment or one held by someone else is a no-op.
    pub fn release(&mut self, segment: SegmentId, unit: UnitId) {
        if self.occupants[segment.index()] == Some(unit) {
            self.occupants[segment.index()] = None;
        }
    }

    /// Release whichever segment `unit` currently holds.
    ///
    /// A unit holds at most one segment, so a single scan suffices.  Returns
    /// the released segment for event reporting.
    pub fn release_unit(&mut self, unit: UnitId) -> Option<SegmentId> {
        for (i, slot) in self.occupants.iter_mut().enumerate() {
            if *slot == Some(unit) {
                *slot = None;
                return Some(SegmentId(i as u32));
            }
        }
        None
    }

    /// The segment `unit` currently holds, if any.
    pub fn held_by(&self, unit: UnitId) -> Option<SegmentId> {
        self.occupants
            .iter()
            .position(|&slot| slot == Some(unit))
            .map(|i| SegmentId(i as u32))
    }

    /// The segment whose half-open `[low, high)` interval contains
    /// `position_m`, or `None` outside the corridor.
    pub fn locate(&self, position_m: f64) -> Option<SegmentId> {
        let (first_low, _) = *self.spans.first()?;
        let (_, last_high) = *self.spans.last()?;
        if position_m < first_low || position_m >= last_high {
            return None;
        }
        let i = self.spans.partition_point(|&(_, high)| high <= position_m);
        Some(SegmentId(i as u32))
    }

    /// Snapshot of every segment's occupant, indexed by segment.
    pub fn occupants(&self) -> &[Option<UnitId>] {
        &self.occupants
    }
}
