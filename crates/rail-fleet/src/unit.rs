//! Per-unit state record.

use rail_core::{Direction, GroupId, StationId};

/// Whether a unit is parked at a station or running on the line.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitStatus {
    /// Stationary at a station, available for dispatch.
    Anchored,
    /// En route to `destination`.
    Moving,
}

/// The full state of one unit.
///
/// Transition invariants, maintained by [`begin_run`][UnitState::begin_run]
/// and [`anchor`][UnitState::anchor]:
///
/// - `Anchored` ⇒ `speed_mps == 0`, `direction == None`, `destination == None`
/// - `Moving`   ⇒ `destination.is_some()` and `direction` was derived from the
///   position delta once at dispatch; it is never re-derived mid-transit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitState {
    /// Distance from the corridor origin, m.
    pub position_m: f64,

    /// Current speed, m/s.  Always in `[0, max_speed]`.
    pub speed_mps: f64,

    /// Travel sense while moving; `None` while anchored.
    pub direction: Option<Direction>,

    pub status: UnitStatus,

    /// Destination station while moving; `None` while anchored.
    pub destination: Option<StationId>,

    /// Station the unit was spawned at.
    pub home_station: StationId,

    /// 1-based anchoring slot at `home_station`.
    pub home_slot: u32,

    /// Coupling group membership, owned by the coupling engine's `GroupSet`.
    pub group: Option<GroupId>,
}

impl UnitState {
    /// An anchored unit parked at `position_m` in `slot` of `station`.
    pub fn anchored_at(station: StationId, position_m: f64, slot: u32) -> Self {
        Self {
            position_m,
            speed_mps:    0.0,
            direction:    None,
            status:       UnitStatus::Anchored,
            destination:  None,
            home_station: station,
            home_slot:    slot,
            group:        None,
        }
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.status == UnitStatus::Moving
    }

    #[inline]
    pub fn is_anchored(&self) -> bool {
        self.status == UnitStatus::Anchored
    }

    /// `true` when the unit has halted or lost its destination — the
    /// condition that splits a coupling group behind it.
    #[inline]
    pub fn is_halting(&self) -> bool {
        self.status == UnitStatus::Anchored || self.destination.is_none()
    }

    /// Dispatch: set the destination and derive the direction from the
    /// position delta, once.
    ///
    /// No-op if the destination is at the current position (nowhere to go).
    pub fn begin_run(&mut self, destination: StationId, destination_m: f64) {
        let Some(direction) = Direction::of_travel(self.position_m, destination_m) else {
            return;
        };
        self.destination = Some(destination);
        self.direction = Some(direction);
        self.status = UnitStatus::Moving;
    }

    /// Arrival: snap onto the destination position and clear all run state.
    pub fn anchor(&mut self, at_position_m: f64) {
        self.position_m = at_position_m;
        self.speed_mps = 0.0;
        self.direction = None;
        self.destination = None;
        self.status = UnitStatus::Anchored;
    }
}
