//! Unit tests for fleet spawn and unit transitions.

use rail_core::{Direction, StationId, UnitId};
use rail_topology::{Corridor, Station};

use crate::{FleetStore, UnitRngs, UnitState, UnitStatus};

fn small_corridor() -> Corridor {
    Corridor::new(vec![
        Station::new("A", 0.0, 2),
        Station::new("B", 3_000.0, 1),
    ])
    .unwrap()
}

#[test]
fn spawn_one_unit_per_slot() {
    let fleet = FleetStore::spawn(&small_corridor());
    assert_eq!(fleet.len(), 3);

    // Station order, then slot order.
    assert_eq!(fleet.get(UnitId(0)).home_station, StationId(0));
    assert_eq!(fleet.get(UnitId(0)).home_slot, 1);
    assert_eq!(fleet.get(UnitId(1)).home_station, StationId(0));
    assert_eq!(fleet.get(UnitId(1)).home_slot, 2);
    assert_eq!(fleet.get(UnitId(2)).home_station, StationId(1));
    assert_eq!(fleet.get(UnitId(2)).position_m, 3_000.0);

    for id in fleet.unit_ids() {
        let u = fleet.get(id);
        assert_eq!(u.status, UnitStatus::Anchored);
        assert_eq!(u.speed_mps, 0.0);
        assert_eq!(u.direction, None);
        assert_eq!(u.destination, None);
        assert_eq!(u.group, None);
    }
}

#[test]
fn begin_run_derives_direction_once() {
    let mut u = UnitState::anchored_at(StationId(0), 0.0, 1);
    u.begin_run(StationId(1), 3_000.0);
    assert_eq!(u.status, UnitStatus::Moving);
    assert_eq!(u.direction, Some(Direction::Up));
    assert_eq!(u.destination, Some(StationId(1)));

    let mut d = UnitState::anchored_at(StationId(1), 3_000.0, 1);
    d.begin_run(StationId(0), 0.0);
    assert_eq!(d.direction, Some(Direction::Down));
}

#[test]
fn begin_run_to_current_position_is_noop() {
    let mut u = UnitState::anchored_at(StationId(0), 500.0, 1);
    u.begin_run(StationId(0), 500.0);
    assert_eq!(u.status, UnitStatus::Anchored);
    assert_eq!(u.destination, None);
}

#[test]
fn anchor_clears_run_state() {
    let mut u = UnitState::anchored_at(StationId(0), 0.0, 1);
    u.begin_run(StationId(1), 3_000.0);
    u.speed_mps = 12.0;
    u.position_m = 2_999.8;

    u.anchor(3_000.0);
    assert_eq!(u.position_m, 3_000.0);
    assert_eq!(u.speed_mps, 0.0);
    assert_eq!(u.direction, None);
    assert_eq!(u.destination, None);
    assert_eq!(u.status, UnitStatus::Anchored);
    assert!(u.is_halting());
}

#[test]
fn moving_units_filter() {
    let mut fleet = FleetStore::spawn(&small_corridor());
    fleet.get_mut(UnitId(1)).begin_run(StationId(1), 3_000.0);
    assert_eq!(fleet.moving_units(), vec![UnitId(1)]);
}

#[test]
fn rngs_sized_to_fleet() {
    let fleet = FleetStore::spawn(&small_corridor());
    let rngs = UnitRngs::new(fleet.len(), 42);
    assert_eq!(rngs.len(), 3);
}
