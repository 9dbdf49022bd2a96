//! Unit tests for the motion integrator.

use rail_block::{BlockEvent, OccupancyBoard};
use rail_core::{KinematicsProfile, SegmentId, StationId, UnitId};
use rail_coupling::GroupSet;
use rail_fleet::{FleetStore, UnitRngs, UnitStatus};
use rail_topology::{Corridor, Station};

use crate::Integrator;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A(0) — seg 0 — B(5 000) — seg 1 — C(12 000), one slot each.
fn corridor() -> Corridor {
    Corridor::new(vec![
        Station::new("A", 0.0, 1),
        Station::new("B", 5_000.0, 1),
        Station::new("C", 12_000.0, 1),
    ])
    .unwrap()
}

fn integrator() -> Integrator {
    Integrator::new(KinematicsProfile::default())
}

fn dispatch(fleet: &mut FleetStore, corridor: &Corridor, unit: u32, dest: u32) {
    let dest_m = corridor.station(StationId(dest)).position_m;
    fleet.get_mut(UnitId(unit)).begin_run(StationId(dest), dest_m);
}

/// `advance` with every unit's acceleration pinned, no groups.
fn step(
    fleet: &mut FleetStore,
    corridor: &Corridor,
    board: &mut OccupancyBoard,
    accels: Vec<f64>,
) -> Vec<BlockEvent> {
    let groups = GroupSet::new();
    integrator().advance(fleet, corridor, board, &groups, &accels, 1.0)
}

// ── plan ──────────────────────────────────────────────────────────────────────

#[test]
fn plan_samples_only_for_moving_non_followers() {
    let corridor = corridor();
    let mut fleet = FleetStore::spawn(&corridor);
    let mut rngs = UnitRngs::new(fleet.len(), 42);
    let groups = GroupSet::new();

    // Everything anchored: no draws at all.
    let accels = integrator().plan(&fleet, &groups, &mut rngs);
    assert_eq!(accels, vec![0.0; 3]);

    dispatch(&mut fleet, &corridor, 0, 2);
    let accels = integrator().plan(&fleet, &groups, &mut rngs);
    assert!((0.0..=1.0).contains(&accels[0]));
    assert_eq!(&accels[1..], &[0.0, 0.0]);
}

#[test]
fn plan_skips_followers() {
    let corridor = corridor();
    let mut fleet = FleetStore::spawn(&corridor);
    let mut rngs = UnitRngs::new(fleet.len(), 42);
    let mut groups = GroupSet::new();

    // Units 0 and 1 coupled at the same spot heading up; the tie-break makes
    // unit 0 the leader.
    dispatch(&mut fleet, &corridor, 0, 2);
    dispatch(&mut fleet, &corridor, 1, 2);
    fleet.get_mut(UnitId(1)).position_m = 1_000.0;
    fleet.get_mut(UnitId(0)).position_m = 1_000.0;
    groups.create(vec![UnitId(0), UnitId(1)], &mut fleet);

    let accels = integrator().plan(&fleet, &groups, &mut rngs);
    assert!((0.0..=1.0).contains(&accels[0]));
    assert_eq!(accels[1], 0.0);
}

// ── Kinematics ────────────────────────────────────────────────────────────────

#[test]
fn departure_claims_first_segment() {
    let corridor = corridor();
    let mut fleet = FleetStore::spawn(&corridor);
    let mut board = OccupancyBoard::new(&corridor);
    dispatch(&mut fleet, &corridor, 0, 1);

    let events = step(&mut fleet, &corridor, &mut board, vec![1.0, 0.0, 0.0]);

    let u = fleet.get(UnitId(0));
    assert_eq!(u.speed_mps, 1.0);
    assert_eq!(u.position_m, 1.0);
    assert_eq!(board.occupant(SegmentId(0)), Some(UnitId(0)));
    assert_eq!(events, vec![BlockEvent::enter(SegmentId(0), UnitId(0))]);
}

#[test]
fn speed_clamped_to_ceiling() {
    let corridor = corridor();
    let mut fleet = FleetStore::spawn(&corridor);
    let mut board = OccupancyBoard::new(&corridor);
    dispatch(&mut fleet, &corridor, 0, 2);
    fleet.get_mut(UnitId(0)).position_m = 100.0;
    fleet.get_mut(UnitId(0)).speed_mps = 27.78;

    step(&mut fleet, &corridor, &mut board, vec![1.0, 0.0, 0.0]);

    let u = fleet.get(UnitId(0));
    assert_eq!(u.speed_mps, 27.78);
    assert!((u.position_m - 127.78).abs() < 1e-9);
}

#[test]
fn speed_never_goes_negative() {
    let corridor = corridor();
    let mut fleet = FleetStore::spawn(&corridor);
    let mut board = OccupancyBoard::new(&corridor);
    dispatch(&mut fleet, &corridor, 0, 2);
    fleet.get_mut(UnitId(0)).position_m = 100.0;
    fleet.get_mut(UnitId(0)).speed_mps = 0.3;

    step(&mut fleet, &corridor, &mut board, vec![-1.0, 0.0, 0.0]);

    let u = fleet.get(UnitId(0));
    assert_eq!(u.speed_mps, 0.0);
    assert_eq!(u.position_m, 100.0);
    assert_eq!(u.status, UnitStatus::Moving); // stopped, not arrived
}

// ── Block admission ───────────────────────────────────────────────────────────

#[test]
fn stalls_when_current_segment_is_taken() {
    let corridor = corridor();
    let mut fleet = FleetStore::spawn(&corridor);
    let mut board = OccupancyBoard::new(&corridor);
    assert!(board.try_enter(SegmentId(0), UnitId(9)));
    dispatch(&mut fleet, &corridor, 0, 1);
    fleet.get_mut(UnitId(0)).speed_mps = 5.0;

    let events = step(&mut fleet, &corridor, &mut board, vec![1.0, 0.0, 0.0]);

    let u = fleet.get(UnitId(0));
    assert_eq!(u.speed_mps, 0.0);
    assert_eq!(u.position_m, 0.0);
    assert!(events.is_empty());
    assert_eq!(board.occupant(SegmentId(0)), Some(UnitId(9)));
}

#[test]
fn stalls_on_boundary_then_resumes_when_freed() {
    let corridor = corridor();
    let mut fleet = FleetStore::spawn(&corridor);
    let mut board = OccupancyBoard::new(&corridor);
    assert!(board.try_enter(SegmentId(1), UnitId(9)));
    dispatch(&mut fleet, &corridor, 0, 2);
    fleet.get_mut(UnitId(0)).position_m = 4_990.0;
    fleet.get_mut(UnitId(0)).speed_mps = 27.78;

    // Next block held: pinned on the boundary at zero speed, still holding
    // the block behind it.
    step(&mut fleet, &corridor, &mut board, vec![0.0, 0.0, 0.0]);
    let u = fleet.get(UnitId(0));
    assert_eq!(u.position_m, 5_000.0);
    assert_eq!(u.speed_mps, 0.0);
    assert_eq!(board.occupant(SegmentId(0)), Some(UnitId(0)));

    // Freed: re-admitted on the retry, hand-over of the held block.
    board.release(SegmentId(1), UnitId(9));
    let events = step(&mut fleet, &corridor, &mut board, vec![1.0, 0.0, 0.0]);
    assert_eq!(
        events,
        vec![
            BlockEvent::enter(SegmentId(1), UnitId(0)),
            BlockEvent::exit(SegmentId(0), UnitId(0)),
        ]
    );
    let u = fleet.get(UnitId(0));
    assert_eq!(u.position_m, 5_001.0);
    assert_eq!(u.speed_mps, 1.0);
    assert_eq!(board.occupant(SegmentId(0)), None);
}

#[test]
fn crossing_hands_over_segments() {
    let corridor = corridor();
    let mut fleet = FleetStore::spawn(&corridor);
    let mut board = OccupancyBoard::new(&corridor);
    dispatch(&mut fleet, &corridor, 0, 2);
    fleet.get_mut(UnitId(0)).position_m = 4_990.0;
    fleet.get_mut(UnitId(0)).speed_mps = 27.78;
    assert!(board.try_enter(SegmentId(0), UnitId(0)));

    let events = step(&mut fleet, &corridor, &mut board, vec![0.0, 0.0, 0.0]);

    assert!((fleet.get(UnitId(0)).position_m - 5_017.78).abs() < 1e-9);
    assert_eq!(board.occupant(SegmentId(0)), None);
    assert_eq!(board.occupant(SegmentId(1)), Some(UnitId(0)));
    assert_eq!(
        events,
        vec![
            BlockEvent::enter(SegmentId(1), UnitId(0)),
            BlockEvent::exit(SegmentId(0), UnitId(0)),
        ]
    );
}

#[test]
fn same_tick_race_resolves_by_unit_id() {
    let corridor = corridor();
    let mut fleet = FleetStore::spawn(&corridor);
    let mut board = OccupancyBoard::new(&corridor);
    // Unit 0 crosses up into segment 1 this tick; unit 1 sits inside segment
    // 1 heading down and wants it too.
    dispatch(&mut fleet, &corridor, 0, 2);
    fleet.get_mut(UnitId(0)).position_m = 4_990.0;
    fleet.get_mut(UnitId(0)).speed_mps = 27.78;
    assert!(board.try_enter(SegmentId(0), UnitId(0)));
    dispatch(&mut fleet, &corridor, 1, 0);
    fleet.get_mut(UnitId(1)).position_m = 5_010.0;
    fleet.get_mut(UnitId(1)).speed_mps = 5.0;

    step(&mut fleet, &corridor, &mut board, vec![0.0, 0.0, 0.0]);

    // Lower ID committed first and won the block; the other stalled in place.
    assert_eq!(board.occupant(SegmentId(1)), Some(UnitId(0)));
    let loser = fleet.get(UnitId(1));
    assert_eq!(loser.speed_mps, 0.0);
    assert_eq!(loser.position_m, 5_010.0);
}

// ── Arrival ───────────────────────────────────────────────────────────────────

#[test]
fn arrival_snaps_anchors_and_releases() {
    let corridor = corridor();
    let mut fleet = FleetStore::spawn(&corridor);
    let mut board = OccupancyBoard::new(&corridor);
    dispatch(&mut fleet, &corridor, 0, 1);
    fleet.get_mut(UnitId(0)).position_m = 4_999.8;
    fleet.get_mut(UnitId(0)).speed_mps = 0.5;
    assert!(board.try_enter(SegmentId(0), UnitId(0)));

    let events = step(&mut fleet, &corridor, &mut board, vec![0.0, 0.0, 0.0]);

    let u = fleet.get(UnitId(0));
    assert_eq!(u.status, UnitStatus::Anchored);
    assert_eq!(u.position_m, 5_000.0);
    assert_eq!(u.speed_mps, 0.0);
    assert_eq!(u.direction, None);
    assert_eq!(u.destination, None);
    assert_eq!(board.occupant(SegmentId(0)), None);
    assert_eq!(events, vec![BlockEvent::exit(SegmentId(0), UnitId(0))]);
}

#[test]
fn anchored_unit_is_inert() {
    let corridor = corridor();
    let mut fleet = FleetStore::spawn(&corridor);
    let mut board = OccupancyBoard::new(&corridor);

    let before = fleet.get(UnitId(0)).clone();
    let events = step(&mut fleet, &corridor, &mut board, vec![1.0, 1.0, 1.0]);

    assert!(events.is_empty());
    assert_eq!(fleet.get(UnitId(0)), &before);
}

// ── Down-line travel ──────────────────────────────────────────────────────────

#[test]
fn down_run_enters_corridor_with_admission() {
    let corridor = corridor();
    let mut fleet = FleetStore::spawn(&corridor);
    let mut board = OccupancyBoard::new(&corridor);
    // Unit 2 starts at C = 12 000, the top end of the segmented span.
    dispatch(&mut fleet, &corridor, 2, 1);

    let events = step(&mut fleet, &corridor, &mut board, vec![0.0, 0.0, 1.0]);

    let u = fleet.get(UnitId(2));
    assert_eq!(u.position_m, 11_999.0);
    assert_eq!(u.speed_mps, 1.0);
    assert_eq!(board.occupant(SegmentId(1)), Some(UnitId(2)));
    assert_eq!(events, vec![BlockEvent::enter(SegmentId(1), UnitId(2))]);
}

#[test]
fn down_entry_blocked_at_the_top() {
    let corridor = corridor();
    let mut fleet = FleetStore::spawn(&corridor);
    let mut board = OccupancyBoard::new(&corridor);
    assert!(board.try_enter(SegmentId(1), UnitId(9)));
    dispatch(&mut fleet, &corridor, 2, 1);

    let events = step(&mut fleet, &corridor, &mut board, vec![0.0, 0.0, 1.0]);

    let u = fleet.get(UnitId(2));
    assert_eq!(u.position_m, 12_000.0);
    assert_eq!(u.speed_mps, 0.0);
    assert!(events.is_empty());
}

#[test]
fn down_crossing_hands_over_segments() {
    let corridor = corridor();
    let mut fleet = FleetStore::spawn(&corridor);
    let mut board = OccupancyBoard::new(&corridor);
    dispatch(&mut fleet, &corridor, 2, 0);
    fleet.get_mut(UnitId(2)).position_m = 5_003.0;
    fleet.get_mut(UnitId(2)).speed_mps = 27.78;
    assert!(board.try_enter(SegmentId(1), UnitId(2)));

    let events = step(&mut fleet, &corridor, &mut board, vec![0.0, 0.0, 0.0]);

    assert!((fleet.get(UnitId(2)).position_m - 4_975.22).abs() < 1e-9);
    assert_eq!(board.occupant(SegmentId(1)), None);
    assert_eq!(board.occupant(SegmentId(0)), Some(UnitId(2)));
    assert_eq!(
        events,
        vec![
            BlockEvent::enter(SegmentId(0), UnitId(2)),
            BlockEvent::exit(SegmentId(1), UnitId(2)),
        ]
    );
}

// ── Grouped motion ────────────────────────────────────────────────────────────

#[test]
fn followers_mirror_the_leader() {
    let corridor = corridor();
    let mut fleet = FleetStore::spawn(&corridor);
    let mut board = OccupancyBoard::new(&corridor);
    let mut groups = GroupSet::new();
    dispatch(&mut fleet, &corridor, 0, 2);
    dispatch(&mut fleet, &corridor, 1, 2);
    for u in [0, 1] {
        let s = fleet.get_mut(UnitId(u));
        s.position_m = 1_000.0;
        s.speed_mps = 2.0;
    }
    groups.create(vec![UnitId(0), UnitId(1)], &mut fleet);

    let accels = vec![1.0, 0.0, 0.0];
    integrator().advance(&mut fleet, &corridor, &mut board, &groups, &accels, 1.0);

    // Leader integrated; follower carries identical motion and holds no
    // occupancy of its own.
    assert_eq!(fleet.get(UnitId(0)).position_m, 1_003.0);
    assert_eq!(fleet.get(UnitId(1)).position_m, 1_003.0);
    assert_eq!(fleet.get(UnitId(1)).speed_mps, 3.0);
    assert_eq!(board.held_by(UnitId(1)), None);
    assert_eq!(board.held_by(UnitId(0)), Some(SegmentId(0)));
}

#[test]
fn follower_anchors_at_its_own_destination() {
    let corridor = corridor();
    let mut fleet = FleetStore::spawn(&corridor);
    let mut board = OccupancyBoard::new(&corridor);
    let mut groups = GroupSet::new();
    // Both coupled at 4 999; the leader rides through B, the follower's
    // destination is B itself.
    dispatch(&mut fleet, &corridor, 0, 2);
    dispatch(&mut fleet, &corridor, 1, 1);
    for u in [0, 1] {
        let s = fleet.get_mut(UnitId(u));
        s.position_m = 4_999.0;
        s.speed_mps = 1.2;
    }
    groups.create(vec![UnitId(0), UnitId(1)], &mut fleet);

    let accels = vec![0.0, 0.0, 0.0];
    integrator().advance(&mut fleet, &corridor, &mut board, &groups, &accels, 1.0);

    // Leader crossed into segment 1 and keeps going; the follower landed
    // within tolerance of B and anchored there.
    let leader = fleet.get(UnitId(0));
    assert_eq!(leader.status, UnitStatus::Moving);
    assert!((leader.position_m - 5_000.2).abs() < 1e-9);
    let follower = fleet.get(UnitId(1));
    assert_eq!(follower.status, UnitStatus::Anchored);
    assert_eq!(follower.position_m, 5_000.0);
    assert_eq!(follower.speed_mps, 0.0);
    // Membership is untouched here; the halt splits the group at the next
    // decoupling pass.
    assert!(follower.group.is_some());
}

#[test]
fn destination_clamp_prevents_overshoot() {
    let corridor = corridor();
    let mut fleet = FleetStore::spawn(&corridor);
    let mut board = OccupancyBoard::new(&corridor);
    dispatch(&mut fleet, &corridor, 0, 1);
    fleet.get_mut(UnitId(0)).position_m = 4_995.0;
    fleet.get_mut(UnitId(0)).speed_mps = 27.78;
    assert!(board.try_enter(SegmentId(0), UnitId(0)));

    step(&mut fleet, &corridor, &mut board, vec![0.0, 0.0, 0.0]);

    // 27.78 m of travel would overshoot B by 22 m; the clamp turns it into
    // an exact arrival.
    let u = fleet.get(UnitId(0));
    assert_eq!(u.status, UnitStatus::Anchored);
    assert_eq!(u.position_m, 5_000.0);
}
