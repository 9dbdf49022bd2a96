//! Movement integration: acceleration sampling, segment admission, and
//! arrival handling.

use rail_block::{BlockEvent, OccupancyBoard};
use rail_core::{Direction, KinematicsProfile, SegmentId, UnitId};
use rail_coupling::GroupSet;
use rail_fleet::{FleetStore, UnitRngs};
use rail_topology::Corridor;

/// Advances the fleet one tick under the kinematics profile.
///
/// Only group leaders and ungrouped units integrate their own motion;
/// grouped followers mirror their leader afterwards so a coupled train moves
/// as one body.
pub struct Integrator {
    pub profile: KinematicsProfile,
}

impl Integrator {
    pub fn new(profile: KinematicsProfile) -> Self {
        Self { profile }
    }

    /// Decision phase: sample one acceleration per unit, indexed by `UnitId`.
    ///
    /// Accelerations are magnitudes toward the destination: a uniform draw
    /// from `[0, max_accel]` for every moving non-follower; anchored units
    /// and followers get `0.0`.  Each unit draws from its own RNG, so the
    /// sample stream is independent of fleet iteration order.
    pub fn plan(&self, fleet: &FleetStore, groups: &GroupSet, rngs: &mut UnitRngs) -> Vec<f64> {
        let max = self.profile.max_accel_mps2;
        fleet
            .unit_ids()
            .map(|unit| {
                let state = fleet.get(unit);
                if !state.is_moving() || groups.is_follower(unit, fleet) {
                    0.0
                } else {
                    rngs.get_mut(unit).gen_range(0.0..=max)
                }
            })
            .collect()
    }

    /// Commit phase: move every unit by its planned acceleration.
    ///
    /// Leaders and ungrouped units step in ascending `UnitId` order — the
    /// deterministic tie-break when two units contend for the same segment in
    /// one tick.  Followers then mirror their leader's position and speed,
    /// and anchor independently if that lands them at their own destination.
    ///
    /// Returns occupancy events in the order they occurred.
    pub fn advance(
        &self,
        fleet: &mut FleetStore,
        corridor: &Corridor,
        board: &mut OccupancyBoard,
        groups: &GroupSet,
        accels: &[f64],
        dt_secs: f64,
    ) -> Vec<BlockEvent> {
        debug_assert_eq!(accels.len(), fleet.len());
        let mut events = Vec::new();

        for unit in (0..fleet.len() as u32).map(UnitId) {
            if !fleet.get(unit).is_moving() || groups.is_follower(unit, fleet) {
                continue;
            }
            self.step_unit(
                unit,
                fleet,
                corridor,
                board,
                accels[unit.index()],
                dt_secs,
                &mut events,
            );
        }

        self.mirror_followers(fleet, corridor, board, groups, &mut events);
        events
    }

    /// Integrate one leader or ungrouped unit.
    #[allow(clippy::too_many_arguments)]
    fn step_unit(
        &self,
        unit: UnitId,
        fleet: &mut FleetStore,
        corridor: &Corridor,
        board: &mut OccupancyBoard,
        accel: f64,
        dt_secs: f64,
        events: &mut Vec<BlockEvent>,
    ) {
        let state = fleet.get(unit);
        let (Some(direction), Some(dest)) = (state.direction, state.destination) else {
            return;
        };
        let pos = state.position_m;
        let dest_m = corridor.station(dest).position_m;
        let tol = self.profile.arrival_tolerance_m;

        // Admission for the segment containing the current position.  This
        // covers departure into the first segment of a run and the retry
        // after a stall on a boundary.  Failure pins the unit in place.
        let current = board.locate(pos);
        if let Some(seg) = current {
            let held = board.held_by(unit);
            if board.try_enter(seg, unit) {
                if held != Some(seg) {
                    events.push(BlockEvent::enter(seg, unit));
                    if let Some(prev) = held {
                        board.release(prev, unit);
                        events.push(BlockEvent::exit(prev, unit));
                    }
                }
            } else {
                fleet.get_mut(unit).speed_mps = 0.0;
                return;
            }
        }

        // Bounded acceleration, clamped speed, move clamped at the
        // destination so a fast unit never overshoots its station.
        let mut speed =
            (state.speed_mps + accel * dt_secs).clamp(0.0, self.profile.max_speed_mps);
        let mut new_pos = match direction {
            Direction::Up => (pos + speed * dt_secs).min(dest_m),
            Direction::Down => (pos - speed * dt_secs).max(dest_m),
        };

        match current {
            Some(seg_id) => {
                let span = corridor.segment(seg_id);
                let boundary = span.far_boundary(direction);
                let crossing = match direction {
                    Direction::Up => new_pos >= boundary,
                    Direction::Down => new_pos < boundary,
                };
                // A crossing into the destination station itself is an
                // arrival, not an admission into the next block.
                if crossing && (boundary - dest_m).abs() >= tol {
                    let next = match direction {
                        Direction::Up => {
                            let i = seg_id.index() + 1;
                            (i < corridor.segment_count()).then(|| SegmentId(i as u32))
                        }
                        Direction::Down => seg_id
                            .index()
                            .checked_sub(1)
                            .map(|i| SegmentId(i as u32)),
                    };
                    match next {
                        Some(next) if board.try_enter(next, unit) => {
                            events.push(BlockEvent::enter(next, unit));
                            board.release(seg_id, unit);
                            events.push(BlockEvent::exit(seg_id, unit));
                        }
                        Some(_) => {
                            // Next block occupied: stall on the boundary.
                            new_pos = boundary;
                            speed = 0.0;
                        }
                        None => {
                            // End of the corridor; clamp.
                            new_pos = boundary;
                        }
                    }
                }
            }
            None => {
                // Off the segmented span (a unit parked at the top-end
                // station heading down).  Entering the corridor is still a
                // crossing and needs admission.
                if let Some(target) = board.locate(new_pos) {
                    if board.try_enter(target, unit) {
                        events.push(BlockEvent::enter(target, unit));
                    } else {
                        new_pos = pos;
                        speed = 0.0;
                    }
                }
            }
        }

        if (new_pos - dest_m).abs() < tol {
            fleet.get_mut(unit).anchor(dest_m);
            if let Some(seg) = board.release_unit(unit) {
                events.push(BlockEvent::exit(seg, unit));
            }
        } else {
            let state = fleet.get_mut(unit);
            state.position_m = new_pos;
            state.speed_mps = speed;
        }
    }

    /// Snap every moving follower onto its group leader, then run each
    /// follower's own arrival check — a follower whose destination is closer
    /// than the leader's anchors mid-ride, and the halt splits the group at
    /// the next decoupling pass.
    fn mirror_followers(
        &self,
        fleet: &mut FleetStore,
        corridor: &Corridor,
        board: &mut OccupancyBoard,
        groups: &GroupSet,
        events: &mut Vec<BlockEvent>,
    ) {
        let tol = self.profile.arrival_tolerance_m;
        for (gid, members) in groups.iter() {
            let Some(leader) = groups.leader(gid, fleet) else {
                continue;
            };
            let (lead_pos, lead_speed) = {
                let l = fleet.get(leader);
                (l.position_m, l.speed_mps)
            };
            for &member in members {
                if member == leader || !fleet.get(member).is_moving() {
                    continue;
                }
                let state = fleet.get_mut(member);
                state.position_m = lead_pos;
                state.speed_mps = lead_speed;

                if let Some(dest) = state.destination {
                    let dest_m = corridor.station(dest).position_m;
                    if (lead_pos - dest_m).abs() < tol {
                        state.anchor(dest_m);
                        if let Some(seg) = board.release_unit(member) {
                            events.push(BlockEvent::exit(seg, member));
                        }
                    }
                }
            }
        }
    }
}
