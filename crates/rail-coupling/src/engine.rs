//! The coupling engine: pairwise classification, speed shaping, group
//! formation, and decoupling.

use rail_block::{BlockEvent, OccupancyBoard};
use rail_core::{CouplingProfile, Direction, UnitId};
use rail_fleet::FleetStore;

use crate::GroupSet;

// ── Pair classification ───────────────────────────────────────────────────────

/// Relationship of one unordered pair of same-direction units, by distance.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PairState {
    /// Beyond the approach ring — no interaction.
    Far,
    /// Inside the approach ring — trailing speed nudged up toward the
    /// approach speed.
    Approaching,
    /// Inside the brake ring — trailing speed capped to a crawl.
    Braking,
    /// Inside the couple ring — the pair merges into one group.
    Coupled,
}

/// Classify a pair by gap distance against the profile's three rings.
pub fn classify(distance_m: f64, profile: &CouplingProfile) -> PairState {
    if distance_m > profile.approach_threshold_m {
        PairState::Far
    } else if distance_m > profile.brake_threshold_m {
        PairState::Approaching
    } else if distance_m > profile.couple_threshold_m {
        PairState::Braking
    } else {
        PairState::Coupled
    }
}

// ── CouplingEngine ────────────────────────────────────────────────────────────

/// Owns group membership and runs the per-tick coupling / decoupling checks.
pub struct CouplingEngine {
    pub profile: CouplingProfile,
    pub groups: GroupSet,
}

impl CouplingEngine {
    pub fn new(profile: CouplingProfile) -> Self {
        Self {
            profile,
            groups: GroupSet::new(),
        }
    }

    /// Per-tick coupling check over the whole fleet.
    ///
    /// Decision phase: every unordered pair of moving, same-direction units
    /// not already sharing a group is classified from the pre-tick snapshot.
    /// A pair in the same group counts as [`PairState::Far`] regardless of
    /// distance (already resolved).
    ///
    /// Commit phase, order-independent by construction:
    /// 1. brake caps (a cap beats any nudge on the same unit);
    /// 2. approach nudges;
    /// 3. finalizations in the stable pair-scan order — the trailing unit
    ///    snaps onto the leading unit, the two sides' groups are created /
    ///    joined / merged, and every non-leader member of the result releases
    ///    any held segment (only a group's leader carries occupancy).
    ///
    /// Returns occupancy `Exit` events from finalization releases.
    pub fn check_couplings(
        &mut self,
        fleet: &mut FleetStore,
        board: &mut OccupancyBoard,
    ) -> Vec<BlockEvent> {
        let n = fleet.len();
        let mut nudged = vec![false; n];
        let mut capped = vec![false; n];
        let mut finalizes: Vec<(UnitId, UnitId)> = Vec::new();

        // ── Decision phase: read-only pair scan ───────────────────────────
        for i in 0..n {
            for j in (i + 1)..n {
                let a = fleet.get(UnitId(i as u32));
                let b = fleet.get(UnitId(j as u32));

                // Coupling logic applies to same-direction moving pairs only;
                // head-on proximity is out of the model.
                let (Some(da), Some(db)) = (a.direction, b.direction) else {
                    continue;
                };
                if da != db || !a.is_moving() || !b.is_moving() {
                    continue;
                }
                if a.group.is_some() && a.group == b.group {
                    continue; // already resolved
                }

                let (lead, trail) = lead_trail(UnitId(i as u32), UnitId(j as u32), fleet, da);
                let distance = (a.position_m - b.position_m).abs();

                match classify(distance, &self.profile) {
                    PairState::Far => {}
                    PairState::Approaching => nudged[trail.index()] = true,
                    PairState::Braking => capped[trail.index()] = true,
                    PairState::Coupled => finalizes.push((lead, trail)),
                }
            }
        }

        // ── Commit phase: speed shaping from snapshot speeds ──────────────
        for u in 0..n {
            let state = fleet.get_mut(UnitId(u as u32));
            if capped[u] {
                // Cap, never increase.
                if state.speed_mps > self.profile.brake_speed_mps {
                    state.speed_mps = self.profile.brake_speed_mps;
                }
            } else if nudged[u] {
                // Nudge toward the approach speed, never decrease.
                if state.speed_mps < self.profile.approach_speed_mps {
                    state.speed_mps = self
                        .profile
                        .approach_speed_mps
                        .min(state.speed_mps + self.profile.approach_step_mps);
                }
            }
        }

        // ── Commit phase: finalizations ───────────────────────────────────
        let mut events = Vec::new();
        for (lead, trail) in finalizes {
            // An earlier merge this tick may already have resolved the pair.
            let lead_group = fleet.get(lead).group;
            let trail_group = fleet.get(trail).group;
            if lead_group.is_some() && lead_group == trail_group {
                continue;
            }

            // Zero the gap: trailing unit takes the leading unit's motion.
            let lead_pos = fleet.get(lead).position_m;
            let lead_speed = fleet.get(lead).speed_mps;
            let t = fleet.get_mut(trail);
            t.position_m = lead_pos;
            t.speed_mps = lead_speed;

            match (lead_group, trail_group) {
                (None, None) => {
                    self.groups.create(vec![lead, trail], fleet);
                }
                (Some(g), None) => self.groups.add_member(g, trail, fleet),
                (None, Some(g)) => self.groups.add_member(g, lead, fleet),
                (Some(gl), Some(gt)) => self.groups.merge(gl, gt, fleet),
            }

            // Only the group leader carries occupancy.  A merge can demote a
            // former leader, so sweep the whole resulting group, not just the
            // trailing unit.
            if let Some(gid) = fleet.get(lead).group {
                let leader = self.groups.leader(gid, fleet);
                let members = self.groups.members(gid).map(|m| m.to_vec()).unwrap_or_default();
                for member in members {
                    if Some(member) == leader {
                        continue;
                    }
                    if let Some(seg) = board.release_unit(member) {
                        events.push(BlockEvent::exit(seg, member));
                    }
                }
            }
        }
        events
    }

    /// Per-tick decoupling check.
    ///
    /// For each group (ascending `GroupId`), members are ordered lead→tail by
    /// position in the group's travel direction; coupled members share a
    /// position, so ties put halting members first, then lower IDs.  The
    /// first halting member (anchored, or destination cleared) marks the
    /// split: everything strictly behind it leaves the group, forming a new
    /// group when 2+ units remain together.  One split per group per tick;
    /// groups dropping below 2 members are dissolved.
    pub fn check_decouplings(&mut self, fleet: &mut FleetStore) {
        for gid in self.groups.ids() {
            let Some(members) = self.groups.members(gid) else {
                continue;
            };
            let dir = self.groups.direction_of(gid, fleet);

            let mut ordered = members.to_vec();
            ordered.sort_by(|&a, &b| {
                let (ua, ub) = (fleet.get(a), fleet.get(b));
                let pos = match dir {
                    Direction::Up => ub.position_m.total_cmp(&ua.position_m),
                    Direction::Down => ua.position_m.total_cmp(&ub.position_m),
                };
                pos.then_with(|| ub.is_halting().cmp(&ua.is_halting()))
                    .then_with(|| a.cmp(&b))
            });

            if let Some(split) = ordered.iter().position(|&u| fleet.get(u).is_halting()) {
                let behind = ordered[split + 1..].to_vec();
                if !behind.is_empty() {
                    self.groups.remove_members(gid, &behind, fleet);
                    if behind.len() >= 2 {
                        self.groups.create(behind, fleet);
                    }
                }
            }

            self.groups.dissolve_if_small(gid, fleet);
        }
    }
}

/// Lead/trail assignment for a same-direction pair: the greater position
/// leads for `Up`, the lesser for `Down`.
fn lead_trail(
    a: UnitId,
    b: UnitId,
    fleet: &FleetStore,
    direction: Direction,
) -> (UnitId, UnitId) {
    let (pa, pb) = (fleet.get(a).position_m, fleet.get(b).position_m);
    let a_leads = match direction {
        Direction::Up => pa > pb,
        Direction::Down => pa < pb,
    };
    if a_leads { (a, b) } else { (b, a) }
}
