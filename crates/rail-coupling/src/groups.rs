//! `GroupSet` — coupling-group membership.
//!
//! Invariants maintained here and nowhere else:
//!
//! - every group has ≥ 2 members (smaller groups are dissolved immediately);
//! - no unit belongs to two groups;
//! - a unit's `group` field always names an existing group, or is `None`.
//!
//! The group leader is a derived query, never cached — membership and
//! positions change every tick and a stored leader would go stale.

use std::collections::BTreeMap;

use rail_core::{Direction, GroupId, UnitId};
use rail_fleet::FleetStore;

/// All coupling groups, keyed by `GroupId` in allocation order.
#[derive(Default)]
pub struct GroupSet {
    groups: BTreeMap<GroupId, Vec<UnitId>>,
    next_id: u32,
}

impl GroupSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Ordered member list of `group`, or `None` if it does not exist.
    pub fn members(&self, group: GroupId) -> Option<&[UnitId]> {
        self.groups.get(&group).map(Vec::as_slice)
    }

    /// Group IDs in ascending order.
    pub fn ids(&self) -> Vec<GroupId> {
        self.groups.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &[UnitId])> + '_ {
        self.groups.iter().map(|(&gid, m)| (gid, m.as_slice()))
    }

    // ── Membership mutation ───────────────────────────────────────────────

    /// Create a new group from `members` (must be ≥ 2 distinct units) and
    /// point each member's group reference at it.
    pub fn create(&mut self, members: Vec<UnitId>, fleet: &mut FleetStore) -> GroupId {
        debug_assert!(members.len() >= 2);
        let gid = GroupId(self.next_id);
        self.next_id += 1;
        for &unit in &members {
            fleet.get_mut(unit).group = Some(gid);
        }
        self.groups.insert(gid, members);
        gid
    }

    /// Append `unit` to an existing group.
    pub fn add_member(&mut self, group: GroupId, unit: UnitId, fleet: &mut FleetStore) {
        if let Some(members) = self.groups.get_mut(&group) {
            debug_assert!(!members.contains(&unit));
            members.push(unit);
            fleet.get_mut(unit).group = Some(group);
        }
    }

    /// Merge `from` into `into`: members concatenated, `from` deleted.
    pub fn merge(&mut self, into: GroupId, from: GroupId, fleet: &mut FleetStore) {
        if into == from {
            return;
        }
        let Some(absorbed) = self.groups.remove(&from) else {
            return;
        };
        for &unit in &absorbed {
            fleet.get_mut(unit).group = Some(into);
        }
        if let Some(members) = self.groups.get_mut(&into) {
            members.extend(absorbed);
        }
    }

    /// Remove `units` from `group`, clearing each one's group reference.
    /// Membership of the remainder is left as-is; call
    /// [`dissolve_if_small`][Self::dissolve_if_small] afterwards.
    pub fn remove_members(&mut self, group: GroupId, units: &[UnitId], fleet: &mut FleetStore) {
        let Some(members) = self.groups.get_mut(&group) else {
            return;
        };
        members.retain(|m| !units.contains(m));
        for &unit in units {
            fleet.get_mut(unit).group = None;
        }
    }

    /// Delete `group` if it has fewer than 2 members, clearing the group
    /// reference of a sole survivor.  Returns `true` if the group was
    /// deleted.
    pub fn dissolve_if_small(&mut self, group: GroupId, fleet: &mut FleetStore) -> bool {
        let Some(members) = self.groups.get(&group) else {
            return false;
        };
        if members.len() >= 2 {
            return false;
        }
        let members = self.groups.remove(&group).unwrap_or_default();
        for unit in members {
            fleet.get_mut(unit).group = None;
        }
        true
    }

    // ── Derived queries ───────────────────────────────────────────────────

    /// The group's travel direction: that of the first member still holding
    /// one.  Falls back to `Up` when every member has anchored (the ordering
    /// is then only used for cleanup scans).
    pub fn direction_of(&self, group: GroupId, fleet: &FleetStore) -> Direction {
        self.groups
            .get(&group)
            .and_then(|m| m.iter().find_map(|&u| fleet.get(u).direction))
            .unwrap_or(Direction::Up)
    }

    /// The group leader: the extremal member by position in the group's
    /// travel direction (max position for `Up`, min for `Down`).  Ties —
    /// coupled members share a position — go to the lowest `UnitId` for
    /// determinism.  Computed on demand, never stored.
    pub fn leader(&self, group: GroupId, fleet: &FleetStore) -> Option<UnitId> {
        let members = self.groups.get(&group)?;
        let dir = self.direction_of(group, fleet);
        let mut best = *members.first()?;
        for &unit in &members[1..] {
            let p = fleet.get(unit).position_m;
            let bp = fleet.get(best).position_m;
            let ahead = match dir {
                Direction::Up => p > bp,
                Direction::Down => p < bp,
            };
            if ahead || (p == bp && unit < best) {
                best = unit;
            }
        }
        Some(best)
    }

    /// `true` if `unit` is in a group but is not its leader — such units
    /// mirror the leader's motion instead of integrating on their own.
    pub fn is_follower(&self, unit: UnitId, fleet: &FleetStore) -> bool {
        match fleet.get(unit).group {
            Some(gid) => self.leader(gid, fleet) != Some(unit),
            None => false,
        }
    }
}
