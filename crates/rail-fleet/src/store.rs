//! `FleetStore` — per-unit state — and `UnitRngs` — per-unit RNG state.
//!
//! The two live in separate structs so the decision phase can hold
//! `&FleetStore` (shared read access to world state) and `&mut UnitRngs`
//! (exclusive access to each unit's RNG) at the same time without fighting
//! the borrow checker.

use rail_core::{UnitId, UnitRng};
use rail_topology::Corridor;

use crate::UnitState;

// ── UnitRngs ──────────────────────────────────────────────────────────────────

/// Per-unit deterministic RNG state, indexed by `UnitId`.
pub struct UnitRngs {
    pub inner: Vec<UnitRng>,
}

impl UnitRngs {
    /// Allocate and seed `count` per-unit RNGs from `global_seed`.
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| UnitRng::new(global_seed, UnitId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one unit's RNG.
    #[inline]
    pub fn get_mut(&mut self, unit: UnitId) -> &mut UnitRng {
        &mut self.inner[unit.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── FleetStore ────────────────────────────────────────────────────────────────

/// All unit state, indexed by `UnitId`.
///
/// The vector length is fixed at spawn time; units are never added or
/// removed afterwards.
pub struct FleetStore {
    pub states: Vec<UnitState>,
}

impl FleetStore {
    /// Spawn one anchored unit per (station, slot) pair of the corridor.
    ///
    /// Unit IDs are assigned in station order, then slot order, so runs are
    /// reproducible for a given topology.
    pub fn spawn(corridor: &Corridor) -> Self {
        let mut states = Vec::with_capacity(corridor.total_slots());
        for (station_id, station) in corridor.stations() {
            for slot in 1..=station.capacity {
                states.push(UnitState::anchored_at(station_id, station.position_m, slot));
            }
        }
        Self { states }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[inline]
    pub fn get(&self, unit: UnitId) -> &UnitState {
        &self.states[unit.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, unit: UnitId) -> &mut UnitState {
        &mut self.states[unit.index()]
    }

    /// Iterator over all `UnitId`s in ascending index order.
    pub fn unit_ids(&self) -> impl Iterator<Item = UnitId> + '_ {
        (0..self.states.len() as u32).map(UnitId)
    }

    /// IDs of all units currently moving, ascending.
    pub fn moving_units(&self) -> Vec<UnitId> {
        self.unit_ids()
            .filter(|&u| self.states[u.index()].is_moving())
            .collect()
    }
}
