//! The `Sim` struct and its tick loop.

use rail_block::OccupancyBoard;
use rail_core::{SegmentId, SimClock, SimConfig, Tick};
use rail_coupling::CouplingEngine;
use rail_dispatch::{DispatchContext, DispatchOrder, DispatchPolicy};
use rail_fleet::{FleetStore, UnitRngs};
use rail_motion::Integrator;
use rail_topology::Corridor;

use crate::{GroupRow, SegmentRow, SimObserver, SimResult, SimSnapshot, UnitRow};

/// The main simulation runner.
///
/// `Sim<D>` holds all world state and drives the staged tick loop:
///
/// 1. **Dispatch**: ask the policy about every unit against a read-only
///    context, then apply the orders in ascending `UnitId` order.
/// 2. **Coupling**: pairwise check from the pre-move snapshot; commits speed
///    shaping and group formation.
/// 3. **Decoupling**: split groups behind members that halted.
/// 4. **Movement**: plan accelerations read-only, then integrate leaders and
///    loners sequentially — the occupancy board arbitrates same-segment
///    races, and followers mirror their leader afterwards.
///
/// Every stage decides before it writes, so no unit's outcome depends on
/// where it sits in the iteration order.  Create via
/// [`SimBuilder`][crate::SimBuilder].
pub struct Sim<D: DispatchPolicy> {
    /// Global configuration (total ticks, seed, Δt, …).
    pub config: SimConfig,

    /// Simulation clock — the current tick and the integration step.
    pub clock: SimClock,

    /// The immutable corridor topology.
    pub corridor: Corridor,

    /// Every unit's state.
    pub fleet: FleetStore,

    /// Per-unit deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: UnitRngs,

    /// Segment occupant slots.
    pub board: OccupancyBoard,

    /// Coupling state machine and group membership.
    pub coupling: CouplingEngine,

    /// The motion integrator.
    pub integrator: Integrator,

    /// The dispatch policy.  Consulted once per unit per tick.
    pub policy: D,
}

impl<D: DispatchPolicy> Sim<D> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        loop {
            let now = self.clock.current_tick;
            if now >= self.config.end_tick() {
                break;
            }

            observer.on_tick_start(now);
            let moving = self.process_tick(now, observer)?;
            observer.on_tick_end(now, moving);
            if self.config.output_interval_ticks > 0
                && now.0.is_multiple_of(self.config.output_interval_ticks)
            {
                observer.on_snapshot(now, &self.snapshot());
            }

            self.clock.advance();
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let now = self.clock.current_tick;
            observer.on_tick_start(now);
            let moving = self.process_tick(now, observer)?;
            observer.on_tick_end(now, moving);
            if self.config.output_interval_ticks > 0
                && now.0.is_multiple_of(self.config.output_interval_ticks)
            {
                observer.on_snapshot(now, &self.snapshot());
            }
            self.clock.advance();
        }
        Ok(())
    }

    /// The external view of the current world state.
    pub fn snapshot(&self) -> SimSnapshot {
        let units = self
            .fleet
            .unit_ids()
            .map(|unit| {
                let s = self.fleet.get(unit);
                UnitRow {
                    unit,
                    position_m:  s.position_m,
                    speed_mps:   s.speed_mps,
                    status:      s.status,
                    destination: s.destination,
                    group:       s.group,
                }
            })
            .collect();

        let segments = self
            .board
            .occupants()
            .iter()
            .enumerate()
            .map(|(i, &occupant)| SegmentRow {
                segment: SegmentId(i as u32),
                occupant,
            })
            .collect();

        let groups = self
            .coupling
            .groups
            .iter()
            .filter_map(|(group, members)| {
                let leader = self.coupling.groups.leader(group, &self.fleet)?;
                Some(GroupRow {
                    group,
                    members: members.to_vec(),
                    leader,
                })
            })
            .collect();

        SimSnapshot {
            tick: self.clock.current_tick,
            units,
            segments,
            groups,
        }
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(
        &mut self,
        now: Tick,
        observer: &mut O,
    ) -> SimResult<usize> {
        // ── Phase 1: dispatch — decide, then apply ────────────────────────
        //
        // Every policy call sees the same pre-tick fleet; orders are applied
        // afterwards in ascending UnitId order, deriving each unit's travel
        // direction from the position delta exactly once.
        let orders: Vec<DispatchOrder> = {
            let ctx = DispatchContext::new(now, &self.corridor, &self.fleet);
            let fleet = &self.fleet;
            let policy = &self.policy;
            let rngs = &mut self.rngs;
            fleet
                .unit_ids()
                .filter_map(|unit| policy.plan(unit, &ctx, rngs.get_mut(unit)))
                .collect()
        };
        for order in orders {
            let dest_m = self.corridor.station(order.destination).position_m;
            let state = self.fleet.get_mut(order.unit);
            if state.is_anchored() {
                state.begin_run(order.destination, dest_m);
            }
        }

        // ── Phase 2: coupling check ───────────────────────────────────────
        for event in self.coupling.check_couplings(&mut self.fleet, &mut self.board) {
            observer.on_block_event(now, &event);
        }

        // ── Phase 3: decoupling check ─────────────────────────────────────
        self.coupling.check_decouplings(&mut self.fleet);

        // ── Phase 4: movement — plan, then commit ─────────────────────────
        let accels = self
            .integrator
            .plan(&self.fleet, &self.coupling.groups, &mut self.rngs);
        let events = self.integrator.advance(
            &mut self.fleet,
            &self.corridor,
            &mut self.board,
            &self.coupling.groups,
            &accels,
            self.clock.tick_secs,
        );
        for event in &events {
            observer.on_block_event(now, event);
        }

        Ok(self.fleet.moving_units().len())
    }
}
