//! `rail-sim` — tick-loop orchestrator for the rail corridor simulation.
//!
//! # Staged tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Dispatch   — ask the DispatchPolicy about every unit read-only,
//!                  then apply the orders in ascending UnitId order.
//!   ② Coupling   — classify every pair from the pre-move snapshot,
//!                  then commit speed shaping and couplings.
//!   ③ Decoupling — split groups behind halted members.
//!   ④ Movement   — plan accelerations read-only, then integrate each
//!                  leader/loner; block admission arbitrates segment races.
//! ```
//!
//! Every stage decides from a consistent snapshot and commits in a fixed
//! order, so a tick's outcome never depends on fleet iteration order.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rail_core::SimConfig;
//! use rail_dispatch::RandomDispatch;
//! use rail_sim::{NoopObserver, SimBuilder};
//! use rail_topology::{Corridor, Station};
//!
//! let corridor = Corridor::new(stations)?;
//! let config = SimConfig::default();
//! let policy = RandomDispatch::new(config.dispatch_probability);
//! let mut sim = SimBuilder::new(config, corridor, policy).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod snapshot;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use snapshot::{GroupRow, SegmentRow, SimSnapshot, UnitRow};
