//! `rail-coupling` — dynamic coupling of converging units.
//!
//! Two same-direction units closing on each other pass through three distance
//! rings: **approach** (trailing unit nudged up to a slow closing speed),
//! **brake** (trailing speed capped to a crawl), and **couple** (the pair
//! snaps together and moves as one group).  A group splits again as soon as a
//! member at its head halts.
//!
//! Group membership is owned exclusively by [`GroupSet`]; no other crate
//! mutates it.  The engine runs decide-then-commit inside each check so the
//! outcome never depends on fleet iteration order.

pub mod engine;
pub mod groups;


pub use engine::{CouplingEngine, PairState, classify};
pub use groups::GroupSet;
