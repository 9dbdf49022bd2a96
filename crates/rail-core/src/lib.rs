//! `rail-core` — foundational types for the railsim workspace.
//!
//! This crate is a dependency of every other `rail-*` crate.  It intentionally
//! has no `rail-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `UnitId`, `StationId`, `SegmentId`, `GroupId`           |
//! | [`direction`] | `Direction` — travel sense along the corridor           |
//! | [`time`]      | `Tick`, `SimClock`                                      |
//! | [`config`]    | `SimConfig`, `KinematicsProfile`, `CouplingProfile`     |
//! | [`rng`]       | `UnitRng` (per-unit), `SimRng` (global)                 |
//! | [`error`]     | `RailError`, `RailResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod config;
pub mod direction;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CouplingProfile, KinematicsProfile, SimConfig};
pub use direction::Direction;
pub use error::{RailError, RailResult};
pub use ids::{GroupId, SegmentId, StationId, UnitId};
pub use rng::{SimRng, UnitRng};
pub use time::{SimClock, Tick};
