//! `rail-dispatch` — when and where anchored units are sent.
//!
//! The [`DispatchPolicy`] trait is the main extension point of the
//! simulation: the orchestrator asks the policy once per anchored unit per
//! tick, read-only, and applies the returned orders afterwards.  The stock
//! [`RandomDispatch`] reproduces the corridor's baseline traffic model — a
//! per-tick dispatch coin and a uniform destination choice.

pub mod context;
pub mod noop;
pub mod policy;
pub mod random;


pub use context::DispatchContext;
pub use noop::NoopDispatch;
pub use policy::{DispatchOrder, DispatchPolicy};
pub use random::RandomDispatch;
