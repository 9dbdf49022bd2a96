//! `rail-output` — CSV logging for simulation runs.
//!
//! The core never touches the filesystem; this crate bridges the
//! [`SimObserver`][rail_sim::SimObserver] hooks to two CSV files:
//!
//! - `block_events.csv`   — every segment enter/exit transition
//! - `unit_snapshots.csv` — per-unit state at each snapshot interval
//!
//! Observer methods have no return value, so write errors are buffered
//! internally; check [`CsvLogObserver::take_error`] after the run.

pub mod csv_log;
pub mod error;


pub use csv_log::CsvLogObserver;
pub use error::{OutputError, OutputResult};
