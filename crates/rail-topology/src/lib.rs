//! `rail-topology` — the immutable corridor: stations and derived segments.
//!
//! A corridor is an ordered list of stations along a single line, sorted by
//! position.  Each pair of adjacent stations bounds one track segment; the
//! segment list is derived once at construction and never changes.
//!
//! Loading station data from a file is an application concern — this crate
//! consumes an already-assembled `Vec<Station>`.

pub mod corridor;
pub mod error;
pub mod station;


pub use corridor::{Corridor, SegmentSpan};
pub use error::TopologyError;
pub use station::Station;
