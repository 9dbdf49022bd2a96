//! `rail-block` — the block occupancy board.
//!
//! At most one unit may occupy a track segment at a time.  The board is the
//! single mutation point for occupancy: every boundary crossing goes through
//! [`OccupancyBoard::try_enter`], which makes the core exclusivity invariant
//! hold by construction — there is exactly one occupant slot per segment and
//! nothing else ever writes it.

pub mod board;
pub mod event;


pub use board::OccupancyBoard;
pub use event::{BlockEvent, BlockEventKind};
