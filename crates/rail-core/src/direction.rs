//! Travel direction along the single-track corridor.

use std::fmt;

/// The sense of travel along the corridor.
///
/// Anchored units have no direction; the rest of the workspace models that as
/// `Option<Direction>` with `None`.  A unit's direction is fixed once when a
/// destination is assigned and never re-derived mid-transit — only arrival
/// clears it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Toward increasing positions.
    Up,
    /// Toward decreasing positions.
    Down,
}

impl Direction {
    /// Direction of travel from `from_m` toward `to_m`.
    ///
    /// Returns `None` for a zero delta (nowhere to go).
    pub fn of_travel(from_m: f64, to_m: f64) -> Option<Direction> {
        if to_m > from_m {
            Some(Direction::Up)
        } else if to_m < from_m {
            Some(Direction::Down)
        } else {
            None
        }
    }

    /// `+1.0` for `Up`, `-1.0` for `Down` — multiplies speed·Δt into a
    /// signed position delta.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}
