//! Corridor construction and position queries.
//!
//! # Data layout
//!
//! Stations are stored sorted by position; `StationId` is the index into that
//! sorted order.  Segment `i` spans station `i` to station `i + 1`, so a
//! corridor of `n` stations has `n - 1` segments (zero for `n ≤ 1` — still a
//! valid, block-logic-free corridor).
//!
//! Position containment uses the half-open interval `[low, high)`: a position
//! exactly on a boundary belongs to the upper segment.

use std::collections::HashSet;

use rail_core::{SegmentId, StationId};

use crate::{Station, TopologyError};

// ── SegmentSpan ───────────────────────────────────────────────────────────────

/// The interval of track between two adjacent stations.
///
/// Occupancy state lives in `rail-block`; this is only the geometry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentSpan {
    /// 0-based, position-sorted index.
    pub index: SegmentId,
    /// Position of the lower bounding station, m.
    pub low_m: f64,
    /// Position of the upper bounding station, m.
    pub high_m: f64,
    /// The station at `low_m`.
    pub lower_station: StationId,
    /// The station at `high_m`.
    pub upper_station: StationId,
}

impl SegmentSpan {
    /// Half-open containment test.
    #[inline]
    pub fn contains(&self, position_m: f64) -> bool {
        self.low_m <= position_m && position_m < self.high_m
    }

    /// The boundary a unit travelling in `direction` is heading toward.
    #[inline]
    pub fn far_boundary(&self, direction: rail_core::Direction) -> f64 {
        match direction {
            rail_core::Direction::Up => self.high_m,
            rail_core::Direction::Down => self.low_m,
        }
    }
}

// ── Corridor ──────────────────────────────────────────────────────────────────

/// The immutable station/segment topology of one linear corridor.
#[derive(Debug)]
pub struct Corridor {
    stations: Vec<Station>,
    segments: Vec<SegmentSpan>,
}

impl Corridor {
    /// Build a corridor from an unordered station list.
    ///
    /// Stations are sorted by position; names must be unique, capacities
    /// positive, positions finite and non-negative.  Empty and single-station
    /// corridors are valid (they simply have no segments).
    pub fn new(mut stations: Vec<Station>) -> Result<Self, TopologyError> {
        for s in &stations {
            if s.capacity == 0 {
                return Err(TopologyError::ZeroCapacity(s.name.clone()));
            }
            if !s.position_m.is_finite() || s.position_m < 0.0 {
                return Err(TopologyError::BadPosition(s.name.clone()));
            }
        }
        let mut names = HashSet::new();
        for s in &stations {
            if !names.insert(s.name.clone()) {
                return Err(TopologyError::DuplicateStation(s.name.clone()));
            }
        }

        stations.sort_by(|a, b| a.position_m.total_cmp(&b.position_m));

        let segments = stations
            .windows(2)
            .enumerate()
            .map(|(i, pair)| SegmentSpan {
                index:         SegmentId(i as u32),
                low_m:         pair[0].position_m,
                high_m:        pair[1].position_m,
                lower_station: StationId(i as u32),
                upper_station: StationId(i as u32 + 1),
            })
            .collect();

        Ok(Self { stations, segments })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Total anchoring slots across all stations — the fleet size.
    pub fn total_slots(&self) -> usize {
        self.stations.iter().map(|s| s.capacity as usize).sum()
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    #[inline]
    pub fn station(&self, id: StationId) -> &Station {
        &self.stations[id.index()]
    }

    #[inline]
    pub fn segment(&self, id: SegmentId) -> &SegmentSpan {
        &self.segments[id.index()]
    }

    /// Find a station by its unique name.
    pub fn station_by_name(&self, name: &str) -> Option<StationId> {
        self.stations
            .iter()
            .position(|s| s.name == name)
            .map(|i| StationId(i as u32))
    }

    /// The segment whose half-open `[low, high)` interval contains
    /// `position_m`, or `None` outside the corridor.
    ///
    /// Binary search over the sorted station positions.
    pub fn segment_at(&self, position_m: f64) -> Option<SegmentId> {
        if self.segments.is_empty() {
            return None;
        }
        let first = self.segments.first()?;
        let last = self.segments.last()?;
        if position_m < first.low_m || position_m >= last.high_m {
            return None;
        }
        let i = self
            .segments
            .partition_point(|seg| seg.high_m <= position_m);
        debug_assert!(self.segments[i].contains(position_m));
        Some(SegmentId(i as u32))
    }

    /// The station whose position is within `tolerance_m` of `position_m`.
    ///
    /// Used to resolve "which station is this anchored unit at".
    pub fn station_at(&self, position_m: f64, tolerance_m: f64) -> Option<StationId> {
        self.stations
            .iter()
            .position(|s| (s.position_m - position_m).abs() < tolerance_m)
            .map(|i| StationId(i as u32))
    }

    // ── Iteration ─────────────────────────────────────────────────────────

    pub fn stations(&self) -> impl Iterator<Item = (StationId, &Station)> + '_ {
        self.stations
            .iter()
            .enumerate()
            .map(|(i, s)| (StationId(i as u32), s))
    }

    pub fn segments(&self) -> impl Iterator<Item = &SegmentSpan> + '_ {
        self.segments.iter()
    }
}
