//! The `Station` record.

/// A station on the corridor.  Immutable after load.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    /// Unique name — the external key for destinations and display.
    pub name: String,

    /// Distance from the corridor origin, metres.
    pub position_m: f64,

    /// Number of anchoring slots.  One unit is spawned per slot.
    pub capacity: u32,
}

impl Station {
    pub fn new(name: impl Into<String>, position_m: f64, capacity: u32) -> Self {
        Self {
            name: name.into(),
            position_m,
            capacity,
        }
    }
}
