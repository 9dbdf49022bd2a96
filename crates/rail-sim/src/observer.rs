//! Simulation observer trait for progress reporting and data collection.

use rail_block::BlockEvent;
use rail_core::Tick;

use crate::SimSnapshot;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — occupancy printer
///
/// ```rust,ignore
/// struct OccupancyPrinter;
///
/// impl SimObserver for OccupancyPrinter {
///     fn on_block_event(&mut self, tick: Tick, event: &BlockEvent) {
///         println!("{tick}: {:?} segment {} unit {}", event.kind, event.segment, event.unit);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per occupancy transition, in the order the transitions
    /// were committed within the tick.
    fn on_block_event(&mut self, _tick: Tick, _event: &BlockEvent) {}

    /// Called at the end of each tick.
    ///
    /// `moving` is the number of units still en route after the tick.
    fn on_tick_end(&mut self, _tick: Tick, _moving: usize) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with the full external view of the tick's end state.
    fn on_snapshot(&mut self, _tick: Tick, _snapshot: &SimSnapshot) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
