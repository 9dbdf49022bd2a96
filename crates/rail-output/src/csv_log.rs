//! CSV logging observer.

use std::fs::File;
use std::path::Path;

use csv::Writer;
use rail_block::BlockEvent;
use rail_core::Tick;
use rail_sim::{SimObserver, SimSnapshot};

use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes `block_events.csv` and `unit_snapshots.csv`
/// into a directory.
///
/// Errors from the writers are stored internally because observer methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct CsvLogObserver {
    events:     Writer<File>,
    snapshots:  Writer<File>,
    last_error: Option<OutputError>,
}

impl CsvLogObserver {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join("block_events.csv"))?;
        events.write_record(["tick", "segment", "event", "unit"])?;

        let mut snapshots = Writer::from_path(dir.join("unit_snapshots.csv"))?;
        snapshots.write_record([
            "tick",
            "unit",
            "position_m",
            "speed_mps",
            "status",
            "destination",
            "group",
        ])?;

        Ok(Self {
            events,
            snapshots,
            last_error: None,
        })
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    fn write_event(&mut self, tick: Tick, event: &BlockEvent) -> OutputResult<()> {
        self.events.write_record(&[
            tick.0.to_string(),
            event.segment.0.to_string(),
            format!("{:?}", event.kind).to_lowercase(),
            event.unit.0.to_string(),
        ])?;
        Ok(())
    }

    fn write_snapshot(&mut self, snapshot: &SimSnapshot) -> OutputResult<()> {
        for row in &snapshot.units {
            self.snapshots.write_record(&[
                snapshot.tick.0.to_string(),
                row.unit.0.to_string(),
                format!("{:.3}", row.position_m),
                format!("{:.3}", row.speed_mps),
                format!("{:?}", row.status).to_lowercase(),
                row.destination.map(|d| d.0.to_string()).unwrap_or_default(),
                row.group.map(|g| g.0.to_string()).unwrap_or_default(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.events.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}

impl SimObserver for CsvLogObserver {
    fn on_block_event(&mut self, tick: Tick, event: &BlockEvent) {
        let result = self.write_event(tick, event);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, _tick: Tick, snapshot: &SimSnapshot) {
        let result = self.write_snapshot(snapshot);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.finish();
        self.store_err(result);
    }
}
