//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `agent_snapshots.csv`
//! - `tick_summaries.csv`
//! - `force_contributions.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, ForceRow, OutputResult, TickSummaryRow};

pub const SNAPSHOT_HEADER: [&str; 8] = ["agent_id", "tick", "time_secs", "x", "y", "vx", "vy", "speed"];
pub const SUMMARY_HEADER:  [&str; 6] = ["tick", "time_secs", "agents", "mean_speed", "max_speed", "mean_force"];
pub const FORCE_HEADER:    [&str; 6] = ["tick", "agent_id", "behavior", "fx", "fy", "magnitude"];

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    forces:    Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the CSV files in `dir` and write the header rows.
    ///
    /// `dir` must already exist.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        let mut forces = Writer::from_path(dir.join("force_contributions.csv"))?;
        forces.write_record(FORCE_HEADER)?;

        log::debug!("writing CSV output to {}", dir.display());
        Ok(Self { snapshots, summaries, forces, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.time_secs.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.vx.to_string(),
                row.vy.to_string(),
                row.speed.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.time_secs.to_string(),
            row.agents.to_string(),
            row.mean_speed.to_string(),
            row.max_speed.to_string(),
            row.mean_force.to_string(),
        ])?;
        Ok(())
    }

    fn write_forces(&mut self, rows: &[ForceRow]) -> OutputResult<()> {
        for row in rows {
            self.forces.write_record(&[
                row.tick.to_string(),
                row.agent_id.to_string(),
                row.behavior.to_string(),
                row.fx.to_string(),
                row.fy.to_string(),
                row.magnitude.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.forces.flush()?;
        Ok(())
    }
}
