//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentSnapshotRow, ForceRow, OutputResult, TickSummaryRow};

/// A sink for simulation output rows.
///
/// Errors surface through [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error]
/// when driven by the observer.
pub trait OutputWriter {
    /// Write a batch of agent snapshots.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write a batch of per-behavior force records.
    fn write_forces(&mut self, rows: &[ForceRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
