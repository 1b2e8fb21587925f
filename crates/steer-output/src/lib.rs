//! `steer-output`: simulation output writers for the steer workspace.
//!
//! | Backend | Files created                                                          |
//! |---------|------------------------------------------------------------------------|
//! | CSV     | `agent_snapshots.csv`, `tick_summaries.csv`, `force_contributions.csv` |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `steer_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use steer_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     log::error!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentSnapshotRow, ForceRow, TickSummaryRow};
pub use writer::OutputWriter;
