//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use steer_agent::AgentStore;
use steer_behavior::ForceContribution;
use steer_core::Tick;
use steer_sim::{SimObserver, TickSummary};

use crate::row::{AgentSnapshotRow, ForceRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes agent snapshots, tick summaries and force
/// contributions to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
///
/// Rows are stamped with the simulated time after the tick, taken from
/// the tick summary.  Snapshots reuse the time of the summary before them.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:       W,
    elapsed_secs: f64,
    last_error:   Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, elapsed_secs: 0.0, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                log::error!("output write failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.elapsed_secs = summary.elapsed_secs;
        let row = TickSummaryRow {
            tick:       summary.tick.0,
            time_secs:  summary.elapsed_secs,
            agents:     summary.agents as u64,
            mean_speed: summary.mean_speed,
            max_speed:  summary.max_speed,
            mean_force: summary.mean_force,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore) {
        let time_secs = self.elapsed_secs;
        let rows: Vec<AgentSnapshotRow> = agents
            .live_ids()
            .map(|id| {
                let p = agents.position[id.index()];
                let v = agents.velocity[id.index()];
                AgentSnapshotRow {
                    agent_id: id.0,
                    tick: tick.0,
                    time_secs,
                    x:        p.x,
                    y:        p.y,
                    vx:       v.x,
                    vy:       v.y,
                    speed:    v.length(),
                }
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_forces(&mut self, tick: Tick, contributions: &[ForceContribution]) {
        let rows: Vec<ForceRow> = contributions
            .iter()
            .map(|c| ForceRow {
                tick:      tick.0,
                agent_id:  c.agent.0,
                behavior:  c.behavior,
                fx:        c.force.x,
                fy:        c.force.y,
                magnitude: c.force.length(),
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_forces(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
