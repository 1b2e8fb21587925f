//! Simulation observer trait for progress reporting and data collection.

use steer_agent::AgentStore;
use steer_behavior::ForceContribution;
use steer_core::Tick;

/// Aggregate motion statistics for one completed tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TickSummary {
    pub tick:         Tick,
    /// Simulated seconds at the end of this tick.
    pub elapsed_secs: f64,
    /// Live agents integrated this tick.
    pub agents:       usize,
    pub mean_speed:   f32,
    pub max_speed:    f32,
    /// Mean magnitude of the applied (clamped) steering force.
    pub mean_force:   f32,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         if summary.tick.0 % self.interval == 0 {
///             println!("{}: mean speed {:.1}", summary.tick, summary.mean_speed);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before the snapshot is taken.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after every agent has been integrated.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with the committed post-tick state.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &AgentStore) {}

    /// Per-behavior force breakdown for the tick.  Only called when
    /// `config.record_contributions` is set.
    fn on_forces(&mut self, _tick: Tick, _contributions: &[ForceContribution]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
