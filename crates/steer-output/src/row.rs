//! Plain data row types written by output backends.

/// One agent's kinematic state at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id:  u32,
    pub tick:      u64,
    /// Simulated seconds at the end of `tick`.
    pub time_secs: f64,
    pub x:         f32,
    pub y:         f32,
    pub vx:        f32,
    pub vy:        f32,
    pub speed:     f32,
}

/// Aggregate motion for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:       u64,
    pub time_secs:  f64,
    pub agents:     u64,
    pub mean_speed: f32,
    pub max_speed:  f32,
    pub mean_force: f32,
}

/// One behavior's weighted force on one agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceRow {
    pub tick:      u64,
    pub agent_id:  u32,
    pub behavior:  &'static str,
    pub fx:        f32,
    pub fy:        f32,
    pub magnitude: f32,
}
