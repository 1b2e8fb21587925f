//! Per-agent movement limits.
//!
//! `AgentTunables` is the host-editable copy stored in the SoA arrays.  At the
//! start of every tick the simulation copies it into an `AgentConfig`, which
//! is what behaviors read; edits made mid-tick take effect on the next tick.

use steer_core::AgentId;

use crate::{AgentError, AgentResult};

/// Host-editable movement limits for one agent.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentTunables {
    /// Speed cap in world units per second.
    pub max_speed: f32,
    /// Cap on the magnitude of the summed steering force.
    pub max_force: f32,
    /// Acceleration = force / mass.  Must be positive.
    pub mass:      f32,
    /// Collision radius used by obstacle avoidance and context steering.
    pub radius:    f32,
}

impl Default for AgentTunables {
    fn default() -> Self {
        Self { max_speed: 200.0, max_force: 100.0, mass: 1.0, radius: 20.0 }
    }
}

impl AgentTunables {
    pub fn new(max_speed: f32, max_force: f32, mass: f32, radius: f32) -> Self {
        Self { max_speed, max_force, mass, radius }
    }

    /// Check the invariants the integrator relies on.  `agent` only labels
    /// the error.
    pub fn validate(&self, agent: AgentId) -> AgentResult<()> {
        let fields = [
            ("max_speed", self.max_speed),
            ("max_force", self.max_force),
            ("mass",      self.mass),
            ("radius",    self.radius),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(AgentError::InvalidTunables { agent, field, expected: "finite and >= 0", value });
            }
        }
        if self.mass <= 0.0 {
            return Err(AgentError::InvalidTunables { agent, field: "mass", expected: "> 0", value: self.mass });
        }
        Ok(())
    }

    /// Freeze the current values for one tick.
    #[inline]
    pub fn snapshot(&self) -> AgentConfig {
        AgentConfig {
            max_speed: self.max_speed,
            max_force: self.max_force,
            mass:      self.mass,
            radius:    self.radius,
        }
    }
}

/// Read-only movement limits for the duration of one tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AgentConfig {
    pub max_speed: f32,
    pub max_force: f32,
    pub mass:      f32,
    pub radius:    f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentTunables::default().snapshot()
    }
}
