//! What seek-like behaviors steer relative to.

use std::fmt;

use steer_core::{AgentId, Vec3};
use steer_spatial::AgentView;

use crate::SteerContext;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Target {
    /// A fixed world position.
    Point(Vec3),
    /// Another agent, read from the tick snapshot.
    Agent(AgentId),
}

impl Target {
    /// Current position of the target, or `None` if the tracked agent is
    /// absent from the world.
    pub fn position(&self, ctx: &SteerContext<'_>) -> Option<Vec3> {
        match *self {
            Target::Point(p) => Some(p),
            Target::Agent(id) => ctx.world.agent(id).map(|a| a.position),
        }
    }

    /// The tracked agent's view.  `None` for fixed points and absent agents.
    pub fn agent_view(&self, ctx: &SteerContext<'_>) -> Option<AgentView> {
        match *self {
            Target::Point(_) => None,
            Target::Agent(id) => ctx.world.agent(id),
        }
    }
}

impl From<Vec3> for Target {
    fn from(p: Vec3) -> Self {
        Target::Point(p)
    }
}

impl From<AgentId> for Target {
    fn from(id: AgentId) -> Self {
        Target::Agent(id)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Point(p) => write!(f, "point {p}"),
            Target::Agent(id) => write!(f, "{id}"),
        }
    }
}

// ── Missing-target warning ────────────────────────────────────────────────────

/// Emits the "missing target" warning at most once per behavior instance.
#[derive(Clone, Debug, Default)]
pub(crate) struct WarnOnce(bool);

impl WarnOnce {
    pub(crate) fn missing(&mut self, behavior: &str, agent: AgentId, what: fmt::Arguments<'_>) {
        if !self.0 {
            self.0 = true;
            log::warn!("{behavior} on {agent}: {what}; contributing no steering");
        }
    }

    /// Re-arm after the host supplies a new target.
    pub(crate) fn reset(&mut self) {
        self.0 = false;
    }
}
