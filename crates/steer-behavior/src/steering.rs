//! An agent's complete steering setup.

use steer_core::Vec3;

use crate::{Behavior, BehaviorResult, ContextSteering, ForceContribution, SteerContext, SteeringBehavior};

/// Either a weighted blend of behaviors or a context map.
///
/// `steer` returns the total force *before* the `max_force` clamp; the
/// simulation applies the clamp and integrates.
#[derive(Debug)]
pub enum AgentSteering {
    Blended(Vec<Behavior>),
    Context(ContextSteering),
}

impl Default for AgentSteering {
    fn default() -> Self {
        AgentSteering::Blended(Vec::new())
    }
}

impl From<Vec<Behavior>> for AgentSteering {
    fn from(behaviors: Vec<Behavior>) -> Self {
        AgentSteering::Blended(behaviors)
    }
}

impl From<ContextSteering> for AgentSteering {
    fn from(c: ContextSteering) -> Self {
        AgentSteering::Context(c)
    }
}

impl AgentSteering {
    /// Sum of weighted forces for this tick.
    ///
    /// Enabled behaviors are evaluated in list order.  When `trace` is given,
    /// one [`ForceContribution`] per non-zero contribution is appended.
    pub fn steer(&mut self, ctx: &SteerContext<'_>, mut trace: Option<&mut Vec<ForceContribution>>) -> Vec3 {
        let mut record = |behavior: &'static str, force: Vec3| {
            if let Some(t) = trace.as_deref_mut() {
                if !force.is_zero() {
                    t.push(ForceContribution { agent: ctx.agent, behavior, force });
                }
            }
        };

        match self {
            AgentSteering::Blended(behaviors) => {
                let mut total = Vec3::ZERO;
                for b in behaviors.iter_mut().filter(|b| b.enabled) {
                    let f = b.weighted_steering(ctx).weighted_force();
                    record(b.name(), f);
                    total += f;
                }
                total
            }
            AgentSteering::Context(c) => {
                let f = c.calculate_steering(ctx).weighted_force();
                if !f.is_finite() {
                    return Vec3::ZERO;
                }
                record(c.name(), f);
                f
            }
        }
    }

    pub fn validate(&self) -> BehaviorResult<()> {
        match self {
            AgentSteering::Blended(behaviors) => behaviors.iter().try_for_each(Behavior::validate),
            AgentSteering::Context(c) => c.validate(),
        }
    }

    /// Switch off whatever fails validation and return the first failure.
    ///
    /// Invalid blended behaviors are disabled in place; an invalid context
    /// map is replaced by an empty blend.
    pub fn disable_invalid(&mut self) -> BehaviorResult<()> {
        match self {
            AgentSteering::Blended(behaviors) => {
                let mut first = Ok(());
                for b in behaviors.iter_mut().filter(|b| b.enabled) {
                    if let Err(e) = b.validate() {
                        b.enabled = false;
                        if first.is_ok() {
                            first = Err(e);
                        }
                    }
                }
                first
            }
            AgentSteering::Context(c) => {
                let result = c.validate();
                if result.is_err() {
                    *self = AgentSteering::default();
                }
                result
            }
        }
    }

    /// The blended behaviors; empty for context steering.
    pub fn behaviors(&self) -> &[Behavior] {
        match self {
            AgentSteering::Blended(behaviors) => behaviors,
            AgentSteering::Context(_) => &[],
        }
    }

    pub fn behaviors_mut(&mut self) -> Option<&mut Vec<Behavior>> {
        match self {
            AgentSteering::Blended(behaviors) => Some(behaviors),
            AgentSteering::Context(_) => None,
        }
    }

    /// Append a behavior.  Switches context steering over to blending.
    pub fn push(&mut self, behavior: Behavior) {
        match self {
            AgentSteering::Blended(behaviors) => behaviors.push(behavior),
            AgentSteering::Context(_) => *self = AgentSteering::Blended(vec![behavior]),
        }
    }

    pub fn is_context(&self) -> bool {
        matches!(self, AgentSteering::Context(_))
    }
}
