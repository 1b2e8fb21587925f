//! Per-agent, per-tick read-only state passed to every behavior.

use steer_agent::AgentConfig;
use steer_core::{AgentId, Vec3};
use steer_spatial::{AgentView, WorldQuery};

use crate::SteeringForce;

/// A neighbor strictly inside a query radius, with its distance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Neighbor {
    pub view:     AgentView,
    pub distance: f32,
}

/// What one agent sees during the intent phase.
///
/// Built by the simulation from the tick snapshot: `position`, `velocity`
/// and `config` are the agent's committed values at tick start, and `world`
/// answers every neighbor, obstacle and wall query.
#[derive(Copy, Clone)]
pub struct SteerContext<'a> {
    pub agent:    AgentId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub config:   AgentConfig,
    pub world:    &'a dyn WorldQuery,
}

impl<'a> SteerContext<'a> {
    #[inline]
    pub fn new(
        agent:    AgentId,
        position: Vec3,
        velocity: Vec3,
        config:   AgentConfig,
        world:    &'a dyn WorldQuery,
    ) -> Self {
        Self { agent, position, velocity, config, world }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Unit velocity, or `+X` for a stationary agent.
    #[inline]
    pub fn heading(&self) -> Vec3 {
        if self.velocity.is_zero() { Vec3::X } else { self.velocity.normalized() }
    }

    /// Steer that turns the current velocity into full speed toward `target`.
    /// Not clamped.
    #[inline]
    pub fn seek(&self, target: Vec3) -> Vec3 {
        (target - self.position).normalized() * self.config.max_speed - self.velocity
    }

    /// Steer that turns the current velocity into full speed away from
    /// `target`.  Not clamped.
    #[inline]
    pub fn flee(&self, target: Vec3) -> Vec3 {
        (self.position - target).normalized() * self.config.max_speed - self.velocity
    }

    /// Other agents with `0 < distance < radius`, in ascending id order.
    pub fn neighbors(&self, radius: f32) -> Vec<Neighbor> {
        self.world
            .nearby_agents(self.position, radius)
            .into_iter()
            .filter(|a| a.id != self.agent)
            .filter_map(|view| {
                let distance = view.position.distance(self.position);
                (distance > 0.0 && distance < radius).then_some(Neighbor { view, distance })
            })
            .collect()
    }

    /// Final result of a behavior: `steer` clamped to `max_force`, weight 1.
    #[inline]
    pub fn output(&self, steer: Vec3) -> SteeringForce {
        SteeringForce::new(steer, 1.0).limit(self.config.max_force)
    }
}
