//! Steering forces.

use steer_core::{AgentId, Vec3};

/// A directional push paired with an importance weight.
///
/// `weight` is in `[0, ∞)`.  Weight 0 means "inert this tick"; a disabled
/// behavior is never evaluated at all.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SteeringForce {
    pub force:  Vec3,
    pub weight: f32,
}

impl SteeringForce {
    #[inline]
    pub fn new(force: Vec3, weight: f32) -> Self {
        Self { force, weight }
    }

    /// The canonical "no contribution" result.
    #[inline]
    pub fn zero() -> Self {
        Self { force: Vec3::ZERO, weight: 0.0 }
    }

    #[inline]
    pub fn weighted_force(&self) -> Vec3 {
        self.force * self.weight
    }

    /// Clamp the weighted magnitude to `max_force`, rescaling the stored
    /// unweighted force so `weight` keeps its meaning.
    pub fn limit(mut self, max_force: f32) -> Self {
        let weighted = self.weighted_force();
        if self.weight > 0.0 && weighted.length_sq() > max_force * max_force {
            self.force = weighted.limited(max_force) / self.weight;
        }
        self
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.weighted_force().is_zero()
    }
}

/// One behavior's weighted share of an agent's total force for one tick.
///
/// Recorded only on request; presentation layers draw these as force lines.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ForceContribution {
    pub agent:    AgentId,
    pub behavior: &'static str,
    pub force:    Vec3,
}
