//! Read-only value views handed to behaviors.

use steer_core::{AgentId, ObstacleId, Vec3};

/// Radius given to obstacles created without an explicit one.
pub const DEFAULT_OBSTACLE_RADIUS: f32 = 25.0;

/// Another agent as seen from inside a tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AgentView {
    pub id:       AgentId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius:   f32,
}

impl AgentView {
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// A static obstacle as seen from inside a tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ObstacleView {
    pub id:       ObstacleId,
    pub position: Vec3,
    pub radius:   f32,
}

/// Static circular obstacle owned by the world.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub position: Vec3,
    pub radius:   f32,
}

impl Obstacle {
    pub fn new(position: Vec3) -> Self {
        Self { position, radius: DEFAULT_OBSTACLE_RADIUS }
    }

    pub fn with_radius(position: Vec3, radius: f32) -> Self {
        Self { position, radius }
    }

    pub(crate) fn view(&self, id: ObstacleId) -> ObstacleView {
        ObstacleView { id, position: self.position, radius: self.radius }
    }
}
