//! The `WorldQuery` trait and a brute-force implementation.

use steer_core::{AgentId, Vec3, WorldBounds};

use crate::{AgentView, ObstacleField, ObstacleView, Wall, boundary_walls};

/// Read-only access to the world around a point.
///
/// Radii are inclusive (`distance <= radius`) and distances are full 3D.
/// `nearby_agents` includes an agent standing exactly at `pos`, which means
/// callers querying around themselves see their own view; behaviors drop it
/// by ignoring neighbors at zero distance.
///
/// `Sync` so one snapshot can serve every worker of a parallel intent phase.
pub trait WorldQuery: Sync {
    fn nearby_agents(&self, pos: Vec3, radius: f32) -> Vec<AgentView>;

    fn nearby_obstacles(&self, pos: Vec3, radius: f32) -> Vec<ObstacleView>;

    /// Look up a single agent by id.  `None` if it is absent or removed.
    fn agent(&self, id: AgentId) -> Option<AgentView>;

    /// Walls within `radius` of `pos`.  Worlds without walls return nothing.
    fn walls_near(&self, _pos: Vec3, _radius: f32) -> Vec<Wall> {
        Vec::new()
    }
}

// ── LinearScan ────────────────────────────────────────────────────────────────

/// Scans every agent and obstacle on each query.
///
/// O(n) per query.  Serves as the reference answer for the indexed
/// [`WorldSnapshot`](crate::WorldSnapshot) and backs the live-read tick mode,
/// where the agent slice is patched in place between agents.
pub struct LinearScan<'a> {
    agents:    &'a [AgentView],
    obstacles: &'a ObstacleField,
    bounds:    Option<WorldBounds>,
}

impl<'a> LinearScan<'a> {
    pub fn new(agents: &'a [AgentView], obstacles: &'a ObstacleField) -> Self {
        Self { agents, obstacles, bounds: None }
    }

    /// Report the edges of `bounds` as walls.
    pub fn with_walls(mut self, bounds: WorldBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

impl WorldQuery for LinearScan<'_> {
    fn nearby_agents(&self, pos: Vec3, radius: f32) -> Vec<AgentView> {
        self.agents
            .iter()
            .filter(|a| a.position.distance(pos) <= radius)
            .copied()
            .collect()
    }

    fn nearby_obstacles(&self, pos: Vec3, radius: f32) -> Vec<ObstacleView> {
        self.obstacles
            .iter()
            .filter(|o| o.position.distance(pos) <= radius)
            .collect()
    }

    fn agent(&self, id: AgentId) -> Option<AgentView> {
        self.agents.iter().find(|a| a.id == id).copied()
    }

    fn walls_near(&self, pos: Vec3, radius: f32) -> Vec<Wall> {
        match &self.bounds {
            Some(b) => boundary_walls(b, pos, radius),
            None => Vec::new(),
        }
    }
}
