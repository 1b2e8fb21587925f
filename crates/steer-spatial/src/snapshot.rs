//! Indexed world views.
//!
//! # Spatial index
//!
//! Both structures keep an R-tree (via `rstar`) over the XY projection of
//! their entries.  A planar radius query returns a superset of the true 3D
//! neighborhood (planar distance never exceeds 3D distance), which is then
//! filtered exactly.
//!
//! `ObstacleField` is built once; obstacles never move.  `WorldSnapshot` is
//! rebuilt at the start of every tick from the committed agent state and is
//! immutable until the tick ends.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use steer_core::{AgentId, ObstacleId, Vec3, WorldBounds};

use crate::{
    AgentView, Obstacle, ObstacleView, SpatialError, SpatialResult, Wall, WorldQuery,
    boundary_walls,
};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// `[x, y]` point plus the index of the entry it stands for.
#[derive(Clone)]
struct PlanarEntry {
    point: [f32; 2],
    slot:  u32,
}

impl PlanarEntry {
    fn new(p: Vec3, slot: usize) -> Self {
        Self { point: [p.x, p.y], slot: slot as u32 }
    }
}

impl RTreeObject for PlanarEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for PlanarEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

fn planar_candidates(
    index:  &RTree<PlanarEntry>,
    pos:    Vec3,
    radius: f32,
) -> impl Iterator<Item = usize> + '_ {
    // Negative or NaN radii find nothing.
    let r2 = if radius >= 0.0 { radius * radius } else { -1.0 };
    index
        .locate_within_distance([pos.x, pos.y], r2)
        .map(|e| e.slot as usize)
}

// ── ObstacleField ─────────────────────────────────────────────────────────────

/// The static obstacle set.  `ObstacleId` is the insertion index.
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    index:     RTree<PlanarEntry>,
}

impl ObstacleField {
    pub fn empty() -> Self {
        Self { obstacles: Vec::new(), index: RTree::new() }
    }

    /// Validate and index `obstacles`.
    pub fn new(obstacles: Vec<Obstacle>) -> SpatialResult<Self> {
        for (i, o) in obstacles.iter().enumerate() {
            let id = ObstacleId(i as u32);
            if !o.position.is_finite() {
                return Err(SpatialError::InvalidObstacle { id, reason: "non-finite position".into() });
            }
            if !o.radius.is_finite() || o.radius < 0.0 {
                return Err(SpatialError::InvalidObstacle {
                    id,
                    reason: format!("radius must be finite and non-negative (got {})", o.radius),
                });
            }
        }
        let entries = obstacles
            .iter()
            .enumerate()
            .map(|(i, o)| PlanarEntry::new(o.position, i))
            .collect();
        Ok(Self { obstacles, index: RTree::bulk_load(entries) })
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn get(&self, id: ObstacleId) -> SpatialResult<&Obstacle> {
        self.obstacles.get(id.index()).ok_or(SpatialError::ObstacleNotFound(id))
    }

    /// Every obstacle as a view, in id order.
    pub fn iter(&self) -> impl Iterator<Item = ObstacleView> + '_ {
        self.obstacles
            .iter()
            .enumerate()
            .map(|(i, o)| o.view(ObstacleId(i as u32)))
    }

    /// Obstacles whose centre lies within `radius` of `pos`, in id order.
    pub fn within(&self, pos: Vec3, radius: f32) -> Vec<ObstacleView> {
        let mut slots: Vec<usize> = planar_candidates(&self.index, pos, radius)
            .filter(|&s| self.obstacles[s].position.distance(pos) <= radius)
            .collect();
        slots.sort_unstable();
        slots
            .into_iter()
            .map(|s| self.obstacles[s].view(ObstacleId(s as u32)))
            .collect()
    }
}

impl Default for ObstacleField {
    fn default() -> Self {
        Self::empty()
    }
}

// ── WorldSnapshot ─────────────────────────────────────────────────────────────

/// Immutable view of every live agent at the start of a tick.
pub struct WorldSnapshot<'a> {
    agents:    Vec<AgentView>,
    /// `AgentId` index → position in `agents`, `u32::MAX` when absent.
    slot_of:   Vec<u32>,
    index:     RTree<PlanarEntry>,
    obstacles: &'a ObstacleField,
    bounds:    Option<WorldBounds>,
}

impl<'a> WorldSnapshot<'a> {
    pub fn new(agents: Vec<AgentView>, obstacles: &'a ObstacleField) -> Self {
        let max_id = agents.iter().map(|a| a.id.index() + 1).max().unwrap_or(0);
        let mut slot_of = vec![u32::MAX; max_id];
        for (slot, a) in agents.iter().enumerate() {
            slot_of[a.id.index()] = slot as u32;
        }
        let entries = agents
            .iter()
            .enumerate()
            .map(|(slot, a)| PlanarEntry::new(a.position, slot))
            .collect();
        Self { agents, slot_of, index: RTree::bulk_load(entries), obstacles, bounds: None }
    }

    /// Report the edges of `bounds` as walls.
    pub fn with_walls(mut self, bounds: WorldBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// All agent views in the order they were supplied.
    pub fn agents(&self) -> &[AgentView] {
        &self.agents
    }

    pub fn obstacles(&self) -> &ObstacleField {
        self.obstacles
    }
}

impl WorldQuery for WorldSnapshot<'_> {
    /// Neighbors in ascending `AgentId` order, so floating-point sums over
    /// them do not depend on R-tree layout.
    fn nearby_agents(&self, pos: Vec3, radius: f32) -> Vec<AgentView> {
        let mut slots: Vec<usize> = planar_candidates(&self.index, pos, radius)
            .filter(|&s| self.agents[s].position.distance(pos) <= radius)
            .collect();
        slots.sort_unstable_by_key(|&s| self.agents[s].id);
        slots.into_iter().map(|s| self.agents[s]).collect()
    }

    fn nearby_obstacles(&self, pos: Vec3, radius: f32) -> Vec<ObstacleView> {
        self.obstacles.within(pos, radius)
    }

    fn agent(&self, id: AgentId) -> Option<AgentView> {
        let slot = *self.slot_of.get(id.index())?;
        self.agents.get(slot as usize).copied()
    }

    fn walls_near(&self, pos: Vec3, radius: f32) -> Vec<Wall> {
        match &self.bounds {
            Some(b) => boundary_walls(b, pos, radius),
            None => Vec::new(),
        }
    }
}
