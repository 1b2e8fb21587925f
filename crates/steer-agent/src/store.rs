//! Core agent storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! The two are separate so the intent phase can hold `&AgentStore` for reads
//! while RNG state is borrowed mutably elsewhere.

use steer_core::{AgentId, AgentRng, Vec3};

use crate::{AgentConfig, AgentError, AgentResult, AgentTunables};

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state.
pub struct AgentRngs {
    seed:      u64,
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { seed: global_seed, inner }
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    /// Seed and append the RNG for a newly spawned agent.
    pub fn push(&mut self, agent: AgentId) -> &mut AgentRng {
        debug_assert_eq!(agent.index(), self.inner.len());
        self.inner.push(AgentRng::new(self.seed, agent));
        let last = self.inner.len() - 1;
        &mut self.inner[last]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` has exactly `count` elements and `AgentId` is the index into
/// all of them.  Position and velocity are the only simulation state; the
/// tick loop's apply phase is their single writer.
///
/// Removal marks a slot dead rather than compacting, so `AgentId`s held by
/// behaviors (pursuit targets, evade threats) stay stable.
pub struct AgentStore {
    /// Number of slots, dead ones included.
    pub count: usize,

    pub position: Vec<Vec3>,
    pub velocity: Vec<Vec3>,
    pub tunables: Vec<AgentTunables>,

    alive: Vec<bool>,
}

impl AgentStore {
    pub(crate) fn new(
        position: Vec<Vec3>,
        velocity: Vec<Vec3>,
        tunables: Vec<AgentTunables>,
    ) -> Self {
        let count = position.len();
        Self { count, position, velocity, tunables, alive: vec![true; count] }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Every slot in ascending index order, dead ones included.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// Live agents in ascending index order.
    pub fn live_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agent_ids().filter(|a| self.alive[a.index()])
    }

    pub fn live_count(&self) -> usize {
        self.alive.iter().filter(|a| **a).count()
    }

    #[inline]
    pub fn is_alive(&self, agent: AgentId) -> bool {
        self.alive.get(agent.index()).copied().unwrap_or(false)
    }

    #[inline]
    pub fn config(&self, agent: AgentId) -> AgentConfig {
        self.tunables[agent.index()].snapshot()
    }

    #[inline]
    pub fn speed(&self, agent: AgentId) -> f32 {
        self.velocity[agent.index()].length()
    }

    /// Append a new agent and return its id.
    pub fn push(&mut self, position: Vec3, velocity: Vec3, tunables: AgentTunables) -> AgentId {
        let id = AgentId(self.count as u32);
        self.position.push(position);
        self.velocity.push(velocity);
        self.tunables.push(tunables);
        self.alive.push(true);
        self.count += 1;
        id
    }

    /// Take an agent out of the simulation.  Its slot is never reused.
    pub fn remove(&mut self, agent: AgentId) -> AgentResult<()> {
        match self.alive.get_mut(agent.index()) {
            Some(alive) if *alive => {
                *alive = false;
                self.velocity[agent.index()] = Vec3::ZERO;
                Ok(())
            }
            _ => Err(AgentError::NotFound(agent)),
        }
    }
}
