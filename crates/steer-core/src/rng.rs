//! Deterministic per-agent and simulation-level RNG wrappers.
//!
//! Each agent owns a `SmallRng` seeded by
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! where the constant is the 64-bit fractional golden ratio.  Agents never
//! share RNG state, and appending agents leaves earlier seeds untouched, so a
//! scenario replays identically for a given seed.

use std::f32::consts::TAU;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{AgentId, Vec3, WorldBounds};

const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG.
pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniformly distributed unit vector in the XY plane.
    pub fn unit_heading(&mut self) -> Vec3 {
        Vec3::from_angle(self.0.gen_range(0.0..TAU))
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for scenario setup (spawn positions, tunables).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent child stream.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform point inside `bounds`, shrunk by `margin` on every side.
    pub fn point_in(&mut self, bounds: &WorldBounds, margin: f32) -> Vec3 {
        let hw = (bounds.half_width - margin).max(0.0);
        let hh = (bounds.half_height - margin).max(0.0);
        Vec3::xy(self.0.gen_range(-hw..=hw), self.0.gen_range(-hh..=hh))
    }

    /// Uniformly distributed unit vector in the XY plane.
    pub fn unit_heading(&mut self) -> Vec3 {
        Vec3::from_angle(self.0.gen_range(0.0..TAU))
    }
}
