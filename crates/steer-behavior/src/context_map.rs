//! Context steering: pick a direction from a discretized map instead of
//! summing forces.
//!
//! The circle is split into `N` equal sectors, sector `s` pointing at angle
//! `s / N · 2π`.  Each tick the map is rebuilt:
//!
//! * interest: `max(0, dir_s · normalize(velocity))`, a plain forward bias;
//! * danger: for each obstacle closer than `radius · range_factor`, the
//!   sector nearest its bearing gets `1 − d / range`, and the `spread`
//!   sectors on each side get that value scaled by `1 − i / (spread + 1)`.
//!   Overlapping dangers merge with `max`.
//!
//! The most desirable sector (`interest − danger`, floored at 0) wins.

use std::f32::consts::TAU;

use steer_core::Vec3;

use crate::error::{BehaviorError, positive};
use crate::{BehaviorResult, SteerContext, SteeringBehavior, SteeringForce};

pub const DEFAULT_SECTORS: usize = 16;
pub const DEFAULT_DANGER_SPREAD: usize = 2;
pub const DEFAULT_RANGE_FACTOR: f32 = 3.0;

// ── ContextMap ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct ContextMap {
    interest: Vec<f32>,
    danger:   Vec<f32>,
}

impl Default for ContextMap {
    fn default() -> Self {
        Self::new(DEFAULT_SECTORS)
    }
}

impl ContextMap {
    pub fn new(sectors: usize) -> Self {
        Self { interest: vec![0.0; sectors], danger: vec![0.0; sectors] }
    }

    #[inline]
    pub fn sectors(&self) -> usize {
        self.interest.len()
    }

    pub fn interest(&self) -> &[f32] {
        &self.interest
    }

    pub fn danger(&self) -> &[f32] {
        &self.danger
    }

    pub fn clear(&mut self) {
        self.interest.fill(0.0);
        self.danger.fill(0.0);
    }

    /// Unit direction of `sector`.
    pub fn direction(&self, sector: usize) -> Vec3 {
        Vec3::from_angle(sector as f32 / self.sectors() as f32 * TAU)
    }

    /// Sector whose direction is angularly closest to `dir`.
    pub fn sector_of(&self, dir: Vec3) -> usize {
        let n = self.sectors();
        if n == 0 {
            return 0;
        }
        let angle = dir.angle().rem_euclid(TAU);
        ((angle / TAU * n as f32).round() as usize) % n
    }

    /// Forward bias: each sector's interest is its alignment with `heading`.
    /// A zero heading leaves every sector uninteresting.
    pub fn fill_interest(&mut self, heading: Vec3) {
        let heading = heading.normalized();
        for s in 0..self.sectors() {
            self.interest[s] = self.direction(s).dot(heading).max(0.0);
        }
    }

    /// Mark `slot` with `danger` and fade it out over `spread` neighbors on
    /// each side.
    pub fn add_danger(&mut self, slot: usize, danger: f32, spread: usize) {
        let n = self.sectors();
        if n == 0 {
            return;
        }
        let slot = slot % n;
        self.danger[slot] = self.danger[slot].max(danger);
        for i in 1..=spread {
            let faded = danger * (1.0 - i as f32 / (spread + 1) as f32);
            let left = (slot + n - i % n) % n;
            let right = (slot + i) % n;
            self.danger[left] = self.danger[left].max(faded);
            self.danger[right] = self.danger[right].max(faded);
        }
    }

    pub fn desirability(&self, sector: usize) -> f32 {
        (self.interest[sector] - self.danger[sector]).max(0.0)
    }

    /// Sector with the highest positive desirability, lowest index on ties.
    pub fn best_sector(&self) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for s in 0..self.sectors() {
            let d = self.desirability(s);
            if d > best.map_or(0.0, |(_, b)| b) {
                best = Some((s, d));
            }
        }
        best.map(|(s, _)| s)
    }
}

// ── ContextSteering ───────────────────────────────────────────────────────────

/// Steering driven by a [`ContextMap`] instead of blended behaviors.
///
/// Obstacles are considered out to `agent radius · range_factor`.  When no
/// sector is desirable the result is [`SteeringForce::zero`] and the agent
/// coasts.
#[derive(Clone, Debug)]
pub struct ContextSteering {
    pub spread:       usize,
    pub range_factor: f32,
    map:              ContextMap,
}

impl Default for ContextSteering {
    fn default() -> Self {
        Self::new(DEFAULT_SECTORS)
    }
}

impl ContextSteering {
    pub fn new(sectors: usize) -> Self {
        Self {
            spread:       DEFAULT_DANGER_SPREAD,
            range_factor: DEFAULT_RANGE_FACTOR,
            map:          ContextMap::new(sectors),
        }
    }

    pub fn with_spread(mut self, spread: usize) -> Self {
        self.spread = spread;
        self
    }

    /// The map as built by the last evaluation.
    pub fn map(&self) -> &ContextMap {
        &self.map
    }

    fn rebuild(&mut self, ctx: &SteerContext<'_>) {
        self.map.clear();
        self.map.fill_interest(ctx.velocity);

        let range = ctx.config.radius * self.range_factor;
        if range <= 0.0 {
            return;
        }
        for obstacle in ctx.world.nearby_obstacles(ctx.position, range) {
            let to_obstacle = obstacle.position - ctx.position;
            let distance = to_obstacle.length();
            if distance >= range {
                continue;
            }
            let slot = self.map.sector_of(to_obstacle);
            self.map.add_danger(slot, 1.0 - distance / range, self.spread);
        }
    }
}

impl SteeringBehavior for ContextSteering {
    fn name(&self) -> &'static str {
        "context"
    }

    fn calculate_steering(&mut self, ctx: &SteerContext<'_>) -> SteeringForce {
        self.rebuild(ctx);
        match self.map.best_sector() {
            Some(s) => ctx.output(self.map.direction(s) * ctx.config.max_speed - ctx.velocity),
            None => SteeringForce::zero(),
        }
    }

    fn validate(&self) -> BehaviorResult<()> {
        if self.map.sectors() == 0 {
            return Err(BehaviorError::Config("context steering needs at least one sector".into()));
        }
        positive(self.name(), "range_factor", self.range_factor)
    }
}
