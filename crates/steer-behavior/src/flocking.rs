//! Separation, Alignment, Cohesion, and the composite Flock.
//!
//! All three base rules consider only neighbors with `0 < distance < radius`
//! and return [`SteeringForce::zero`] when there are none.  Alignment and
//! Cohesion weight each neighbor by `1 - distance / radius`; Separation
//! weights by `1 / distance`.

use steer_core::Vec3;

use crate::error::{non_negative, positive};
use crate::{BehaviorResult, SteerContext, SteeringBehavior, SteeringForce};

pub const DEFAULT_SEPARATION_RADIUS: f32 = 50.0;
pub const DEFAULT_ALIGNMENT_RADIUS: f32 = 80.0;
pub const DEFAULT_COHESION_RADIUS: f32 = 100.0;

// ── Separation ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Separation {
    pub radius:     f32,
    pub multiplier: f32,
}

impl Default for Separation {
    fn default() -> Self {
        Self { radius: DEFAULT_SEPARATION_RADIUS, multiplier: 1.0 }
    }
}

impl Separation {
    pub fn new(radius: f32) -> Self {
        Self { radius, ..Default::default() }
    }

    pub fn neighbor_count(&self, ctx: &SteerContext<'_>) -> usize {
        ctx.neighbors(self.radius).len()
    }

    pub fn is_active(&self, ctx: &SteerContext<'_>) -> bool {
        self.neighbor_count(ctx) > 0
    }

    /// Mean distance to the neighbors; `radius` when alone.
    pub fn average_neighbor_distance(&self, ctx: &SteerContext<'_>) -> f32 {
        let neighbors = ctx.neighbors(self.radius);
        if neighbors.is_empty() {
            return self.radius;
        }
        neighbors.iter().map(|n| n.distance).sum::<f32>() / neighbors.len() as f32
    }
}

impl SteeringBehavior for Separation {
    fn name(&self) -> &'static str {
        "separation"
    }

    fn calculate_steering(&mut self, ctx: &SteerContext<'_>) -> SteeringForce {
        let neighbors = ctx.neighbors(self.radius);
        if neighbors.is_empty() {
            return SteeringForce::zero();
        }
        let push: Vec3 = neighbors
            .iter()
            .map(|n| (ctx.position - n.view.position).normalized() / n.distance)
            .sum();
        let desired = push.normalized() * ctx.config.max_speed;
        ctx.output((desired - ctx.velocity) * self.multiplier)
    }

    fn validate(&self) -> BehaviorResult<()> {
        non_negative(self.name(), "radius", self.radius)?;
        non_negative(self.name(), "multiplier", self.multiplier)
    }
}

// ── Alignment ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Alignment {
    pub radius:     f32,
    pub multiplier: f32,
}

impl Default for Alignment {
    fn default() -> Self {
        Self { radius: DEFAULT_ALIGNMENT_RADIUS, multiplier: 1.0 }
    }
}

impl Alignment {
    pub fn new(radius: f32) -> Self {
        Self { radius, ..Default::default() }
    }

    fn weighted_velocity_sum(&self, ctx: &SteerContext<'_>) -> Option<Vec3> {
        let neighbors = ctx.neighbors(self.radius);
        if neighbors.is_empty() {
            return None;
        }
        Some(
            neighbors
                .iter()
                .map(|n| n.view.velocity * (1.0 - n.distance / self.radius))
                .sum(),
        )
    }

    pub fn neighbor_count(&self, ctx: &SteerContext<'_>) -> usize {
        ctx.neighbors(self.radius).len()
    }

    pub fn is_active(&self, ctx: &SteerContext<'_>) -> bool {
        self.neighbor_count(ctx) > 0
    }

    /// Unit direction of the neighbors' mean velocity; own heading when
    /// alone or when the neighbors cancel out.
    pub fn average_heading(&self, ctx: &SteerContext<'_>) -> Vec3 {
        let neighbors = ctx.neighbors(self.radius);
        let sum: Vec3 = neighbors.iter().map(|n| n.view.velocity).sum();
        if sum.is_zero() { ctx.heading() } else { sum.normalized() }
    }

    /// Cosine between own heading and the neighbors' mean heading.
    pub fn alignment_strength(&self, ctx: &SteerContext<'_>) -> f32 {
        ctx.heading().dot(self.average_heading(ctx))
    }
}

impl SteeringBehavior for Alignment {
    fn name(&self) -> &'static str {
        "alignment"
    }

    fn calculate_steering(&mut self, ctx: &SteerContext<'_>) -> SteeringForce {
        let Some(sum) = self.weighted_velocity_sum(ctx) else {
            return SteeringForce::zero();
        };
        if sum.is_zero() {
            return SteeringForce::zero();
        }
        let desired = sum.normalized() * ctx.config.max_speed;
        ctx.output((desired - ctx.velocity) * self.multiplier)
    }

    fn validate(&self) -> BehaviorResult<()> {
        positive(self.name(), "radius", self.radius)?;
        non_negative(self.name(), "multiplier", self.multiplier)
    }
}

// ── Cohesion ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Cohesion {
    pub radius:     f32,
    pub multiplier: f32,
}

impl Default for Cohesion {
    fn default() -> Self {
        Self { radius: DEFAULT_COHESION_RADIUS, multiplier: 1.0 }
    }
}

impl Cohesion {
    pub fn new(radius: f32) -> Self {
        Self { radius, ..Default::default() }
    }

    /// Proximity-weighted mean of neighbor positions.
    ///
    /// `None` when there is no neighbor with positive weight.
    fn weighted_center(&self, ctx: &SteerContext<'_>) -> Option<Vec3> {
        let mut sum = Vec3::ZERO;
        let mut total = 0.0;
        for n in ctx.neighbors(self.radius) {
            let w = 1.0 - n.distance / self.radius;
            sum += n.view.position * w;
            total += w;
        }
        (total > 0.0).then(|| sum / total)
    }

    pub fn neighbor_count(&self, ctx: &SteerContext<'_>) -> usize {
        ctx.neighbors(self.radius).len()
    }

    pub fn is_active(&self, ctx: &SteerContext<'_>) -> bool {
        self.neighbor_count(ctx) > 0
    }

    /// Unweighted centroid of the neighbors; own position when alone.
    pub fn center_of_mass(&self, ctx: &SteerContext<'_>) -> Vec3 {
        let neighbors = ctx.neighbors(self.radius);
        if neighbors.is_empty() {
            return ctx.position;
        }
        neighbors.iter().map(|n| n.view.position).sum::<Vec3>() / neighbors.len() as f32
    }

    /// 1 at the centroid, falling to 0 at `radius`.
    pub fn cohesion_strength(&self, ctx: &SteerContext<'_>) -> f32 {
        let d = self.center_of_mass(ctx).distance(ctx.position);
        if d >= self.radius { 0.0 } else { 1.0 - d / self.radius }
    }
}

impl SteeringBehavior for Cohesion {
    fn name(&self) -> &'static str {
        "cohesion"
    }

    fn calculate_steering(&mut self, ctx: &SteerContext<'_>) -> SteeringForce {
        match self.weighted_center(ctx) {
            Some(center) => ctx.output(ctx.seek(center) * self.multiplier),
            None => SteeringForce::zero(),
        }
    }

    fn validate(&self) -> BehaviorResult<()> {
        positive(self.name(), "radius", self.radius)?;
        non_negative(self.name(), "multiplier", self.multiplier)
    }
}

// ── Flock ─────────────────────────────────────────────────────────────────────

/// Separation, Alignment and Cohesion blended by their own sub-weights.
///
/// The blend is normalized by the sub-weight sum, so the flock's force scale
/// does not depend on how many sub-weights are set.  A zero sum yields zero.
#[derive(Clone, Debug)]
pub struct Flock {
    pub separation:        Separation,
    pub alignment:         Alignment,
    pub cohesion:          Cohesion,
    pub separation_weight: f32,
    pub alignment_weight:  f32,
    pub cohesion_weight:   f32,
}

impl Default for Flock {
    fn default() -> Self {
        Self {
            separation:        Separation::default(),
            alignment:         Alignment::default(),
            cohesion:          Cohesion::default(),
            separation_weight: 2.0,
            alignment_weight:  1.0,
            cohesion_weight:   1.0,
        }
    }
}

impl Flock {
    pub fn with_radii(mut self, separation: f32, alignment: f32, cohesion: f32) -> Self {
        self.separation.radius = separation;
        self.alignment.radius = alignment;
        self.cohesion.radius = cohesion;
        self
    }

    pub fn with_weights(mut self, separation: f32, alignment: f32, cohesion: f32) -> Self {
        self.separation_weight = separation;
        self.alignment_weight = alignment;
        self.cohesion_weight = cohesion;
        self
    }

    fn widest_radius(&self) -> f32 {
        self.separation.radius.max(self.alignment.radius).max(self.cohesion.radius)
    }

    /// Neighbors within the widest of the three radii.
    pub fn neighbor_count(&self, ctx: &SteerContext<'_>) -> usize {
        ctx.neighbors(self.widest_radius()).len()
    }

    pub fn flock_center(&self, ctx: &SteerContext<'_>) -> Vec3 {
        self.cohesion.center_of_mass(ctx)
    }

    pub fn flock_velocity(&self, ctx: &SteerContext<'_>) -> Vec3 {
        self.alignment.average_heading(ctx) * ctx.config.max_speed
    }
}

impl SteeringBehavior for Flock {
    fn name(&self) -> &'static str {
        "flock"
    }

    fn calculate_steering(&mut self, ctx: &SteerContext<'_>) -> SteeringForce {
        let total_weight = self.separation_weight + self.alignment_weight + self.cohesion_weight;
        if total_weight <= 0.0 {
            return SteeringForce::zero();
        }
        let blended = self.separation.calculate_steering(ctx).weighted_force() * self.separation_weight
            + self.alignment.calculate_steering(ctx).weighted_force() * self.alignment_weight
            + self.cohesion.calculate_steering(ctx).weighted_force() * self.cohesion_weight;
        ctx.output(blended / total_weight)
    }

    fn validate(&self) -> BehaviorResult<()> {
        self.separation.validate()?;
        self.alignment.validate()?;
        self.cohesion.validate()?;
        non_negative(self.name(), "separation_weight", self.separation_weight)?;
        non_negative(self.name(), "alignment_weight", self.alignment_weight)?;
        non_negative(self.name(), "cohesion_weight", self.cohesion_weight)
    }
}
