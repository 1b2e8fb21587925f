//! Seek, Flee and Arrive: steering relative to a single target.

use crate::error::{non_negative, positive};
use crate::target::WarnOnce;
use crate::{BehaviorResult, SteerContext, SteeringBehavior, SteeringForce, Target};

pub const DEFAULT_FLEE_RADIUS: f32 = 200.0;
pub const DEFAULT_ARRIVAL_RADIUS: f32 = 20.0;
pub const DEFAULT_SLOW_DOWN_RADIUS: f32 = 100.0;

/// Resolve `target` or record the missing-dependency warning.
macro_rules! resolve_or_zero {
    ($self:ident, $ctx:ident) => {
        match $self.target.and_then(|t| t.position($ctx)) {
            Some(p) => p,
            None => {
                let name = $self.name();
                match $self.target {
                    Some(t) => $self.warn.missing(name, $ctx.agent, format_args!("{t} is not in the world")),
                    None => $self.warn.missing(name, $ctx.agent, format_args!("no target set")),
                }
                return SteeringForce::zero();
            }
        }
    };
}

// ── Seek ──────────────────────────────────────────────────────────────────────

/// Full speed toward the target.
#[derive(Clone, Debug, Default)]
pub struct Seek {
    pub target: Option<Target>,
    warn:       WarnOnce,
}

impl Seek {
    pub fn new(target: impl Into<Target>) -> Self {
        Self { target: Some(target.into()), warn: WarnOnce::default() }
    }

    pub fn set_target(&mut self, target: impl Into<Target>) {
        self.target = Some(target.into());
        self.warn.reset();
    }
}

impl SteeringBehavior for Seek {
    fn name(&self) -> &'static str {
        "seek"
    }

    fn calculate_steering(&mut self, ctx: &SteerContext<'_>) -> SteeringForce {
        let target = resolve_or_zero!(self, ctx);
        ctx.output(ctx.seek(target))
    }
}

// ── Flee ──────────────────────────────────────────────────────────────────────

/// Away from the target, fading out linearly to nothing at `flee_radius`.
#[derive(Clone, Debug)]
pub struct Flee {
    pub target:      Option<Target>,
    pub flee_radius: f32,
    warn:            WarnOnce,
}

impl Default for Flee {
    fn default() -> Self {
        Self { target: None, flee_radius: DEFAULT_FLEE_RADIUS, warn: WarnOnce::default() }
    }
}

impl Flee {
    pub fn new(target: impl Into<Target>) -> Self {
        Self { target: Some(target.into()), ..Default::default() }
    }

    pub fn with_radius(mut self, flee_radius: f32) -> Self {
        self.flee_radius = flee_radius;
        self
    }

    pub fn set_target(&mut self, target: impl Into<Target>) {
        self.target = Some(target.into());
        self.warn.reset();
    }

    /// `true` when the target is within `flee_radius` (inclusive).
    pub fn is_target_in_range(&self, ctx: &SteerContext<'_>) -> bool {
        self.target
            .and_then(|t| t.position(ctx))
            .is_some_and(|p| p.distance(ctx.position) <= self.flee_radius)
    }
}

impl SteeringBehavior for Flee {
    fn name(&self) -> &'static str {
        "flee"
    }

    fn calculate_steering(&mut self, ctx: &SteerContext<'_>) -> SteeringForce {
        let target = resolve_or_zero!(self, ctx);
        let distance = target.distance(ctx.position);
        if distance > self.flee_radius {
            return SteeringForce::zero();
        }
        let falloff = if self.flee_radius > 0.0 { 1.0 - distance / self.flee_radius } else { 1.0 };
        ctx.output(ctx.flee(target) * falloff)
    }

    fn validate(&self) -> BehaviorResult<()> {
        non_negative(self.name(), "flee_radius", self.flee_radius)
    }
}

// ── Arrive ────────────────────────────────────────────────────────────────────

/// Toward the target, slowing inside `slow_down_radius` and stopping to push
/// inside `arrival_radius`.
#[derive(Clone, Debug)]
pub struct Arrive {
    pub target:           Option<Target>,
    pub arrival_radius:   f32,
    pub slow_down_radius: f32,
    warn:                 WarnOnce,
}

impl Default for Arrive {
    fn default() -> Self {
        Self {
            target:           None,
            arrival_radius:   DEFAULT_ARRIVAL_RADIUS,
            slow_down_radius: DEFAULT_SLOW_DOWN_RADIUS,
            warn:             WarnOnce::default(),
        }
    }
}

impl Arrive {
    pub fn new(target: impl Into<Target>) -> Self {
        Self { target: Some(target.into()), ..Default::default() }
    }

    pub fn with_radii(mut self, arrival_radius: f32, slow_down_radius: f32) -> Self {
        self.arrival_radius = arrival_radius;
        self.slow_down_radius = slow_down_radius;
        self
    }

    pub fn set_target(&mut self, target: impl Into<Target>) {
        self.target = Some(target.into());
        self.warn.reset();
    }

    fn distance(&self, ctx: &SteerContext<'_>) -> Option<f32> {
        self.target
            .and_then(|t| t.position(ctx))
            .map(|p| p.distance(ctx.position))
    }

    pub fn has_arrived(&self, ctx: &SteerContext<'_>) -> bool {
        self.distance(ctx).is_some_and(|d| d < self.arrival_radius)
    }

    pub fn is_in_slowdown_zone(&self, ctx: &SteerContext<'_>) -> bool {
        self.distance(ctx)
            .is_some_and(|d| d >= self.arrival_radius && d < self.slow_down_radius)
    }
}

impl SteeringBehavior for Arrive {
    fn name(&self) -> &'static str {
        "arrive"
    }

    fn calculate_steering(&mut self, ctx: &SteerContext<'_>) -> SteeringForce {
        let target = resolve_or_zero!(self, ctx);
        let to_target = target - ctx.position;
        let distance = to_target.length();
        if distance < self.arrival_radius {
            return SteeringForce::zero();
        }
        let max_speed = ctx.config.max_speed;
        let speed = if distance < self.slow_down_radius {
            max_speed * distance / self.slow_down_radius
        } else {
            max_speed
        };
        ctx.output(to_target.normalized() * speed - ctx.velocity)
    }

    fn validate(&self) -> BehaviorResult<()> {
        non_negative(self.name(), "arrival_radius", self.arrival_radius)?;
        positive(self.name(), "slow_down_radius", self.slow_down_radius)
    }
}
