//! Predictive interception: Pursue and Evade.
//!
//! Both extrapolate the other agent along its current velocity for
//!
//!   t = distance / (own_max_speed + other_speed)
//!
//! seconds, capped at `max_prediction_time`.  That is the time to close the
//! gap if both moved straight at each other; the cap stops a far, slow
//! target from being predicted absurdly far ahead.

use steer_core::{EPSILON, Vec3};
use steer_spatial::AgentView;

use crate::error::{non_negative, positive};
use crate::target::WarnOnce;
use crate::{BehaviorResult, SteerContext, SteeringBehavior, SteeringForce, Target};

pub const DEFAULT_MAX_PREDICTION_TIME: f32 = 2.0;
pub const DEFAULT_PANIC_RADIUS: f32 = 200.0;

/// Relative-heading dot product below which two agents count as heading
/// straight at each other.
const HEAD_ON: f32 = -0.95;

/// Look-ahead time for an intercept.  Zero when neither side can move.
pub fn look_ahead_time(distance: f32, own_max_speed: f32, other_speed: f32, max_time: f32) -> f32 {
    let closing = own_max_speed + other_speed;
    if closing <= EPSILON {
        return 0.0;
    }
    (distance / closing).min(max_time).max(0.0)
}

fn predict(ctx: &SteerContext<'_>, other: &AgentView, max_time: f32) -> Vec3 {
    let distance = other.position.distance(ctx.position);
    let t = look_ahead_time(distance, ctx.config.max_speed, other.speed(), max_time);
    other.position + other.velocity * t
}

/// Dot product of the two normalized velocities; 0 when either is still.
fn relative_heading(ctx: &SteerContext<'_>, other: &AgentView) -> f32 {
    ctx.velocity.normalized().dot(other.velocity.normalized())
}

// ── Pursue ────────────────────────────────────────────────────────────────────

/// Seek where the target will be.
///
/// A fixed-point target has no velocity to extrapolate and is sought
/// directly.
#[derive(Clone, Debug)]
pub struct Pursue {
    pub target:              Option<Target>,
    pub max_prediction_time: f32,
    warn:                    WarnOnce,
}

impl Default for Pursue {
    fn default() -> Self {
        Self {
            target:              None,
            max_prediction_time: DEFAULT_MAX_PREDICTION_TIME,
            warn:                WarnOnce::default(),
        }
    }
}

impl Pursue {
    pub fn new(target: impl Into<Target>) -> Self {
        Self { target: Some(target.into()), ..Default::default() }
    }

    pub fn set_target(&mut self, target: impl Into<Target>) {
        self.target = Some(target.into());
        self.warn.reset();
    }

    /// Where the pursuer is currently aiming.  `None` without a resolvable
    /// target.
    pub fn predicted_position(&self, ctx: &SteerContext<'_>) -> Option<Vec3> {
        match self.target? {
            Target::Point(p) => Some(p),
            t @ Target::Agent(_) => {
                let other = t.agent_view(ctx)?;
                Some(predict(ctx, &other, self.max_prediction_time))
            }
        }
    }
}

impl SteeringBehavior for Pursue {
    fn name(&self) -> &'static str {
        "pursue"
    }

    fn calculate_steering(&mut self, ctx: &SteerContext<'_>) -> SteeringForce {
        let other = match self.target {
            Some(Target::Point(p)) => return ctx.output(ctx.seek(p)),
            Some(t @ Target::Agent(_)) => match t.agent_view(ctx) {
                Some(v) => v,
                None => {
                    self.warn.missing("pursue", ctx.agent, format_args!("{t} is not in the world"));
                    return SteeringForce::zero();
                }
            },
            None => {
                self.warn.missing("pursue", ctx.agent, format_args!("no target set"));
                return SteeringForce::zero();
            }
        };

        let to_target = other.position - ctx.position;
        let ahead = to_target.dot(ctx.heading()) > 0.0;
        if ahead && relative_heading(ctx, &other) < HEAD_ON {
            // Coming straight at us: prediction would overshoot.
            return ctx.output(ctx.seek(other.position));
        }
        ctx.output(ctx.seek(predict(ctx, &other, self.max_prediction_time)))
    }

    fn validate(&self) -> BehaviorResult<()> {
        non_negative(self.name(), "max_prediction_time", self.max_prediction_time)
    }
}

// ── Evade ─────────────────────────────────────────────────────────────────────

/// Flee where the threat will be, harder the closer it is.
///
/// Silent outside `panic_radius`, when the threat is behind the agent and
/// not heading its way, and when `panic_radius` is not positive.
#[derive(Clone, Debug)]
pub struct Evade {
    pub threat:              Option<Target>,
    pub max_prediction_time: f32,
    pub panic_radius:        f32,
    warn:                    WarnOnce,
}

impl Default for Evade {
    fn default() -> Self {
        Self {
            threat:              None,
            max_prediction_time: DEFAULT_MAX_PREDICTION_TIME,
            panic_radius:        DEFAULT_PANIC_RADIUS,
            warn:                WarnOnce::default(),
        }
    }
}

impl Evade {
    pub fn new(threat: impl Into<Target>) -> Self {
        Self { threat: Some(threat.into()), ..Default::default() }
    }

    pub fn with_panic_radius(mut self, panic_radius: f32) -> Self {
        self.panic_radius = panic_radius;
        self
    }

    pub fn set_threat(&mut self, threat: impl Into<Target>) {
        self.threat = Some(threat.into());
        self.warn.reset();
    }

    pub fn is_threat_near(&self, ctx: &SteerContext<'_>) -> bool {
        self.threat
            .and_then(|t| t.position(ctx))
            .is_some_and(|p| p.distance(ctx.position) <= self.panic_radius)
    }

    pub fn predicted_threat_position(&self, ctx: &SteerContext<'_>) -> Option<Vec3> {
        match self.threat? {
            Target::Point(p) => Some(p),
            t @ Target::Agent(_) => {
                let other = t.agent_view(ctx)?;
                Some(predict(ctx, &other, self.max_prediction_time))
            }
        }
    }

    fn panic_factor(&self, distance: f32) -> f32 {
        1.0 + (1.0 - distance / self.panic_radius)
    }
}

impl SteeringBehavior for Evade {
    fn name(&self) -> &'static str {
        "evade"
    }

    fn calculate_steering(&mut self, ctx: &SteerContext<'_>) -> SteeringForce {
        let Some(threat) = self.threat else {
            self.warn.missing("evade", ctx.agent, format_args!("no threat set"));
            return SteeringForce::zero();
        };
        let Some(threat_pos) = threat.position(ctx) else {
            self.warn.missing("evade", ctx.agent, format_args!("{threat} is not in the world"));
            return SteeringForce::zero();
        };

        let distance = threat_pos.distance(ctx.position);
        if self.panic_radius.is_nan() || self.panic_radius <= 0.0 || distance > self.panic_radius {
            return SteeringForce::zero();
        }

        let Some(other) = threat.agent_view(ctx) else {
            // Static threat: nothing to predict.
            return ctx.output(ctx.flee(threat_pos) * self.panic_factor(distance));
        };

        let behind = (other.position - ctx.position).dot(ctx.heading()) < 0.0;
        if behind && relative_heading(ctx, &other) > HEAD_ON {
            return SteeringForce::zero();
        }

        let future = predict(ctx, &other, self.max_prediction_time);
        ctx.output(ctx.flee(future) * self.panic_factor(distance))
    }

    fn validate(&self) -> BehaviorResult<()> {
        non_negative(self.name(), "max_prediction_time", self.max_prediction_time)?;
        positive(self.name(), "panic_radius", self.panic_radius)
    }
}
