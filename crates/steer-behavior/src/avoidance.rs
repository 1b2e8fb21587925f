//! Look-ahead obstacle avoidance.
//!
//! Three probes are placed along the heading: the agent itself, a point
//! `look_ahead / 2` ahead and a point `look_ahead` ahead, where
//!
//!   look_ahead = (speed / max_speed) * max_see_ahead
//!
//! An obstacle threatens when any probe lies within the combined radius of
//! obstacle and agent.  Of those, the one nearest to a probe is dodged with a
//! sideways push away from it; when already close, a brake is added.

use steer_core::{EPSILON, Vec3};
use steer_spatial::ObstacleView;

use crate::error::non_negative;
use crate::{BehaviorResult, SteerContext, SteeringBehavior, SteeringForce};

pub const DEFAULT_AVOIDANCE_DISTANCE: f32 = 150.0;
pub const DEFAULT_MAX_SEE_AHEAD: f32 = 100.0;
pub const DEFAULT_AVOIDANCE_MULTIPLIER: f32 = 2.0;

/// Extra clearance over the combined radius within which the side push
/// fades in.
const FALLOFF_MARGIN: f32 = 50.0;
/// Extra clearance over the combined radius within which braking starts.
const BRAKE_MARGIN: f32 = 20.0;

#[derive(Clone, Debug)]
pub struct ObstacleAvoidance {
    /// Only obstacles whose centre is this close are considered.
    pub avoidance_distance: f32,
    pub max_see_ahead:      f32,
    pub multiplier:         f32,
}

impl Default for ObstacleAvoidance {
    fn default() -> Self {
        Self {
            avoidance_distance: DEFAULT_AVOIDANCE_DISTANCE,
            max_see_ahead:      DEFAULT_MAX_SEE_AHEAD,
            multiplier:         DEFAULT_AVOIDANCE_MULTIPLIER,
        }
    }
}

impl ObstacleAvoidance {
    fn look_ahead(&self, ctx: &SteerContext<'_>) -> f32 {
        if ctx.config.max_speed <= EPSILON {
            return 0.0;
        }
        ctx.speed() / ctx.config.max_speed * self.max_see_ahead
    }

    /// The farthest probe.
    pub fn ahead_point(&self, ctx: &SteerContext<'_>) -> Vec3 {
        ctx.position + ctx.heading() * self.look_ahead(ctx)
    }

    /// The threatening obstacle closest to any probe.
    pub fn most_threatening_obstacle(&self, ctx: &SteerContext<'_>) -> Option<ObstacleView> {
        self.find_threat(ctx)
    }

    pub fn is_avoiding(&self, ctx: &SteerContext<'_>) -> bool {
        self.find_threat(ctx).is_some()
    }

    fn find_threat(&self, ctx: &SteerContext<'_>) -> Option<ObstacleView> {
        let heading = ctx.heading();
        let look_ahead = self.look_ahead(ctx);
        let probes = [
            ctx.position + heading * look_ahead,
            ctx.position + heading * (look_ahead * 0.5),
            ctx.position,
        ];

        let mut best: Option<(ObstacleView, f32)> = None;
        for obstacle in ctx.world.nearby_obstacles(ctx.position, self.avoidance_distance) {
            let nearest = probes
                .iter()
                .map(|p| obstacle.position.distance(*p))
                .fold(f32::INFINITY, f32::min);
            if nearest > obstacle.radius + ctx.config.radius {
                continue;
            }
            if best.is_none_or(|(_, d)| nearest < d) {
                best = Some((obstacle, nearest));
            }
        }
        best.map(|(o, _)| o)
    }
}

impl SteeringBehavior for ObstacleAvoidance {
    fn name(&self) -> &'static str {
        "obstacle_avoidance"
    }

    fn calculate_steering(&mut self, ctx: &SteerContext<'_>) -> SteeringForce {
        let Some(obstacle) = self.find_threat(ctx) else {
            return SteeringForce::zero();
        };

        let heading = ctx.heading();
        let to_obstacle = obstacle.position - ctx.position;
        let mut lateral = heading.perp_ccw();
        if to_obstacle.dot(lateral) > 0.0 {
            lateral = -lateral;
        }

        let total_radius = obstacle.radius + ctx.config.radius;
        let distance = to_obstacle.length();
        let strength = ((total_radius + FALLOFF_MARGIN - distance)
            / (total_radius + FALLOFF_MARGIN))
            .max(0.0);

        let max_speed = ctx.config.max_speed;
        let mut force = lateral * (max_speed * strength * self.multiplier);
        if distance < total_radius + BRAKE_MARGIN {
            force -= heading * (max_speed * 0.5);
        }
        ctx.output(force)
    }

    fn validate(&self) -> BehaviorResult<()> {
        non_negative(self.name(), "avoidance_distance", self.avoidance_distance)?;
        non_negative(self.name(), "max_see_ahead", self.max_see_ahead)?;
        non_negative(self.name(), "multiplier", self.multiplier)
    }
}
