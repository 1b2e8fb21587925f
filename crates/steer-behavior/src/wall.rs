//! Wall following.

use steer_core::Vec3;
use steer_spatial::Wall;

use crate::error::non_negative;
use crate::{BehaviorResult, SteerContext, SteeringBehavior, SteeringForce};

pub const DEFAULT_FOLLOW_DISTANCE: f32 = 30.0;
pub const DEFAULT_FOLLOW_FORCE: f32 = 50.0;
pub const DEFAULT_DETECTION_DISTANCE: f32 = 100.0;

/// Hold a standoff from the nearest wall while sliding along it.
///
/// Inside `follow_distance` the agent is pushed off the wall; beyond
/// `1.5 * follow_distance` it is pulled back at half strength.  A tangential
/// push of `follow_force` is always added.
#[derive(Clone, Debug)]
pub struct WallFollowing {
    pub follow_distance:    f32,
    pub follow_force:       f32,
    pub detection_distance: f32,
    pub clockwise:          bool,
}

impl Default for WallFollowing {
    fn default() -> Self {
        Self {
            follow_distance:    DEFAULT_FOLLOW_DISTANCE,
            follow_force:       DEFAULT_FOLLOW_FORCE,
            detection_distance: DEFAULT_DETECTION_DISTANCE,
            clockwise:          true,
        }
    }
}

impl WallFollowing {
    pub fn set_clockwise(&mut self, clockwise: bool) {
        self.clockwise = clockwise;
    }

    pub fn toggle_direction(&mut self) {
        self.clockwise = !self.clockwise;
    }

    /// Nearest wall within `detection_distance`.  Ties go to the first wall
    /// the world reports.
    pub fn closest_wall(&self, ctx: &SteerContext<'_>) -> Option<Wall> {
        let mut best: Option<Wall> = None;
        for w in ctx.world.walls_near(ctx.position, self.detection_distance) {
            if best.is_none_or(|b| w.distance < b.distance) {
                best = Some(w);
            }
        }
        best
    }

    pub fn is_following_wall(&self, ctx: &SteerContext<'_>) -> bool {
        !ctx.world.walls_near(ctx.position, self.detection_distance).is_empty()
    }

    fn tangent(&self, normal: Vec3) -> Vec3 {
        if self.clockwise { normal.perp_cw() } else { normal.perp_ccw() }.normalized()
    }

    fn wall_force(&self, wall: &Wall) -> Vec3 {
        let mut force = Vec3::ZERO;
        if wall.distance < self.follow_distance {
            force += wall.normal * self.follow_force;
        } else if wall.distance > self.follow_distance * 1.5 {
            force -= wall.normal * (self.follow_force * 0.5);
        }
        force + self.tangent(wall.normal) * self.follow_force
    }
}

impl SteeringBehavior for WallFollowing {
    fn name(&self) -> &'static str {
        "wall_following"
    }

    fn calculate_steering(&mut self, ctx: &SteerContext<'_>) -> SteeringForce {
        match self.closest_wall(ctx) {
            Some(wall) => ctx.output(self.wall_force(&wall)),
            None => SteeringForce::zero(),
        }
    }

    fn validate(&self) -> BehaviorResult<()> {
        non_negative(self.name(), "follow_distance", self.follow_distance)?;
        non_negative(self.name(), "follow_force", self.follow_force)?;
        non_negative(self.name(), "detection_distance", self.detection_distance)
    }
}
