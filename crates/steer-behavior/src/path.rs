//! Waypoint path following.
//!
//! The only behavior with state that outlives a tick: a cursor into the
//! waypoint list and a traversal direction.  The cursor advances when the
//! agent comes within the current waypoint's radius; the new waypoint is
//! targeted in the same tick.
//!
//! At either end a looping path wraps around, while an open path bounces:
//! the direction flips and the cursor steps back one waypoint.

use std::f32::consts::TAU;

use steer_core::Vec3;

use crate::error::{non_negative, positive};
use crate::{BehaviorResult, SteerContext, SteeringBehavior, SteeringForce};

pub const DEFAULT_PATH_RADIUS: f32 = 20.0;
pub const DEFAULT_CIRCLE_POINTS: usize = 8;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PathPoint {
    pub position: Vec3,
    /// Arrival tolerance; `None` uses the follower's `path_radius`.
    pub radius:   Option<f32>,
}

impl PathPoint {
    pub fn new(position: Vec3) -> Self {
        Self { position, radius: None }
    }

    pub fn with_radius(position: Vec3, radius: f32) -> Self {
        Self { position, radius: Some(radius) }
    }
}

impl From<Vec3> for PathPoint {
    fn from(position: Vec3) -> Self {
        Self::new(position)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PathDirection {
    #[default]
    Forward,
    Backward,
}

impl PathDirection {
    pub fn reversed(self) -> Self {
        match self {
            PathDirection::Forward => PathDirection::Backward,
            PathDirection::Backward => PathDirection::Forward,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PathFollowing {
    pub path_radius: f32,
    pub looping:     bool,
    path:            Vec<PathPoint>,
    current:         usize,
    direction:       PathDirection,
}

impl Default for PathFollowing {
    fn default() -> Self {
        Self {
            path_radius: DEFAULT_PATH_RADIUS,
            looping:     true,
            path:        Vec::new(),
            current:     0,
            direction:   PathDirection::Forward,
        }
    }
}

impl PathFollowing {
    pub fn new(waypoints: impl IntoIterator<Item = Vec3>, looping: bool) -> Self {
        let mut p = Self::default();
        p.set_path(waypoints, looping);
        p
    }

    /// A closed loop of `points` waypoints evenly spaced on a circle,
    /// starting at angle 0 and running counter-clockwise.
    pub fn circular(center: Vec3, radius: f32, points: usize) -> Self {
        let n = points.max(1);
        Self::new(
            (0..n).map(|i| {
                let a = i as f32 / n as f32 * TAU;
                Vec3::xy(center.x + a.cos() * radius, center.y + a.sin() * radius)
            }),
            true,
        )
    }

    /// A closed loop around the rectangle's four corners.
    pub fn rectangular(top_left: Vec3, bottom_right: Vec3) -> Self {
        Self::new(
            [
                Vec3::xy(top_left.x, top_left.y),
                Vec3::xy(bottom_right.x, top_left.y),
                Vec3::xy(bottom_right.x, bottom_right.y),
                Vec3::xy(top_left.x, bottom_right.y),
            ],
            true,
        )
    }

    pub fn with_path_radius(mut self, path_radius: f32) -> Self {
        self.path_radius = path_radius;
        self
    }

    // ── Editing ───────────────────────────────────────────────────────────────

    /// Replace the path and restart from the first waypoint.
    pub fn set_path(&mut self, waypoints: impl IntoIterator<Item = Vec3>, looping: bool) {
        self.set_path_with_radii(waypoints.into_iter().map(PathPoint::new), looping);
    }

    pub fn set_path_with_radii(&mut self, points: impl IntoIterator<Item = PathPoint>, looping: bool) {
        self.path = points.into_iter().collect();
        self.looping = looping;
        self.reset();
    }

    pub fn add_waypoint(&mut self, position: Vec3, radius: Option<f32>) {
        self.path.push(PathPoint { position, radius });
    }

    pub fn clear_path(&mut self) {
        self.path.clear();
        self.reset();
    }

    /// Back to the first waypoint, heading forward.
    pub fn reset(&mut self) {
        self.current = 0;
        self.direction = PathDirection::Forward;
    }

    pub fn reverse(&mut self) {
        self.direction = self.direction.reversed();
    }

    /// Jump to waypoint `index`.  Out-of-range indices are ignored.
    pub fn set_current_index(&mut self, index: usize) {
        if index < self.path.len() {
            self.current = index;
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn path(&self) -> &[PathPoint] {
        &self.path
    }

    pub fn current_waypoint(&self) -> Option<&PathPoint> {
        self.path.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn direction(&self) -> PathDirection {
        self.direction
    }

    pub fn is_following(&self) -> bool {
        !self.path.is_empty()
    }

    /// Cursor position as a fraction of the path, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        match self.path.len() {
            0 => 0.0,
            1 => 1.0,
            n => self.current as f32 / (n - 1) as f32,
        }
    }

    pub fn distance_to_waypoint(&self, ctx: &SteerContext<'_>) -> f32 {
        self.current_waypoint()
            .map_or(0.0, |wp| wp.position.distance(ctx.position))
    }

    /// An open path whose cursor sits on the end it is heading toward.
    pub fn is_at_end(&self) -> bool {
        if self.looping || self.path.is_empty() {
            return false;
        }
        let last = self.path.len() - 1;
        match self.direction {
            PathDirection::Forward => self.current == last,
            PathDirection::Backward => self.current == 0,
        }
    }

    fn arrival_radius(&self, wp: &PathPoint) -> f32 {
        wp.radius.unwrap_or(self.path_radius)
    }

    fn advance(&mut self) {
        let Some(last) = self.path.len().checked_sub(1) else {
            return;
        };
        match self.direction {
            PathDirection::Forward if self.current < last => self.current += 1,
            PathDirection::Backward if self.current > 0 => self.current -= 1,
            PathDirection::Forward if self.looping => self.current = 0,
            PathDirection::Backward if self.looping => self.current = last,
            PathDirection::Forward => {
                self.direction = PathDirection::Backward;
                self.current = last.saturating_sub(1);
            }
            PathDirection::Backward => {
                self.direction = PathDirection::Forward;
                self.current = last.min(1);
            }
        }
    }
}

impl SteeringBehavior for PathFollowing {
    fn name(&self) -> &'static str {
        "path_following"
    }

    fn calculate_steering(&mut self, ctx: &SteerContext<'_>) -> SteeringForce {
        let Some(wp) = self.current_waypoint().copied() else {
            return SteeringForce::zero();
        };
        let mut target = wp.position;
        if target.distance(ctx.position) <= self.arrival_radius(&wp) {
            self.advance();
            if let Some(next) = self.current_waypoint() {
                target = next.position;
            }
        }
        ctx.output(ctx.seek(target))
    }

    fn validate(&self) -> BehaviorResult<()> {
        positive(self.name(), "path_radius", self.path_radius)?;
        for wp in &self.path {
            if let Some(r) = wp.radius {
                non_negative(self.name(), "waypoint radius", r)?;
            }
        }
        Ok(())
    }
}
