//! The `SteeringBehavior` trait and the `Behavior` wrapper agents hold.

use std::fmt;

use crate::{
    Alignment, Arrive, BehaviorResult, Cohesion, Evade, Flee, Flock, ObstacleAvoidance,
    PathFollowing, Pursue, Seek, Separation, SteerContext, SteeringForce, WallFollowing,
    error::non_negative,
};

/// A single steering rule.
///
/// `calculate_steering` returns the behavior's raw opinion: a force already
/// clamped to `ctx.config.max_force` with weight 1, or
/// [`SteeringForce::zero`] when it has nothing to say.  The owning
/// [`Behavior`] applies its own weight on top.
///
/// Implement this for custom rules and wrap them in [`BehaviorKind::Custom`].
///
/// # Thread safety
///
/// With the simulation's `parallel` feature each agent's behaviors are
/// evaluated on whichever worker picks that agent up, so implementations
/// must be `Send`.
pub trait SteeringBehavior: Send {
    /// Short identifier used in logs and force traces.
    fn name(&self) -> &'static str;

    fn calculate_steering(&mut self, ctx: &SteerContext<'_>) -> SteeringForce;

    /// Reject parameter values the math cannot handle.
    fn validate(&self) -> BehaviorResult<()> {
        Ok(())
    }
}

// ── BehaviorKind ──────────────────────────────────────────────────────────────

/// The closed set of built-in behaviors plus a user extension point.
pub enum BehaviorKind {
    Seek(Seek),
    Flee(Flee),
    Arrive(Arrive),
    Pursue(Pursue),
    Evade(Evade),
    Separation(Separation),
    Alignment(Alignment),
    Cohesion(Cohesion),
    Flock(Flock),
    ObstacleAvoidance(ObstacleAvoidance),
    WallFollowing(WallFollowing),
    PathFollowing(PathFollowing),
    Custom(Box<dyn SteeringBehavior>),
}

impl BehaviorKind {
    pub fn as_behavior(&self) -> &dyn SteeringBehavior {
        match self {
            BehaviorKind::Seek(b)              => b,
            BehaviorKind::Flee(b)              => b,
            BehaviorKind::Arrive(b)            => b,
            BehaviorKind::Pursue(b)            => b,
            BehaviorKind::Evade(b)             => b,
            BehaviorKind::Separation(b)        => b,
            BehaviorKind::Alignment(b)         => b,
            BehaviorKind::Cohesion(b)          => b,
            BehaviorKind::Flock(b)             => b,
            BehaviorKind::ObstacleAvoidance(b) => b,
            BehaviorKind::WallFollowing(b)     => b,
            BehaviorKind::PathFollowing(b)     => b,
            BehaviorKind::Custom(b)            => &**b,
        }
    }

    pub fn as_behavior_mut(&mut self) -> &mut dyn SteeringBehavior {
        match self {
            BehaviorKind::Seek(b)              => b,
            BehaviorKind::Flee(b)              => b,
            BehaviorKind::Arrive(b)            => b,
            BehaviorKind::Pursue(b)            => b,
            BehaviorKind::Evade(b)             => b,
            BehaviorKind::Separation(b)        => b,
            BehaviorKind::Alignment(b)         => b,
            BehaviorKind::Cohesion(b)          => b,
            BehaviorKind::Flock(b)             => b,
            BehaviorKind::ObstacleAvoidance(b) => b,
            BehaviorKind::WallFollowing(b)     => b,
            BehaviorKind::PathFollowing(b)     => b,
            BehaviorKind::Custom(b)            => &mut **b,
        }
    }

    /// Weight a behavior of this kind starts with.
    ///
    /// Separation and the collision-related behaviors default above 1 so
    /// that they dominate goal-seeking when blended.
    pub fn default_weight(&self) -> f32 {
        match self {
            BehaviorKind::Separation(_)        => 2.0,
            BehaviorKind::ObstacleAvoidance(_) => 3.0,
            BehaviorKind::WallFollowing(_)     => 1.5,
            BehaviorKind::PathFollowing(_)     => 2.0,
            _                                  => 1.0,
        }
    }

    pub fn name(&self) -> &'static str {
        self.as_behavior().name()
    }
}

impl fmt::Debug for BehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

macro_rules! kind_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for BehaviorKind {
                fn from(b: $variant) -> Self {
                    BehaviorKind::$variant(b)
                }
            }
        )*
    };
}

kind_from!(
    Seek, Flee, Arrive, Pursue, Evade, Separation, Alignment, Cohesion, Flock,
    ObstacleAvoidance, WallFollowing, PathFollowing,
);

impl From<Box<dyn SteeringBehavior>> for BehaviorKind {
    fn from(b: Box<dyn SteeringBehavior>) -> Self {
        BehaviorKind::Custom(b)
    }
}

// ── Behavior ──────────────────────────────────────────────────────────────────

/// A behavior as attached to an agent: the rule plus its blend weight and
/// on/off switch.
#[derive(Debug)]
pub struct Behavior {
    pub weight:  f32,
    pub enabled: bool,
    pub kind:    BehaviorKind,
}

impl Behavior {
    /// Enabled, with the kind's default weight.
    pub fn new(kind: impl Into<BehaviorKind>) -> Self {
        let kind = kind.into();
        Self { weight: kind.default_weight(), enabled: true, kind }
    }

    pub fn custom(behavior: impl SteeringBehavior + 'static) -> Self {
        Self::new(BehaviorKind::Custom(Box::new(behavior)))
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// The rule's force with this behavior's weight multiplied in.
    ///
    /// Disabled behaviors are not evaluated and return
    /// [`SteeringForce::zero`], as does a non-finite result.
    pub fn weighted_steering(&mut self, ctx: &SteerContext<'_>) -> SteeringForce {
        if !self.enabled {
            return SteeringForce::zero();
        }
        let mut steering = self.kind.as_behavior_mut().calculate_steering(ctx);
        steering.weight *= self.weight;
        if !steering.weighted_force().is_finite() {
            log::trace!("{}: {} produced a non-finite force", ctx.agent, self.name());
            return SteeringForce::zero();
        }
        steering
    }

    pub fn validate(&self) -> BehaviorResult<()> {
        non_negative(self.name(), "weight", self.weight)?;
        self.kind.as_behavior().validate()
    }
}
