//! `steer-behavior`: steering behaviors and how they combine.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                      |
//! |-----------------|---------------------------------------------------------------|
//! | [`force`]       | `SteeringForce` (direction + weight), `ForceContribution`     |
//! | [`context`]     | `SteerContext<'a>`: one agent's read-only view of a tick     |
//! | [`model`]       | `SteeringBehavior` trait, `Behavior`, `BehaviorKind`          |
//! | [`target`]      | `Target` (fixed point or tracked agent)                       |
//! | [`seek`]        | `Seek`, `Flee`, `Arrive`                                      |
//! | [`pursuit`]     | `Pursue`, `Evade`, `look_ahead_time`                          |
//! | [`flocking`]    | `Separation`, `Alignment`, `Cohesion`, `Flock`                |
//! | [`avoidance`]   | `ObstacleAvoidance`                                           |
//! | [`wall`]        | `WallFollowing`                                               |
//! | [`path`]        | `PathFollowing`, `PathPoint`, `PathDirection`                 |
//! | [`context_map`] | `ContextMap`, `ContextSteering`                               |
//! | [`steering`]    | `AgentSteering`: an agent's complete steering setup          |
//! | [`error`]       | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Design notes
//!
//! Every behavior computes a force from a [`SteerContext`] and nothing else.
//! The context borrows the tick's immutable world snapshot, so evaluating
//! one agent can never observe another agent's half-applied update.
//!
//! Behaviors take `&mut self` only for their own bookkeeping: the path
//! follower's waypoint cursor, the context map buffers, and the one-shot
//! "missing target" warning.  Agent state is never written here.
//!
//! A missing dependency (a tracked agent that left the world) or degenerate
//! geometry always resolves to zero steering; evaluation cannot fail.

pub mod avoidance;
pub mod context;
pub mod context_map;
pub mod error;
pub mod flocking;
pub mod force;
pub mod model;
pub mod path;
pub mod pursuit;
pub mod seek;
pub mod steering;
pub mod target;
pub mod wall;


pub use avoidance::ObstacleAvoidance;
pub use context::{Neighbor, SteerContext};
pub use context_map::{ContextMap, ContextSteering};
pub use error::{BehaviorError, BehaviorResult};
pub use flocking::{Alignment, Cohesion, Flock, Separation};
pub use force::{ForceContribution, SteeringForce};
pub use model::{Behavior, BehaviorKind, SteeringBehavior};
pub use path::{PathDirection, PathFollowing, PathPoint};
pub use pursuit::{Evade, Pursue, look_ahead_time};
pub use seek::{Arrive, Flee, Seek};
pub use steering::AgentSteering;
pub use target::Target;
pub use wall::WallFollowing;
