//! `steer-spatial`: what a behavior can see of the world.
//!
//! Behaviors never touch the agent store directly.  They ask a
//! [`WorldQuery`] for neighbors, obstacles, and walls around a point, and get
//! back plain value views.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`view`]     | `AgentView`, `ObstacleView`, `Obstacle`                    |
//! | [`wall`]     | `Wall`, `boundary_walls`                                   |
//! | [`query`]    | `WorldQuery` trait, `LinearScan` brute-force reference     |
//! | [`snapshot`] | `ObstacleField` (static R-tree), `WorldSnapshot` (per tick) |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Obstacle`.             |

pub mod error;
pub mod query;
pub mod snapshot;
pub mod view;
pub mod wall;


pub use error::{SpatialError, SpatialResult};
pub use query::{LinearScan, WorldQuery};
pub use snapshot::{ObstacleField, WorldSnapshot};
pub use view::{AgentView, DEFAULT_OBSTACLE_RADIUS, Obstacle, ObstacleView};
pub use wall::{Wall, boundary_walls};
