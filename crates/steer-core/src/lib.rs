//! `steer-core`: foundational types for the steer workspace.
//!
//! Every other `steer-*` crate depends on this one.  It has no `steer-*`
//! dependencies and only two external ones (`rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `ObstacleId`                               |
//! | [`vector`]      | `Vec3`, zero-safe normalization, clamping             |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`, `check_dt`           |
//! | [`bounds`]      | `WorldBounds` and toroidal wrap                       |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`error`]       | `SteerError` (bad step or bounds), `SteerResult`      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod bounds;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod vector;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use bounds::WorldBounds;
pub use error::{SteerError, SteerResult};
pub use ids::{AgentId, ObstacleId};
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, SimConfig, Tick, check_dt};
pub use vector::{EPSILON, Vec3};
