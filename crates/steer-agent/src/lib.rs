//! `steer-agent`: Structure-of-Arrays agent storage for the steer workspace.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`config`]    | `AgentTunables` (mutable) and `AgentConfig` (tick snapshot) |
//! | [`store`]     | `AgentStore` (SoA arrays), `AgentRngs` (per-agent RNG)     |
//! | [`builder`]   | `AgentStoreBuilder` (fluent construction, initial heading) |
//! | [`error`]     | `AgentError`, `AgentResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                  |
//! |---------|---------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `AgentTunables`.   |

pub mod builder;
pub mod config;
pub mod error;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::{AgentStoreBuilder, initial_velocity};
pub use config::{AgentConfig, AgentTunables};
pub use error::{AgentError, AgentResult};
pub use store::{AgentRngs, AgentStore};
