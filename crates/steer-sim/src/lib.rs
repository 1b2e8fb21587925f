//! `steer-sim`: tick loop for the steer workspace.
//!
//! # Two-phase tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Snapshot: copy every live agent's position, velocity and radius
//!               into a WorldSnapshot (R-tree over positions).
//!   ② Intents:  evaluate each agent's AgentSteering against the snapshot,
//!               one total force per agent (parallel with `parallel`).
//!   ③ Apply:    in ascending AgentId order:
//!                 F = clamp(force, max_force); a = F / mass
//!                 v = clamp(v + a·dt, max_speed); p = wrap(p + v·dt)
//! ```
//!
//! Because step ② only reads the snapshot, the result of a tick does not
//! depend on agent order.  [`QueryMode::Live`] trades that away for the
//! one-agent-at-a-time update where later agents see earlier ones moved.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the intent phase on Rayon's thread pool.          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use steer_agent::AgentStoreBuilder;
//! use steer_behavior::{AgentSteering, Behavior, Seek};
//! use steer_core::{SimConfig, Vec3};
//! use steer_sim::{NoopObserver, SimBuilder};
//!
//! let (store, rngs) = AgentStoreBuilder::new(1, 42).build()?;
//! let seek = AgentSteering::Blended(vec![Behavior::new(Seek::new(Vec3::xy(100.0, 0.0)))]);
//! let mut sim = SimBuilder::new(SimConfig::default(), store, rngs)
//!     .steering(vec![seek])
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickSummary};
pub use sim::{QueryMode, Sim, integrate};
