//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! ```rust
//! use steer_agent::{AgentStoreBuilder, AgentTunables};
//! use steer_core::Vec3;
//!
//! let (store, rngs) = AgentStoreBuilder::new(3, 42)
//!     .positions(vec![Vec3::ZERO, Vec3::xy(10.0, 0.0), Vec3::xy(0.0, 10.0)])
//!     .uniform_tunables(AgentTunables::default())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(store.count, 3);
//! assert_eq!(rngs.len(), 3);
//! ```

use steer_core::{AgentId, AgentRng, Vec3};

use crate::{AgentError, AgentResult, AgentRngs, AgentStore, AgentTunables};

/// Fluent builder for [`AgentStore`] + [`AgentRngs`].
///
/// Positions default to the origin, velocities to zero, tunables to
/// [`AgentTunables::default`].  Any agent still at zero velocity when
/// [`build`](Self::build) runs is given a random heading at half its max
/// speed.
pub struct AgentStoreBuilder {
    count:      usize,
    seed:       u64,
    positions:  Option<Vec<Vec3>>,
    velocities: Option<Vec<Vec3>>,
    tunables:   Option<Vec<AgentTunables>>,
}

impl AgentStoreBuilder {
    pub fn new(count: usize, seed: u64) -> Self {
        Self { count, seed, positions: None, velocities: None, tunables: None }
    }

    pub fn positions(mut self, positions: Vec<Vec3>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Explicit initial velocities.  Zero entries still get a random heading.
    pub fn velocities(mut self, velocities: Vec<Vec3>) -> Self {
        self.velocities = Some(velocities);
        self
    }

    pub fn tunables(mut self, tunables: Vec<AgentTunables>) -> Self {
        self.tunables = Some(tunables);
        self
    }

    pub fn uniform_tunables(mut self, tunables: AgentTunables) -> Self {
        self.tunables = Some(vec![tunables; self.count]);
        self
    }

    pub fn build(self) -> AgentResult<(AgentStore, AgentRngs)> {
        let n = self.count;
        let positions = take_or_fill(self.positions, n, Vec3::ZERO, "positions")?;
        let velocities = take_or_fill(self.velocities, n, Vec3::ZERO, "velocities")?;
        let tunables = take_or_fill(self.tunables, n, AgentTunables::default(), "tunables")?;

        for (i, t) in tunables.iter().enumerate() {
            t.validate(AgentId(i as u32))?;
        }

        let mut rngs = AgentRngs::new(n, self.seed);
        let velocities = velocities
            .into_iter()
            .zip(&tunables)
            .zip(rngs.inner.iter_mut())
            .map(|((v, t), rng)| initial_velocity(v, t, rng))
            .collect();

        Ok((AgentStore::new(positions, velocities, tunables), rngs))
    }
}

/// Spawn-time velocity: `velocity` if non-zero, otherwise a random heading at
/// half of `tunables.max_speed`.
pub fn initial_velocity(velocity: Vec3, tunables: &AgentTunables, rng: &mut AgentRng) -> Vec3 {
    if velocity.is_zero() {
        rng.unit_heading() * (tunables.max_speed * 0.5)
    } else {
        velocity
    }
}

fn take_or_fill<T: Clone>(
    given:    Option<Vec<T>>,
    expected: usize,
    fill:     T,
    what:     &'static str,
) -> AgentResult<Vec<T>> {
    match given {
        Some(v) if v.len() != expected => {
            Err(AgentError::LengthMismatch { what, expected, got: v.len() })
        }
        Some(v) => Ok(v),
        None => Ok(vec![fill; expected]),
    }
}
