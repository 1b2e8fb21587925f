//! Fluent builder for constructing a [`Sim`].

use steer_agent::{AgentRngs, AgentStore};
use steer_behavior::AgentSteering;
use steer_core::SimConfig;
use steer_spatial::{Obstacle, ObstacleField};

use crate::{QueryMode, Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: step size, total ticks, seed, bounds, …
/// - [`AgentStore`] + [`AgentRngs`]: from [`steer_agent::AgentStoreBuilder`]
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                         |
/// |--------------------|---------------------------------|
/// | `.steering(v)`     | Empty blend for every agent     |
/// | `.obstacles(v)`    | No obstacles                    |
/// | `.query_mode(m)`   | `QueryMode::Snapshot`           |
///
/// # Example
///
/// ```rust,ignore
/// let (store, rngs) = AgentStoreBuilder::new(n, seed).build()?;
/// let mut sim = SimBuilder::new(config, store, rngs)
///     .steering(steering)
///     .obstacles(obstacles)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:     SimConfig,
    agents:     AgentStore,
    rngs:       AgentRngs,
    steering:   Option<Vec<AgentSteering>>,
    obstacles:  Vec<Obstacle>,
    query_mode: QueryMode,
}

impl SimBuilder {
    pub fn new(config: SimConfig, agents: AgentStore, rngs: AgentRngs) -> Self {
        Self {
            config,
            agents,
            rngs,
            steering:   None,
            obstacles:  Vec::new(),
            query_mode: QueryMode::default(),
        }
    }

    /// Per-agent steering (must be length `agent_count`).
    pub fn steering(mut self, steering: Vec<AgentSteering>) -> Self {
        self.steering = Some(steering);
        self
    }

    pub fn obstacles(mut self, obstacles: Vec<Obstacle>) -> Self {
        self.obstacles = obstacles;
        self
    }

    pub fn query_mode(mut self, mode: QueryMode) -> Self {
        self.query_mode = mode;
        self
    }

    /// Validate inputs, index the obstacles, and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        let agent_count = self.agents.count;

        self.config.validate()?;

        let steering = match self.steering {
            Some(s) => {
                if s.len() != agent_count {
                    return Err(SimError::AgentCountMismatch {
                        expected: agent_count,
                        got:      s.len(),
                        what:     "steering setups",
                    });
                }
                s
            }
            None => (0..agent_count).map(|_| AgentSteering::default()).collect(),
        };
        for (agent, s) in self.agents.agent_ids().zip(&steering) {
            s.validate().map_err(|source| SimError::Behavior { agent, source })?;
        }

        let obstacles = ObstacleField::new(self.obstacles)?;

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| SimError::Config(format!("thread pool: {e}")))?,
            ),
            None => None,
        };

        log::info!(
            "sim ready: {} agents, {} obstacles, dt {:.4}s, {:?} queries",
            agent_count,
            obstacles.len(),
            self.config.dt_secs,
            self.query_mode,
        );

        Ok(Sim {
            clock:         self.config.make_clock(),
            config:        self.config,
            agents:        self.agents,
            rngs:          self.rngs,
            steering,
            obstacles,
            query_mode:    self.query_mode,
            contributions: Vec::new(),
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
