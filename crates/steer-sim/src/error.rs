use steer_agent::AgentError;
use steer_behavior::BehaviorError;
use steer_core::{AgentId, SteerError};
use steer_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),


    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("steering for {agent}: {source}")]
    Behavior {
        agent:  AgentId,
        #[source]
        source: BehaviorError,
    },

    #[error(transparent)]
    Core(#[from] SteerError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Spatial(#[from] SpatialError),
}

pub type SimResult<T> = Result<T, SimError>;

