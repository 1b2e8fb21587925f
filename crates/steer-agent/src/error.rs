use thiserror::Error;

use steer_core::AgentId;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{what}: expected {expected} entries, got {got}")]
    LengthMismatch { what: &'static str, expected: usize, got: usize },

    #[error("agent {agent}: {field} must be {expected} (got {value})")]
    InvalidTunables { agent: AgentId, field: &'static str, expected: &'static str, value: f32 },

    #[error("agent {0} not found")]
    NotFound(AgentId),
}

pub type AgentResult<T> = Result<T, AgentError>;
