//! Spatial-subsystem error type.

use thiserror::Error;

use steer_core::ObstacleId;

#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("obstacle {id}: {reason}")]
    InvalidObstacle { id: ObstacleId, reason: String },

    #[error("obstacle {0} not found")]
    ObstacleNotFound(ObstacleId),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
