//! Error types for the collision system

use thiserror::Error;

/// Collision system errors
#[derive(Debug, Error)]
pub enum CollisionError {
    /// Shape dimensions are zero, negative or not finite
    #[error("Invalid obstacle shape: {0}")]
    InvalidShape(String),

    /// Obstacle placement is not finite
    #[error("Invalid obstacle position: {0:?}")]
    InvalidPosition([f32; 3]),
}

/// Result type for collision operations
pub type Result<T> = std::result::Result<T, CollisionError>;
