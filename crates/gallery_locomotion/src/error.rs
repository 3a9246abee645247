//! Error types for the locomotion system

use thiserror::Error;

/// Locomotion system errors
#[derive(Debug, Error)]
pub enum LocomotionError {
    /// Invalid configuration
    #[error("Invalid locomotion configuration: {0}")]
    InvalidConfig(String),

    /// Invalid agent description
    #[error("Invalid agent: {0}")]
    InvalidAgent(String),
}

/// Result type for locomotion operations
pub type Result<T> = std::result::Result<T, LocomotionError>;
