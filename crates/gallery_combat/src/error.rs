//! Error types for the combat system

use thiserror::Error;

/// Combat system errors
#[derive(Debug, Error)]
pub enum CombatError {
    /// Invalid configuration
    #[error("Invalid projectile configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for combat operations
pub type Result<T> = std::result::Result<T, CombatError>;
