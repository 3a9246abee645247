//! Gallery Combat - Projectile System
//!
//! Owns every projectile in flight and decides when new ones may be fired.
//!
//! # Features
//!
//! - Cooldown-gated firing
//! - Straight-line integration each tick
//! - Expiry by distance from a reference point and by age
//!
//! # Example
//!
//! ```ignore
//! use gallery_combat::prelude::*;
//! use gallery_math::Vec3;
//!
//! let mut projectiles = ProjectileManager::new(ProjectileConfig::default());
//!
//! projectiles.fire(Vec3::new(0.0, 2.0, 5.0), Vec3::NEG_Z);
//! projectiles.tick(1.0 / 60.0, Vec3::new(0.0, 2.0, 5.0));
//! ```

pub mod error;
pub mod projectile;

pub mod prelude {
    pub use crate::error::{CombatError, Result};
    pub use crate::projectile::{Projectile, ProjectileConfig, ProjectileId, ProjectileManager};
}

pub use prelude::*;
