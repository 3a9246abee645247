//! Gallery Collision - Obstacle Field and Collision Probes
//!
//! This crate owns the static obstacles of a gallery scene and answers the
//! two questions locomotion asks of them.
//!
//! # Features
//!
//! - Box and sphere obstacles with precomputed bounding boxes
//! - Nearest-hit raycasting against the whole field
//! - AABB overlap testing for volume-based movement
//! - Read-only during play: queries take `&self`
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │               ObstacleField              │
//! │  ┌──────────┐ ┌──────────┐ ┌──────────┐  │
//! │  │ Obstacle │ │ Obstacle │ │   ...    │  │
//! │  └──────────┘ └──────────┘ └──────────┘  │
//! └──────────────────────────────────────────┘
//!                     │ impl
//!                     ▼
//!            ┌─────────────────┐
//!            │ CollisionProbe  │  raycast / nearest_hit / overlaps
//!            └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use gallery_collision::prelude::*;
//! use gallery_math::Vec3;
//!
//! let mut field = ObstacleField::new();
//! field.add(ObstacleDesc::cuboid([5.0, 5.0, 5.0]).at([10.0, 2.5, 0.0]))?;
//!
//! let distance = field.nearest_hit(Vec3::new(0.0, 2.0, 0.0), Vec3::X);
//! assert_eq!(distance, Some(7.5));
//! ```

pub mod error;
pub mod obstacle;
pub mod probe;

pub mod prelude {
    //! Common imports for collision functionality
    pub use crate::error::{CollisionError, Result};
    pub use crate::obstacle::{Obstacle, ObstacleDesc, ObstacleField, ObstacleId, ObstacleShape};
    pub use crate::probe::{CollisionProbe, ProbeStrategy, RaycastHit};
}

pub use prelude::*;
