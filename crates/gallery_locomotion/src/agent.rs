//! The moving agent ("dolly")

use crate::config::VerticalBounds;
use crate::error::{LocomotionError, Result};
use gallery_math::{Vec3, AABB};

/// A body moved by the locomotion controller.
///
/// Only [`LocomotionController`](crate::controller::LocomotionController)
/// changes the position, and only by committing a whole validated step.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    position: Vec3,
    vertical_bounds: VerticalBounds,
    collision_radius: Option<f32>,
}

impl Agent {
    /// Place an agent; the starting height is clamped into `vertical_bounds`
    pub fn new(position: Vec3, vertical_bounds: VerticalBounds) -> Result<Self> {
        vertical_bounds
            .validate()
            .map_err(|e| LocomotionError::InvalidAgent(e.to_string()))?;
        if !position.is_finite() {
            return Err(LocomotionError::InvalidAgent(format!(
                "position must be finite, got {:?}",
                position
            )));
        }

        Ok(Self {
            position: position.with_y(vertical_bounds.clamp(position.y)),
            vertical_bounds,
            collision_radius: None,
        })
    }

    /// Give the agent a box half-extent for volume collision
    pub fn with_collision_radius(mut self, radius: f32) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(LocomotionError::InvalidAgent(format!(
                "collision radius must be positive, got {}",
                radius
            )));
        }
        self.collision_radius = Some(radius);
        Ok(self)
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Allowed height range
    pub fn vertical_bounds(&self) -> VerticalBounds {
        self.vertical_bounds
    }

    /// Box half-extent used by the volume policy, if set
    pub fn collision_radius(&self) -> Option<f32> {
        self.collision_radius
    }

    /// Agent box centered at `center`
    pub fn bounds_at(&self, center: Vec3, fallback_radius: f32) -> AABB {
        let radius = self.collision_radius.unwrap_or(fallback_radius);
        AABB::from_center_half_extents(center, Vec3::splat(radius))
    }

    pub(crate) fn commit(&mut self, position: Vec3) {
        self.position = position;
    }
}
