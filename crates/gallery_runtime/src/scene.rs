//! Gallery scene layout
//!
//! The gallery floor is a square grid of identical boxes with an empty cell
//! at the origin where the dolly spawns.

use gallery_collision::{CollisionError, ObstacleDesc, ObstacleField};
use serde::{Deserialize, Serialize};

/// Obstacle grid and spawn point
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Grid covers `[-extent, extent)` on both x and z
    pub extent: f32,
    /// Distance between box centers
    pub spacing: f32,
    /// Edge length of each box
    pub box_size: f32,
    /// Leave the cell at the origin empty
    pub skip_origin: bool,
    /// Dolly start position (height is clamped into the vertical bounds)
    pub spawn: [f32; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            extent: 100.0,
            spacing: 10.0,
            box_size: 5.0,
            skip_origin: true,
            spawn: [0.0, 2.0, 5.0],
        }
    }
}

impl SceneConfig {
    /// Grid coordinates along one axis
    fn axis(&self) -> impl Iterator<Item = f32> + '_ {
        let cells = ((2.0 * self.extent) / self.spacing).ceil().max(0.0) as u32;
        (0..cells)
            .map(move |i| -self.extent + i as f32 * self.spacing)
            .filter(move |c| *c < self.extent)
    }

    /// Descriptions of every box in the grid, resting on the floor
    pub fn obstacle_descs(&self) -> Vec<ObstacleDesc> {
        let half = self.box_size * 0.5;
        let mut descs = Vec::new();
        for x in self.axis() {
            for z in self.axis() {
                if self.skip_origin && x == 0.0 && z == 0.0 {
                    continue;
                }
                descs.push(ObstacleDesc::cuboid([self.box_size; 3]).at([x, half, z]));
            }
        }
        descs
    }

    /// Build the obstacle field
    pub fn build_field(&self) -> Result<ObstacleField, CollisionError> {
        if !(self.spacing.is_finite() && self.spacing > 0.0) || !self.extent.is_finite() {
            return Err(CollisionError::InvalidShape(format!(
                "grid spacing {} / extent {}",
                self.spacing, self.extent
            )));
        }
        let field = ObstacleField::from_descs(self.obstacle_descs())?;
        log::info!(
            "Built gallery grid: {} boxes, spacing {}, extent {}",
            field.len(),
            self.spacing,
            self.extent
        );
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_collision::CollisionProbe;
    use gallery_math::Vec3;

    #[test]
    fn test_default_grid_layout() {
        let field = SceneConfig::default().build_field().unwrap();
        // 20 x 20 cells minus the origin
        assert_eq!(field.len(), 399);

        let bounds = field.iter().map(|o| *o.bounds()).collect::<Vec<_>>();
        assert!(bounds.iter().all(|b| b.min.y == 0.0 && b.max.y == 5.0));
        assert!(!bounds.iter().any(|b| b.contains_point(Vec3::new(0.0, 2.0, 0.0))));
        assert!(bounds.iter().any(|b| b.contains_point(Vec3::new(-100.0, 2.0, 90.0))));
        assert!(!bounds.iter().any(|b| b.contains_point(Vec3::new(100.0, 2.0, 0.0))));
    }

    #[test]
    fn test_spawn_has_clear_view_down_the_aisle() {
        let config = SceneConfig::default();
        let field = config.build_field().unwrap();
        let spawn = Vec3::from_array(config.spawn);

        // Nearest box straight ahead is centered at z = -10
        let distance = field.nearest_hit(spawn, Vec3::NEG_Z).unwrap();
        assert_eq!(distance, 12.5);
    }

    #[test]
    fn test_keep_origin_cell() {
        let config = SceneConfig {
            skip_origin: false,
            ..Default::default()
        };
        assert_eq!(config.obstacle_descs().len(), 400);
    }

    #[test]
    fn test_rejects_bad_grid() {
        let config = SceneConfig {
            spacing: 0.0,
            ..Default::default()
        };
        assert!(config.build_field().is_err());

        let config = SceneConfig {
            box_size: -1.0,
            ..Default::default()
        };
        assert!(config.build_field().is_err());
    }
}
