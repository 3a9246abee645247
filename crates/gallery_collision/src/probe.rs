//! Collision probes (raycasting, volume overlap)

use crate::obstacle::{ObstacleField, ObstacleId};
use gallery_math::{Ray, Vec3, AABB};
use serde::{Deserialize, Serialize};

/// Which question a mover asks of the obstacle field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStrategy {
    /// Nearest-hit distance along a ray
    #[default]
    Ray,
    /// Bounding-box overlap at the candidate position
    Volume,
}

/// Result of a raycast query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// The obstacle that was hit
    pub obstacle: ObstacleId,
    /// Hit point in world space
    pub point: Vec3,
    /// Surface normal at hit point
    pub normal: Vec3,
    /// Distance from ray origin
    pub distance: f32,
}

/// Read-only collision queries against static geometry.
///
/// [`ObstacleField`] implements this with a linear scan. Any other
/// implementation (a spatial index, say) must return identical answers.
pub trait CollisionProbe {
    /// Closest hit along a ray within `max_distance`
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RaycastHit>;

    /// Whether `candidate` overlaps any obstacle
    fn overlaps(&self, candidate: &AABB) -> bool;

    /// Distance to the closest obstacle along a ray, if any
    fn nearest_hit(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        self.raycast(origin, direction, f32::INFINITY)
            .map(|hit| hit.distance)
    }
}

impl CollisionProbe for ObstacleField {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RaycastHit> {
        let ray = Ray::new(origin, direction);
        if !ray.is_valid() {
            return None;
        }

        let mut best: Option<RaycastHit> = None;
        for obstacle in self.iter() {
            let Some((distance, normal)) = obstacle.intersect_ray(&ray) else {
                continue;
            };
            if distance > max_distance {
                continue;
            }
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(RaycastHit {
                    obstacle: obstacle.id(),
                    point: ray.at(distance),
                    normal,
                    distance,
                });
            }
        }

        if let Some(hit) = &best {
            log::trace!(
                "Ray from {:?} hit {:?} at distance {:.3}",
                origin,
                hit.obstacle,
                hit.distance
            );
        }
        best
    }

    fn overlaps(&self, candidate: &AABB) -> bool {
        self.iter().any(|obstacle| obstacle.overlaps_aabb(candidate))
    }
}
