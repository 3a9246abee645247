//! Obstacle types and the static obstacle field

use crate::error::{CollisionError, Result};
use gallery_math::{Ray, Sphere, Vec3, AABB};
use serde::{Deserialize, Serialize};

/// Identifier of an obstacle within its field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

/// Solid shape of an obstacle, centered on its position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleShape {
    /// Axis-aligned box with half-extents
    Box {
        half_extents: [f32; 3],
    },
    /// Sphere with radius
    Sphere {
        radius: f32,
    },
}

impl Default for ObstacleShape {
    fn default() -> Self {
        Self::Box {
            half_extents: [0.5, 0.5, 0.5],
        }
    }
}

impl ObstacleShape {
    /// Create a box shape from half-extents
    pub fn cuboid(hx: f32, hy: f32, hz: f32) -> Self {
        Self::Box {
            half_extents: [hx, hy, hz],
        }
    }

    /// Create a box shape from full size
    pub fn from_size(width: f32, height: f32, depth: f32) -> Self {
        Self::cuboid(width * 0.5, height * 0.5, depth * 0.5)
    }

    /// Create a sphere shape
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    fn validate(&self) -> Result<()> {
        let ok = match self {
            Self::Box { half_extents } => half_extents.iter().all(|h| h.is_finite() && *h > 0.0),
            Self::Sphere { radius } => radius.is_finite() && *radius > 0.0,
        };

        if ok {
            Ok(())
        } else {
            Err(CollisionError::InvalidShape(format!("{:?}", self)))
        }
    }
}

/// Description of an obstacle to place in a field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleDesc {
    /// Shape of the obstacle
    pub shape: ObstacleShape,
    /// World-space center
    #[serde(default)]
    pub position: [f32; 3],
}

impl ObstacleDesc {
    /// Create a description with the given shape at the origin
    pub fn new(shape: ObstacleShape) -> Self {
        Self {
            shape,
            position: [0.0; 3],
        }
    }

    /// Box obstacle from full size
    pub fn cuboid(size: [f32; 3]) -> Self {
        Self::new(ObstacleShape::from_size(size[0], size[1], size[2]))
    }

    /// Sphere obstacle
    pub fn sphere(radius: f32) -> Self {
        Self::new(ObstacleShape::sphere(radius))
    }

    /// Set the world-space center
    pub fn at(mut self, position: [f32; 3]) -> Self {
        self.position = position;
        self
    }
}

/// A placed, immutable obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    id: ObstacleId,
    position: Vec3,
    shape: ObstacleShape,
    bounds: AABB,
}

impl Obstacle {
    /// Obstacle identifier
    pub fn id(&self) -> ObstacleId {
        self.id
    }

    /// World-space center
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Shape
    pub fn shape(&self) -> &ObstacleShape {
        &self.shape
    }

    /// Precomputed world-space bounding box
    pub fn bounds(&self) -> &AABB {
        &self.bounds
    }

    /// Distance along `ray` to this obstacle's surface, with the surface normal
    pub fn intersect_ray(&self, ray: &Ray) -> Option<(f32, Vec3)> {
        match self.shape {
            ObstacleShape::Box { .. } => gallery_math::ray_aabb_with_normal(ray, &self.bounds),
            ObstacleShape::Sphere { radius } => {
                gallery_math::ray_sphere_with_normal(ray, &Sphere::new(self.position, radius))
            }
        }
    }

    /// Whether `aabb` touches this obstacle
    pub fn overlaps_aabb(&self, aabb: &AABB) -> bool {
        match self.shape {
            ObstacleShape::Box { .. } => self.bounds.intersects(aabb),
            ObstacleShape::Sphere { radius } => Sphere::new(self.position, radius).intersects_aabb(aabb),
        }
    }
}

/// The static set of obstacles in a scene.
///
/// Populated once during scene setup through [`ObstacleField::add`]; gameplay
/// only ever borrows it immutably.
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    /// Create an empty field
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a field from a list of descriptions
    pub fn from_descs<I>(descs: I) -> Result<Self>
    where
        I: IntoIterator<Item = ObstacleDesc>,
    {
        let mut field = Self::new();
        for desc in descs {
            field.add(desc)?;
        }
        Ok(field)
    }

    /// Place an obstacle
    pub fn add(&mut self, desc: ObstacleDesc) -> Result<ObstacleId> {
        desc.shape.validate()?;
        if !desc.position.iter().all(|c| c.is_finite()) {
            return Err(CollisionError::InvalidPosition(desc.position));
        }

        let position = Vec3::from_array(desc.position);
        let bounds = match desc.shape {
            ObstacleShape::Box { half_extents } => {
                AABB::from_center_half_extents(position, Vec3::from_array(half_extents))
            }
            ObstacleShape::Sphere { radius } => Sphere::new(position, radius).to_aabb(),
        };

        let id = ObstacleId(self.obstacles.len() as u32);
        self.obstacles.push(Obstacle {
            id,
            position,
            shape: desc.shape,
            bounds,
        });

        log::trace!("Placed obstacle {:?} at {:?}", id, desc.position);
        Ok(id)
    }

    /// Look up an obstacle
    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id.0 as usize)
    }

    /// Iterate over all obstacles
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// Number of obstacles
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    /// Whether the field has no obstacles
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}
