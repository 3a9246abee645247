//! # gallery_math - Geometry Primitives
//!
//! The small math kernel shared by collision, locomotion and projectiles:
//! vectors, rotation quaternions, rays and axis-aligned boxes, plus the
//! ray intersection tests the collision probe is built on.

pub mod vector;
pub mod quaternion;
pub mod bounds;
pub mod ray;
pub mod intersect;

pub use vector::*;
pub use quaternion::*;
pub use bounds::*;
pub use ray::*;
pub use intersect::*;

/// Common math constants
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const FRAC_PI_2: f32 = PI / 2.0;
}

/// Clamp value between min and max
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min { min }
    else if value > max { max }
    else { value }
}

/// Replace NaN and infinities with zero
#[inline]
pub fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

pub mod prelude {
    pub use crate::vector::{Vec2, Vec3};
    pub use crate::quaternion::Quat;
    pub use crate::bounds::{AABB, Sphere};
    pub use crate::ray::Ray;
    pub use crate::intersect::{ray_aabb, ray_aabb_with_normal, ray_sphere, ray_sphere_with_normal};
    pub use crate::{clamp, finite_or_zero};
}
