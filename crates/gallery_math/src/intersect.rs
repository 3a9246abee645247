//! Intersection tests for raycasting and collision detection
//!
//! Ray tests report the distance along the ray to the first surface crossed.
//! A ray that starts inside a solid reports distance `0.0`: the origin is
//! already in contact with it.

use crate::bounds::{AABB, Sphere};
use crate::ray::Ray;
use crate::vector::Vec3;

const PARALLEL_EPSILON: f32 = 1e-8;

/// Slab test returning `(t_near, t_far, entry_axis, entry_sign)`
fn slab_interval(ray: &Ray, aabb: &AABB) -> Option<(f32, f32, usize, f32)> {
    let origin = ray.origin.to_array();
    let dir = ray.direction.to_array();
    let lo = aabb.min.to_array();
    let hi = aabb.max.to_array();

    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    let mut axis = 0;
    let mut sign = 0.0;

    for i in 0..3 {
        if dir[i].abs() < PARALLEL_EPSILON {
            // Parallel to this slab: must already lie between its planes
            if origin[i] < lo[i] || origin[i] > hi[i] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / dir[i];
        let mut t0 = (lo[i] - origin[i]) * inv;
        let mut t1 = (hi[i] - origin[i]) * inv;
        let mut face = -1.0;
        if t0 > t1 {
            core::mem::swap(&mut t0, &mut t1);
            face = 1.0;
        }

        if t0 > t_near {
            t_near = t0;
            axis = i;
            sign = face;
        }
        t_far = t_far.min(t1);

        if t_near > t_far {
            return None;
        }
    }

    Some((t_near, t_far, axis, sign))
}

/// Ray-AABB intersection using the slab method
///
/// Returns the distance along the ray to the intersection point,
/// or None if the ray doesn't intersect the AABB.
pub fn ray_aabb(ray: &Ray, aabb: &AABB) -> Option<f32> {
    if !ray.is_valid() {
        return None;
    }

    let (t_near, t_far, _, _) = slab_interval(ray, aabb)?;

    // Box entirely behind the origin
    if t_far < 0.0 {
        return None;
    }

    Some(t_near.max(0.0))
}

/// Ray-AABB intersection with the normal of the entered face
///
/// For a ray starting inside the box the normal opposes the ray direction.
pub fn ray_aabb_with_normal(ray: &Ray, aabb: &AABB) -> Option<(f32, Vec3)> {
    if !ray.is_valid() {
        return None;
    }

    let (t_near, t_far, axis, sign) = slab_interval(ray, aabb)?;
    if t_far < 0.0 {
        return None;
    }
    if t_near <= 0.0 {
        return Some((0.0, -ray.direction));
    }

    let mut normal = [0.0f32; 3];
    normal[axis] = sign;
    Some((t_near, Vec3::from_array(normal)))
}

/// Ray-Sphere intersection
///
/// Returns the distance along the ray to the nearest intersection point,
/// or None if the ray doesn't intersect the sphere.
pub fn ray_sphere(ray: &Ray, sphere: &Sphere) -> Option<f32> {
    if !ray.is_valid() {
        return None;
    }

    let oc = ray.origin - sphere.center;
    let b = oc.dot(ray.direction);
    let c = oc.dot(oc) - sphere.radius * sphere.radius;

    // Origin inside the sphere
    if c <= 0.0 {
        return Some(0.0);
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let t = -b - discriminant.sqrt();
    if t >= 0.0 { Some(t) } else { None }
}

/// Ray-Sphere intersection with normal
pub fn ray_sphere_with_normal(ray: &Ray, sphere: &Sphere) -> Option<(f32, Vec3)> {
    let t = ray_sphere(ray, sphere)?;
    if t == 0.0 {
        return Some((0.0, -ray.direction));
    }
    let normal = (ray.at(t) - sphere.center).normalize_or_zero();
    Some((t, normal))
}
