//! Projectile lifecycle

use crate::error::{CombatError, Result};
use gallery_math::{finite_or_zero, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Unique projectile identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(pub u64);

/// Projectile configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Projectile speed
    pub speed: f32,
    /// Minimum seconds between shots
    pub cooldown: f32,
    /// Removed beyond this distance from the reference point
    pub max_range: Option<f32>,
    /// Removed after this many seconds in flight
    pub max_lifetime: Option<f32>,
    /// Spawn offset from the eye, in view space
    pub muzzle_offset: [f32; 3],
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 20.0,
            cooldown: 0.5,
            max_range: Some(100.0),
            max_lifetime: Some(5.0),
            muzzle_offset: [0.0, -0.1, -0.15],
        }
    }
}

impl ProjectileConfig {
    /// Set speed
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Set cooldown
    pub fn with_cooldown(mut self, cooldown: f32) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Set maximum range (`None` disables range expiry)
    pub fn with_max_range(mut self, range: Option<f32>) -> Self {
        self.max_range = range;
        self
    }

    /// Set maximum lifetime (`None` disables age expiry)
    pub fn with_max_lifetime(mut self, lifetime: Option<f32>) -> Self {
        self.max_lifetime = lifetime;
        self
    }

    /// World-space spawn point for a shot from `eye` looking along `orientation`
    pub fn muzzle_position(&self, eye: Vec3, orientation: Quat) -> Vec3 {
        eye + orientation * Vec3::from_array(self.muzzle_offset)
    }

    /// Check that all values are usable
    pub fn validate(&self) -> Result<()> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(CombatError::InvalidConfig(format!(
                "speed must be positive, got {}",
                self.speed
            )));
        }
        if !(self.cooldown.is_finite() && self.cooldown >= 0.0) {
            return Err(CombatError::InvalidConfig(format!(
                "cooldown must be non-negative, got {}",
                self.cooldown
            )));
        }
        for (name, limit) in [("max_range", self.max_range), ("max_lifetime", self.max_lifetime)] {
            if let Some(value) = limit {
                if !(value.is_finite() && value > 0.0) {
                    return Err(CombatError::InvalidConfig(format!(
                        "{} must be positive, got {}",
                        name, value
                    )));
                }
            }
        }
        if !self.muzzle_offset.iter().all(|c| c.is_finite()) {
            return Err(CombatError::InvalidConfig(format!(
                "muzzle_offset must be finite, got {:?}",
                self.muzzle_offset
            )));
        }
        Ok(())
    }
}

/// A projectile in flight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub id: ProjectileId,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Spawn point
    pub origin: Vec3,
    /// Seconds since spawn
    pub age: f32,
}

impl Projectile {
    /// Distance travelled from the spawn point
    pub fn travelled(&self) -> f32 {
        self.position.distance(self.origin)
    }
}

/// Owns all live projectiles
#[derive(Debug, Clone, Default)]
pub struct ProjectileManager {
    config: ProjectileConfig,
    projectiles: Vec<Projectile>,
    cooldown: f32,
    next_id: u64,
}

impl ProjectileManager {
    /// Create an empty manager, ready to fire
    pub fn new(config: ProjectileConfig) -> Self {
        Self {
            config,
            projectiles: Vec::new(),
            cooldown: 0.0,
            next_id: 0,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &ProjectileConfig {
        &self.config
    }

    /// Check if a shot would be accepted now
    pub fn can_fire(&self) -> bool {
        self.cooldown <= 0.0
    }

    /// Seconds until the next shot is accepted
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Attempt to fire from `origin` along `direction`.
    ///
    /// Returns `None` while cooling down or when `direction` has no length;
    /// neither case restarts the cooldown.
    pub fn fire(&mut self, origin: Vec3, direction: Vec3) -> Option<ProjectileId> {
        if !self.can_fire() {
            log::trace!("Fire ignored, cooldown {:.3}s", self.cooldown);
            return None;
        }

        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO || !origin.is_finite() {
            return None;
        }

        let id = ProjectileId(self.next_id);
        self.next_id += 1;
        self.projectiles.push(Projectile {
            id,
            position: origin,
            velocity: direction * self.config.speed,
            origin,
            age: 0.0,
        });
        self.cooldown = self.config.cooldown;

        log::debug!("Spawned projectile {:?} at {:?} along {:?}", id, origin, direction);
        Some(id)
    }

    /// Advance all projectiles by `dt` and drop expired ones.
    ///
    /// Range is measured from `reference` (normally the shooter).
    /// Returns the number of projectiles removed.
    pub fn tick(&mut self, dt: f32, reference: Vec3) -> usize {
        let dt = finite_or_zero(dt).max(0.0);
        self.cooldown = (self.cooldown - dt).max(0.0);

        for projectile in &mut self.projectiles {
            projectile.position += projectile.velocity * dt;
            projectile.age += dt;
        }

        let max_range = self.config.max_range;
        let max_lifetime = self.config.max_lifetime;
        let before = self.projectiles.len();
        self.projectiles.retain(|p| {
            let out_of_range = max_range.is_some_and(|r| p.position.distance(reference) > r);
            let too_old = max_lifetime.is_some_and(|l| p.age > l);
            if out_of_range || too_old {
                log::trace!("Projectile {:?} expired after {:.2}s", p.id, p.age);
                false
            } else {
                true
            }
        });

        before - self.projectiles.len()
    }

    /// Live projectiles
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Look up a live projectile
    pub fn get(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id == id)
    }

    /// Number of live projectiles
    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    /// Whether nothing is in flight
    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    /// Remove all projectiles and reset the cooldown
    pub fn clear(&mut self) {
        self.projectiles.clear();
        self.cooldown = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fire_sets_velocity_and_cooldown() {
        let mut manager = ProjectileManager::new(ProjectileConfig::default().with_speed(10.0));
        let id = manager.fire(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0)).unwrap();

        let projectile = manager.get(id).unwrap();
        assert_eq!(projectile.velocity, Vec3::new(0.0, 0.0, -10.0));
        assert_eq!(projectile.origin, Vec3::ZERO);
        assert_eq!(manager.cooldown(), 0.5);
        assert!(!manager.can_fire());
    }

    #[test]
    fn test_zero_direction_keeps_cooldown_free() {
        let mut manager = ProjectileManager::new(ProjectileConfig::default());
        assert!(manager.fire(Vec3::ZERO, Vec3::ZERO).is_none());
        assert!(manager.can_fire());
        assert!(manager.is_empty());
    }

    #[test]
    fn test_tick_integrates() {
        let mut manager = ProjectileManager::new(ProjectileConfig::default().with_speed(10.0));
        manager.fire(Vec3::ZERO, Vec3::X);
        manager.tick(0.25, Vec3::ZERO);

        let projectile = manager.projectiles()[0];
        assert_relative_eq!(projectile.position.x, 2.5);
        assert_relative_eq!(projectile.age, 0.25);
        assert_relative_eq!(projectile.travelled(), 2.5);
    }

    #[test]
    fn test_cooldown_floors_at_zero() {
        let mut manager = ProjectileManager::new(ProjectileConfig::default());
        manager.fire(Vec3::ZERO, Vec3::X);
        manager.tick(2.0, Vec3::ZERO);
        assert_eq!(manager.cooldown(), 0.0);

        manager.tick(f32::NAN, Vec3::ZERO);
        assert_eq!(manager.cooldown(), 0.0);
    }

    #[test]
    fn test_lifetime_expiry() {
        let config = ProjectileConfig::default()
            .with_max_range(None)
            .with_max_lifetime(Some(1.0));
        let mut manager = ProjectileManager::new(config);
        manager.fire(Vec3::ZERO, Vec3::X);

        assert_eq!(manager.tick(0.75, Vec3::ZERO), 0);
        assert_eq!(manager.tick(0.5, Vec3::ZERO), 1);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut manager = ProjectileManager::new(ProjectileConfig::default().with_cooldown(0.0));
        let a = manager.fire(Vec3::ZERO, Vec3::X).unwrap();
        let b = manager.fire(Vec3::ZERO, Vec3::X).unwrap();
        assert_ne!(a, b);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_muzzle_follows_view() {
        let config = ProjectileConfig::default();
        let eye = Vec3::new(0.0, 2.0, 5.0);

        let muzzle = config.muzzle_position(eye, Quat::IDENTITY);
        assert_relative_eq!(muzzle.y, 1.9, epsilon = 1e-6);
        assert_relative_eq!(muzzle.z, 4.85, epsilon = 1e-6);
    }

    #[test]
    fn test_validation() {
        assert!(ProjectileConfig::default().validate().is_ok());
        assert!(ProjectileConfig::default().with_speed(0.0).validate().is_err());
        assert!(ProjectileConfig::default().with_cooldown(-0.1).validate().is_err());
        assert!(ProjectileConfig::default()
            .with_max_range(Some(-5.0))
            .validate()
            .is_err());
    }
}
