//! Invariant tests for gallery_combat

use gallery_combat::*;
use gallery_math::Vec3;

/// INVARIANT: repeated fire within the cooldown spawns at most one projectile
#[test]
fn invariant_cooldown_idempotence() {
    let mut manager = ProjectileManager::new(ProjectileConfig::default());

    let fired = (0..10)
        .filter_map(|_| manager.fire(Vec3::ZERO, Vec3::NEG_Z))
        .count();

    assert_eq!(fired, 1);
    assert_eq!(manager.len(), 1);
}

/// SCENARIO: fire at t=0, retry at t=0.2 and t=0.6 with a 0.5s cooldown
#[test]
fn scenario_fire_cadence() {
    let config = ProjectileConfig::default()
        .with_cooldown(0.5)
        .with_max_lifetime(Some(2.0));
    let mut manager = ProjectileManager::new(config);
    let shooter = Vec3::new(0.0, 2.0, 5.0);

    assert!(manager.fire(shooter, Vec3::NEG_Z).is_some());

    manager.tick(0.2, shooter);
    assert!(manager.fire(shooter, Vec3::NEG_Z).is_none());
    assert_eq!(manager.len(), 1);

    manager.tick(0.4, shooter);
    assert!(manager.fire(shooter, Vec3::NEG_Z).is_some());
    assert_eq!(manager.len(), 2);
}

/// INVARIANT: a projectile beyond range is gone after the next tick, for good
#[test]
fn invariant_range_expiry_is_final() {
    let config = ProjectileConfig::default()
        .with_speed(50.0)
        .with_max_range(Some(10.0))
        .with_max_lifetime(None);
    let mut manager = ProjectileManager::new(config);
    let id = manager.fire(Vec3::ZERO, Vec3::X).unwrap();

    assert_eq!(manager.tick(0.1, Vec3::ZERO), 0);
    assert!(manager.get(id).is_some());

    assert_eq!(manager.tick(0.2, Vec3::ZERO), 1);
    for _ in 0..10 {
        manager.tick(0.1, Vec3::ZERO);
        assert!(manager.get(id).is_none());
        assert!(manager
            .projectiles()
            .iter()
            .all(|p| p.position.distance(Vec3::ZERO) <= 10.0));
    }
}

/// INVARIANT: range is measured from the reference point, not the spawn point
#[test]
fn invariant_range_follows_reference() {
    let config = ProjectileConfig::default()
        .with_speed(1.0)
        .with_max_range(Some(10.0))
        .with_max_lifetime(None);
    let mut manager = ProjectileManager::new(config);
    manager.fire(Vec3::ZERO, Vec3::X);

    // Shooter walked far away from a slow projectile
    assert_eq!(manager.tick(0.1, Vec3::new(0.0, 0.0, 50.0)), 1);
    assert!(manager.is_empty());
}
