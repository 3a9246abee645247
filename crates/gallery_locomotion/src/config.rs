//! Locomotion configuration

use crate::error::{LocomotionError, Result};
use gallery_collision::ProbeStrategy;
use serde::{Deserialize, Serialize};

/// Gamepads expose fewer axes than this
pub const MAX_GAMEPAD_AXES: usize = 16;

/// How the length of one movement step is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepMode {
    /// `speed` units per call, independent of frame time
    #[default]
    Fixed,
    /// `speed * dt` units per call
    Continuous,
}

/// How a candidate position is validated against the obstacle field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// One ray ahead; a hit inside the wall limit rejects the step
    #[default]
    RayBlock,
    /// Forward ray rejects, side rays push the agent off nearby walls
    RayResolve,
    /// Agent box at the candidate must not overlap any obstacle
    Volume,
}

impl CollisionPolicy {
    /// Probe strategy this policy relies on
    pub fn strategy(&self) -> ProbeStrategy {
        match self {
            Self::RayBlock | Self::RayResolve => ProbeStrategy::Ray,
            Self::Volume => ProbeStrategy::Volume,
        }
    }
}

impl std::fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RayBlock => write!(f, "ray_block"),
            Self::RayResolve => write!(f, "ray_resolve"),
            Self::Volume => write!(f, "volume"),
        }
    }
}

impl std::str::FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "ray_block" | "ray" | "block" => Ok(Self::RayBlock),
            "ray_resolve" | "resolve" | "slide" => Ok(Self::RayResolve),
            "volume" | "aabb" | "box" => Ok(Self::Volume),
            _ => Err(format!("Unknown collision policy: {}", s)),
        }
    }
}

/// Direction the wall-avoidance ray is cast in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeDirection {
    /// Along the movement direction
    Movement,
    /// Along the direction the camera faces
    Facing,
}

/// Ray settings for one input source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbeProfile {
    pub direction: ProbeDirection,
    /// Height added to the ray origin above the agent position
    pub eye_height: f32,
}

impl ProbeProfile {
    /// Keyboard walking: probe where the camera looks, from the dolly itself
    pub const KEYBOARD: Self = Self {
        direction: ProbeDirection::Facing,
        eye_height: 0.0,
    };

    /// Thumbstick walking: probe where the agent moves, from one unit up
    pub const THUMBSTICK: Self = Self {
        direction: ProbeDirection::Movement,
        eye_height: 1.0,
    };

    /// Create a profile
    pub fn new(direction: ProbeDirection, eye_height: f32) -> Self {
        Self { direction, eye_height }
    }
}

/// Allowed range for the agent's height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerticalBounds {
    pub min: f32,
    pub max: f32,
}

impl Default for VerticalBounds {
    fn default() -> Self {
        Self { min: 2.0, max: 5.0 }
    }
}

impl VerticalBounds {
    /// Create bounds
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamp a height into the bounds
    pub fn clamp(&self, y: f32) -> f32 {
        gallery_math::clamp(y, self.min, self.max)
    }

    /// Whether a height is inside the bounds
    pub fn contains(&self, y: f32) -> bool {
        y >= self.min && y <= self.max
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min > self.max {
            return Err(LocomotionError::InvalidConfig(format!(
                "vertical bounds must be finite with min <= max, got [{}, {}]",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Locomotion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Step length (fixed mode) or units per second (continuous mode)
    pub speed: f32,

    /// How step length is derived
    pub step_mode: StepMode,

    /// Minimum clearance to an obstacle ahead
    pub wall_limit: f32,

    /// Default height range for agents
    pub vertical_bounds: VerticalBounds,

    /// Candidate validation policy
    pub policy: CollisionPolicy,

    /// Ray settings for keyboard movement
    pub keyboard: ProbeProfile,

    /// Ray settings for thumbstick movement
    pub thumbstick: ProbeProfile,

    /// Radians of rotation per pixel of mouse movement
    pub mouse_sensitivity: f32,

    /// Gamepad axis indices of the thumbstick (horizontal, vertical)
    pub thumbstick_axes: [usize; 2],

    /// Stick deflection ignored as noise
    pub thumbstick_deadzone: f32,

    /// Agent box half-extent for the volume policy when the agent has none
    pub collision_radius: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            speed: 0.5,
            step_mode: StepMode::Fixed,
            wall_limit: 1.3,
            vertical_bounds: VerticalBounds::default(),
            policy: CollisionPolicy::RayBlock,
            keyboard: ProbeProfile::KEYBOARD,
            thumbstick: ProbeProfile::THUMBSTICK,
            mouse_sensitivity: 0.002,
            thumbstick_axes: [2, 3],
            thumbstick_deadzone: 0.0,
            collision_radius: 0.5,
        }
    }
}

impl LocomotionConfig {
    /// Frame-rate independent movement at `speed` units per second
    pub fn continuous(speed: f32) -> Self {
        Self {
            speed,
            step_mode: StepMode::Continuous,
            ..Default::default()
        }
    }

    /// Set speed
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Set step mode
    pub fn with_step_mode(mut self, step_mode: StepMode) -> Self {
        self.step_mode = step_mode;
        self
    }

    /// Set wall limit
    pub fn with_wall_limit(mut self, wall_limit: f32) -> Self {
        self.wall_limit = wall_limit;
        self
    }

    /// Set vertical bounds
    pub fn with_vertical_bounds(mut self, min: f32, max: f32) -> Self {
        self.vertical_bounds = VerticalBounds::new(min, max);
        self
    }

    /// Set collision policy
    pub fn with_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set keyboard probe profile
    pub fn with_keyboard_profile(mut self, profile: ProbeProfile) -> Self {
        self.keyboard = profile;
        self
    }

    /// Set thumbstick probe profile
    pub fn with_thumbstick_profile(mut self, profile: ProbeProfile) -> Self {
        self.thumbstick = profile;
        self
    }

    /// Set thumbstick dead zone
    pub fn with_thumbstick_deadzone(mut self, deadzone: f32) -> Self {
        self.thumbstick_deadzone = deadzone;
        self
    }

    /// Check that all values are usable
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(LocomotionError::InvalidConfig(msg));

        if !(self.speed.is_finite() && self.speed > 0.0) {
            return invalid(format!("speed must be positive, got {}", self.speed));
        }
        if !(self.wall_limit.is_finite() && self.wall_limit >= 0.0) {
            return invalid(format!("wall_limit must be non-negative, got {}", self.wall_limit));
        }
        self.vertical_bounds.validate()?;
        if !self.mouse_sensitivity.is_finite() {
            return invalid(format!(
                "mouse_sensitivity must be finite, got {}",
                self.mouse_sensitivity
            ));
        }
        if !(0.0..1.0).contains(&self.thumbstick_deadzone) {
            return invalid(format!(
                "thumbstick_deadzone must be in [0, 1), got {}",
                self.thumbstick_deadzone
            ));
        }
        if !(self.collision_radius.is_finite() && self.collision_radius > 0.0) {
            return invalid(format!(
                "collision_radius must be positive, got {}",
                self.collision_radius
            ));
        }
        if let Some(axis) = self.thumbstick_axes.iter().find(|&&a| a >= MAX_GAMEPAD_AXES) {
            return invalid(format!(
                "thumbstick axis index must be below {}, got {}",
                MAX_GAMEPAD_AXES, axis
            ));
        }
        for profile in [&self.keyboard, &self.thumbstick] {
            if !profile.eye_height.is_finite() {
                return invalid(format!("eye_height must be finite, got {}", profile.eye_height));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_gallery_demo() {
        let config = LocomotionConfig::default();
        assert_eq!(config.speed, 0.5);
        assert_eq!(config.step_mode, StepMode::Fixed);
        assert_eq!(config.wall_limit, 1.3);
        assert_eq!(config.vertical_bounds, VerticalBounds::new(2.0, 5.0));
        assert_eq!(config.thumbstick_axes, [2, 3]);
        assert_eq!(config.keyboard.direction, ProbeDirection::Facing);
        assert_eq!(config.thumbstick.eye_height, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let bad = [
            LocomotionConfig::default().with_speed(0.0),
            LocomotionConfig::default().with_speed(f32::NAN),
            LocomotionConfig::default().with_wall_limit(-1.0),
            LocomotionConfig::default().with_vertical_bounds(5.0, 2.0),
            LocomotionConfig::default().with_thumbstick_deadzone(1.0),
        ];
        for config in bad {
            assert!(matches!(
                config.validate(),
                Err(LocomotionError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_validation_rejects_out_of_range_axes() {
        let mut config = LocomotionConfig::default();
        config.thumbstick_axes = [usize::MAX, 3];
        assert!(matches!(
            config.validate(),
            Err(LocomotionError::InvalidConfig(_))
        ));

        config.thumbstick_axes = [0, MAX_GAMEPAD_AXES];
        assert!(config.validate().is_err());

        config.thumbstick_axes = [MAX_GAMEPAD_AXES - 1, 0];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_policy_strategy() {
        assert_eq!(CollisionPolicy::RayBlock.strategy(), ProbeStrategy::Ray);
        assert_eq!(CollisionPolicy::RayResolve.strategy(), ProbeStrategy::Ray);
        assert_eq!(CollisionPolicy::Volume.strategy(), ProbeStrategy::Volume);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("ray_block".parse::<CollisionPolicy>().unwrap(), CollisionPolicy::RayBlock);
        assert_eq!("Ray-Resolve".parse::<CollisionPolicy>().unwrap(), CollisionPolicy::RayResolve);
        assert_eq!("aabb".parse::<CollisionPolicy>().unwrap(), CollisionPolicy::Volume);
        assert!("teleport".parse::<CollisionPolicy>().is_err());

        for policy in [CollisionPolicy::RayBlock, CollisionPolicy::RayResolve, CollisionPolicy::Volume] {
            assert_eq!(policy.to_string().parse::<CollisionPolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn test_vertical_clamp() {
        let bounds = VerticalBounds::default();
        assert_eq!(bounds.clamp(-3.0), 2.0);
        assert_eq!(bounds.clamp(9.0), 5.0);
        assert_eq!(bounds.clamp(3.5), 3.5);
        assert!(bounds.contains(5.0));
    }
}
