//! Gallery Locomotion - Input, Orientation and Collision-Validated Movement
//!
//! Turns raw per-frame input into agent movement that never enters the
//! obstacle field.
//!
//! # Features
//!
//! - Keyboard, mouse-look and thumbstick input with NaN/missing-axis sanitizing
//! - Yaw/pitch tracking with pitch clamping, or a tracked headset pose
//! - Three interchangeable collision policies (ray block, ray resolve, volume)
//! - Fixed or frame-time scaled step lengths
//! - Vertical bounds applied to every committed move
//!
//! # Frame flow
//!
//! ```text
//!  InputState ──► OrientationTracker ──► forward / right / orientation
//!       │                                        │
//!       └───────────────► LocomotionController ◄┘
//!                               │  try_move
//!                               ▼
//!                     CollisionProbe (&ObstacleField)
//!                               │
//!                      commit or reject ──► Agent
//! ```
//!
//! # Example
//!
//! ```ignore
//! use gallery_locomotion::prelude::*;
//! use gallery_collision::ObstacleField;
//! use gallery_math::Vec3;
//!
//! let config = LocomotionConfig::default();
//! let controller = LocomotionController::new(config.clone());
//! let mut agent = Agent::new(Vec3::new(0.0, 2.0, 5.0), config.vertical_bounds)?;
//! let tracker = OrientationTracker::new();
//! let field = ObstacleField::new();
//!
//! let input = InputState::new().with_key(MoveKey::Forward);
//! controller.update(&mut agent, &input, &tracker, 1.0 / 60.0, &field);
//! ```

pub mod agent;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod orientation;

pub mod prelude {
    //! Common imports for locomotion
    pub use crate::agent::Agent;
    pub use crate::config::{
        CollisionPolicy, LocomotionConfig, ProbeDirection, ProbeProfile, StepMode, VerticalBounds,
        MAX_GAMEPAD_AXES,
    };
    pub use crate::controller::{LocomotionController, MoveReport, MoveRequest};
    pub use crate::error::{LocomotionError, Result};
    pub use crate::input::{AnalogInput, FireLatch, InputState, KeyState, MoveKey};
    pub use crate::orientation::{OrientationTracker, MAX_PITCH};
}

pub use prelude::*;
