//! Game Systems Integration
//!
//! Ties the obstacle field, locomotion and projectiles into one per-frame
//! update: orientation, then movement, then firing and the projectile sweep.

use gallery_collision::ObstacleField;
use gallery_combat::{ProjectileId, ProjectileManager};
use gallery_locomotion::{
    Agent, FireLatch, InputState, LocomotionController, MoveReport, OrientationTracker,
};
use gallery_math::{finite_or_zero, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::boot_config::{BootConfig, BootError};

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Movement steps proposed and committed
    pub movement: MoveReport,
    /// Projectile spawned this frame
    pub fired: Option<ProjectileId>,
    /// Projectiles removed by the expiry sweep
    pub expired: usize,
}

/// Running totals over a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub frames: u64,
    pub steps_attempted: u64,
    pub steps_committed: u64,
    pub shots_fired: u64,
    pub projectiles_expired: u64,
}

impl SessionStats {
    fn record(&mut self, report: &FrameReport) {
        self.frames += 1;
        self.steps_attempted += u64::from(report.movement.attempted);
        self.steps_committed += u64::from(report.movement.committed);
        if report.fired.is_some() {
            self.shots_fired += 1;
        }
        self.projectiles_expired += report.expired as u64;
    }
}

/// Projectile state as seen by a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    pub id: u64,
    pub position: [f32; 3],
    pub age: f32,
}

/// Everything a renderer host needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub elapsed: f32,
    /// Dolly position
    pub position: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    /// Headset pose is driving the view
    pub headset: bool,
    pub projectiles: Vec<ProjectileSnapshot>,
}

/// Game world: static scene plus the player's dolly and projectiles
pub struct GameWorld {
    field: ObstacleField,
    agent: Agent,
    tracker: OrientationTracker,
    controller: LocomotionController,
    projectiles: ProjectileManager,
    fire_latch: FireLatch,
    frame: u64,
    elapsed: f32,
    stats: SessionStats,
}

impl GameWorld {
    /// Build the scene and place the dolly at the spawn point
    pub fn new(config: &BootConfig) -> Result<Self, BootError> {
        config.validate()?;

        let field = config.scene.build_field()?;
        let agent = Agent::new(
            Vec3::from_array(config.scene.spawn),
            config.locomotion.vertical_bounds,
        )?;
        log::info!("Dolly spawned at {:?}", agent.position());

        Ok(Self::with_field(field, agent, config))
    }

    /// Assemble a world around an existing field and agent
    pub fn with_field(field: ObstacleField, agent: Agent, config: &BootConfig) -> Self {
        Self {
            field,
            agent,
            tracker: OrientationTracker::new(),
            controller: LocomotionController::new(config.locomotion.clone()),
            projectiles: ProjectileManager::new(config.projectiles.clone()),
            fire_latch: FireLatch::new(),
            frame: 0,
            elapsed: 0.0,
            stats: SessionStats::default(),
        }
    }

    /// Follow (or stop following) a tracked headset
    pub fn set_headset_pose(&mut self, pose: Option<Quat>) {
        match pose {
            Some(orientation) => self.tracker.apply_headset_pose(orientation),
            None => self.tracker.release_headset(),
        }
    }

    /// Advance one frame
    pub fn update(&mut self, dt: f32, input: &InputState) -> FrameReport {
        let dt = finite_or_zero(dt).max(0.0);
        let config = self.controller.config();

        self.tracker
            .apply_mouse_delta(input.mouse_delta, config.mouse_sensitivity);

        let movement = self
            .controller
            .update(&mut self.agent, input, &self.tracker, dt, &self.field);

        let fired = if self.fire_latch.update(input.fire) {
            self.fire()
        } else {
            None
        };

        let expired = self.projectiles.tick(dt, self.agent.position());

        self.frame += 1;
        self.elapsed += dt;
        let report = FrameReport {
            movement,
            fired,
            expired,
        };
        self.stats.record(&report);
        report
    }

    fn fire(&mut self) -> Option<ProjectileId> {
        let orientation = self.tracker.orientation();
        let muzzle = self
            .projectiles
            .config()
            .muzzle_position(self.agent.position(), orientation);
        self.projectiles.fire(muzzle, orientation.forward())
    }

    /// The dolly
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// View orientation
    pub fn tracker(&self) -> &OrientationTracker {
        &self.tracker
    }

    /// Live projectiles
    pub fn projectiles(&self) -> &ProjectileManager {
        &self.projectiles
    }

    /// Static obstacles
    pub fn field(&self) -> &ObstacleField {
        &self.field
    }

    /// Totals since the world was created
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Frames simulated
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Renderer-facing view of the current state
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            frame: self.frame,
            elapsed: self.elapsed,
            position: self.agent.position().to_array(),
            yaw: self.tracker.yaw(),
            pitch: self.tracker.pitch(),
            headset: self.tracker.has_headset(),
            projectiles: self
                .projectiles
                .projectiles()
                .iter()
                .map(|p| ProjectileSnapshot {
                    id: p.id.0,
                    position: p.position.to_array(),
                    age: p.age,
                })
                .collect(),
        }
    }

    /// One-line state summary
    pub fn debug_info(&self) -> String {
        let p = self.agent.position();
        format!(
            "Frame {} | Dolly ({:.2}, {:.2}, {:.2}) yaw {:.2} pitch {:.2} | Projectiles: {} | Obstacles: {}",
            self.frame,
            p.x,
            p.y,
            p.z,
            self.tracker.yaw(),
            self.tracker.pitch(),
            self.projectiles.len(),
            self.field.len()
        )
    }
}
