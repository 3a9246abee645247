//! Collision-validated movement

use crate::agent::Agent;
use crate::config::{CollisionPolicy, LocomotionConfig, ProbeDirection, ProbeProfile, StepMode};
use crate::input::{AnalogInput, InputState, KeyState, MoveKey};
use crate::orientation::OrientationTracker;
use gallery_collision::CollisionProbe;
use gallery_math::Vec3;

/// One proposed step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRequest {
    /// Desired direction of travel, any length
    pub intent: Vec3,
    /// Direction the camera faces, used by facing-probe profiles
    pub facing: Vec3,
    /// Ray settings for this input source
    pub profile: ProbeProfile,
}

impl MoveRequest {
    /// Request that probes along its own direction
    pub fn new(intent: Vec3, profile: ProbeProfile) -> Self {
        Self {
            intent,
            facing: intent,
            profile,
        }
    }

    /// Set the facing direction
    pub fn with_facing(mut self, facing: Vec3) -> Self {
        self.facing = facing;
        self
    }
}

/// Outcome of driving an agent for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveReport {
    /// Steps proposed
    pub attempted: u32,
    /// Steps committed
    pub committed: u32,
}

impl MoveReport {
    fn record(&mut self, committed: bool) {
        self.attempted += 1;
        if committed {
            self.committed += 1;
        }
    }

    /// Steps rejected by collision
    pub fn blocked(&self) -> u32 {
        self.attempted - self.committed
    }
}

/// Turns input into validated agent movement
#[derive(Debug, Clone, Default)]
pub struct LocomotionController {
    config: LocomotionConfig,
}

impl LocomotionController {
    /// Create a controller
    pub fn new(config: LocomotionConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Length of one step for a frame of `dt` seconds
    pub fn step_length(&self, dt: f32) -> f32 {
        match self.config.step_mode {
            StepMode::Fixed => self.config.speed,
            StepMode::Continuous => self.config.speed * dt.max(0.0),
        }
    }

    /// Propose one step and commit it if the collision policy allows.
    ///
    /// The candidate height is clamped into the agent's vertical bounds before
    /// validation. Returns whether the agent moved; a rejected step leaves the
    /// agent untouched.
    pub fn try_move<P>(&self, agent: &mut Agent, request: &MoveRequest, dt: f32, probe: &P) -> bool
    where
        P: CollisionProbe + ?Sized,
    {
        let direction = request.intent.normalize_or_zero();
        let step = self.step_length(dt);
        if direction == Vec3::ZERO || !(step > 0.0) {
            return false;
        }

        let start = agent.position();
        let advanced = start + direction * step;
        let candidate = advanced.with_y(agent.vertical_bounds().clamp(advanced.y));

        let resolved = match self.config.policy {
            CollisionPolicy::RayBlock => {
                if self.ahead_blocked(probe, start, candidate, direction, step, request) {
                    None
                } else {
                    Some(candidate)
                }
            }
            CollisionPolicy::RayResolve => {
                if self.ahead_blocked(probe, start, candidate, direction, step, request) {
                    None
                } else {
                    let pushed =
                        self.push_from_sides(probe, candidate, direction, request.profile.eye_height);
                    // A push can swing the probe onto a wall the candidate missed
                    if pushed != candidate
                        && self.ahead_blocked(probe, start, pushed, direction, step, request)
                    {
                        None
                    } else {
                        Some(pushed)
                    }
                }
            }
            CollisionPolicy::Volume => {
                let bounds = agent.bounds_at(candidate, self.config.collision_radius);
                if probe.overlaps(&bounds) {
                    None
                } else {
                    Some(candidate)
                }
            }
        };

        match resolved {
            Some(position) => {
                log::debug!("Agent moved {:?} -> {:?}", start, position);
                agent.commit(position);
                true
            }
            None => {
                log::trace!("Step from {:?} along {:?} blocked", start, direction);
                false
            }
        }
    }

    /// Ray checks ahead of the agent, shared by both ray policies
    fn ahead_blocked<P>(
        &self,
        probe: &P,
        start: Vec3,
        candidate: Vec3,
        direction: Vec3,
        step: f32,
        request: &MoveRequest,
    ) -> bool
    where
        P: CollisionProbe + ?Sized,
    {
        let wall_limit = self.config.wall_limit;
        let eye = Vec3::Y * request.profile.eye_height;

        let probe_direction = match request.profile.direction {
            ProbeDirection::Movement => direction,
            ProbeDirection::Facing => {
                let facing = request.facing.normalize_or_zero();
                if facing == Vec3::ZERO {
                    direction
                } else {
                    facing
                }
            }
        };

        if probe
            .nearest_hit(candidate + eye, probe_direction)
            .is_some_and(|d| d < wall_limit)
        {
            return true;
        }

        // Sweep the whole step along the direction of travel, whatever the
        // profile probes, so a long stride cannot pass through a thin obstacle
        probe
            .nearest_hit(start + eye, direction)
            .is_some_and(|d| d < step + wall_limit)
    }

    /// Push the candidate off walls closer than the wall limit on either side.
    ///
    /// Pushes from opposite walls add up, so in a corridor narrower than twice
    /// the wall limit they partly cancel and the agent stays off-center.
    fn push_from_sides<P>(&self, probe: &P, candidate: Vec3, direction: Vec3, eye_height: f32) -> Vec3
    where
        P: CollisionProbe + ?Sized,
    {
        let wall_limit = self.config.wall_limit;
        let origin = candidate + Vec3::Y * eye_height;
        let right = direction.cross(Vec3::Y).normalize_or_zero();
        if right == Vec3::ZERO {
            return candidate;
        }

        let mut resolved = candidate;
        for side in [-right, right] {
            if let Some(distance) = probe.nearest_hit(origin, side) {
                if distance < wall_limit {
                    let depth = wall_limit - distance;
                    log::trace!("Pushed {:.3} away from side wall", depth);
                    resolved -= side * depth;
                }
            }
        }
        resolved
    }

    /// Apply held movement keys, one step per key in fixed order
    pub fn drive_keyboard<P>(
        &self,
        agent: &mut Agent,
        keys: &KeyState,
        tracker: &OrientationTracker,
        dt: f32,
        probe: &P,
    ) -> MoveReport
    where
        P: CollisionProbe + ?Sized,
    {
        let mut report = MoveReport::default();
        let forward = tracker.forward_vector();
        let right = tracker.right_vector();

        for key in keys.held() {
            let intent = match key {
                MoveKey::Forward => forward,
                MoveKey::Back => -forward,
                MoveKey::Left => -right,
                MoveKey::Right => right,
            };
            let request = MoveRequest::new(intent, self.config.keyboard).with_facing(forward);
            report.record(self.try_move(agent, &request, dt, probe));
        }
        report
    }

    /// Apply a thumbstick sample, rotated into world space by the view orientation
    pub fn drive_thumbstick<P>(
        &self,
        agent: &mut Agent,
        analog: Option<AnalogInput>,
        tracker: &OrientationTracker,
        dt: f32,
        probe: &P,
    ) -> Option<bool>
    where
        P: CollisionProbe + ?Sized,
    {
        let stick = analog?.outside_deadzone(self.config.thumbstick_deadzone)?;
        let intent = tracker.orientation() * Vec3::new(stick.x, 0.0, stick.y);
        let request = MoveRequest::new(intent, self.config.thumbstick);
        Some(self.try_move(agent, &request, dt, probe))
    }

    /// Apply all movement input for one frame: keys first, then the thumbstick
    pub fn update<P>(
        &self,
        agent: &mut Agent,
        input: &InputState,
        tracker: &OrientationTracker,
        dt: f32,
        probe: &P,
    ) -> MoveReport
    where
        P: CollisionProbe + ?Sized,
    {
        let mut report = self.drive_keyboard(agent, &input.keys, tracker, dt, probe);
        if let Some(committed) = self.drive_thumbstick(agent, input.analog, tracker, dt, probe) {
            report.record(committed);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VerticalBounds;
    use gallery_collision::{ObstacleDesc, ObstacleField};

    fn agent_at(x: f32, y: f32, z: f32) -> Agent {
        Agent::new(Vec3::new(x, y, z), VerticalBounds::new(2.0, 5.0)).unwrap()
    }

    #[test]
    fn test_zero_intent_is_noop() {
        let controller = LocomotionController::default();
        let field = ObstacleField::new();
        let mut agent = agent_at(0.0, 2.0, 0.0);

        let request = MoveRequest::new(Vec3::ZERO, ProbeProfile::THUMBSTICK);
        assert!(!controller.try_move(&mut agent, &request, 0.016, &field));
        assert_eq!(agent.position(), Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_step_modes() {
        let fixed = LocomotionController::new(LocomotionConfig::default());
        assert_eq!(fixed.step_length(0.1), 0.5);

        let continuous = LocomotionController::new(LocomotionConfig::continuous(4.0));
        assert_eq!(continuous.step_length(0.25), 1.0);
        assert_eq!(continuous.step_length(-1.0), 0.0);
    }

    #[test]
    fn test_continuous_zero_dt_does_not_move() {
        let controller = LocomotionController::new(LocomotionConfig::continuous(4.0));
        let field = ObstacleField::new();
        let mut agent = agent_at(0.0, 2.0, 0.0);

        let request = MoveRequest::new(Vec3::X, ProbeProfile::THUMBSTICK);
        assert!(!controller.try_move(&mut agent, &request, 0.0, &field));
    }

    #[test]
    fn test_open_field_commits_exact_step() {
        let controller = LocomotionController::default();
        let field = ObstacleField::new();
        let mut agent = agent_at(0.0, 2.0, 0.0);

        let request = MoveRequest::new(Vec3::new(0.0, 0.0, -3.0), ProbeProfile::THUMBSTICK);
        assert!(controller.try_move(&mut agent, &request, 0.016, &field));
        assert_eq!(agent.position(), Vec3::new(0.0, 2.0, -0.5));
    }

    #[test]
    fn test_sweep_prevents_tunneling() {
        let controller = LocomotionController::new(LocomotionConfig::default().with_speed(10.0));
        let field =
            ObstacleField::from_descs([ObstacleDesc::cuboid([0.2, 5.0, 4.0]).at([5.0, 2.5, 0.0])])
                .unwrap();
        let mut agent = agent_at(0.0, 2.0, 0.0);

        // Candidate at x=10 is past the wall with nothing ahead of it
        let request = MoveRequest::new(Vec3::X, ProbeProfile::new(ProbeDirection::Movement, 0.0));
        assert!(!controller.try_move(&mut agent, &request, 0.016, &field));
        assert_eq!(agent.position().x, 0.0);
    }

    #[test]
    fn test_facing_probe_checks_view_direction() {
        let controller = LocomotionController::default();
        let field =
            ObstacleField::from_descs([ObstacleDesc::cuboid([1.0, 5.0, 1.0]).at([1.0, 2.5, 0.0])])
                .unwrap();
        let mut agent = agent_at(0.0, 2.0, 0.0);

        // Backing away from a wall the camera faces is blocked under the facing probe
        let request = MoveRequest::new(Vec3::NEG_X, ProbeProfile::KEYBOARD).with_facing(Vec3::X);
        assert!(!controller.try_move(&mut agent, &request, 0.016, &field));

        // Walking sideways while facing open space is allowed
        let request = MoveRequest::new(Vec3::NEG_Z, ProbeProfile::KEYBOARD).with_facing(Vec3::NEG_Z);
        assert!(controller.try_move(&mut agent, &request, 0.016, &field));
    }

    #[test]
    fn test_report_counts() {
        let mut report = MoveReport::default();
        report.record(true);
        report.record(false);
        assert_eq!(report.attempted, 2);
        assert_eq!(report.committed, 1);
        assert_eq!(report.blocked(), 1);
    }
}
