//! Scripted input session
//!
//! Stands in for a player when the host runs headless. The script loops
//! through a fixed cycle of phases: walk, turn, strafe while firing, stick
//! walk, look around.

use gallery_locomotion::{AnalogInput, InputState, MoveKey, MAX_GAMEPAD_AXES};

use crate::boot_config::BootConfig;
use crate::game_systems::{GameWorld, SessionStats};

/// Frames in one script cycle
const CYCLE: u32 = 240;

/// Frames between simulated key-repeat events
const KEY_REPEAT: u32 = 4;

/// Drives a [`GameWorld`] with generated input
#[derive(Debug, Clone)]
pub struct ScriptedSession {
    frames: u32,
    frame_time: f32,
    axes: [usize; 2],
}

impl ScriptedSession {
    /// Session as configured
    pub fn new(config: &BootConfig) -> Self {
        Self {
            frames: config.session.frames,
            frame_time: config.session.frame_time,
            axes: config.locomotion.thumbstick_axes,
        }
    }

    /// Raw gamepad axes with the stick deflected to `(x, y)`
    fn gamepad_axes(&self, x: f32, y: f32) -> [f32; MAX_GAMEPAD_AXES] {
        let mut axes = [0.0; MAX_GAMEPAD_AXES];
        for (index, value) in self.axes.into_iter().zip([x, y]) {
            if let Some(axis) = axes.get_mut(index) {
                *axis = value;
            }
        }
        axes
    }

    /// Input for a given frame
    pub fn input_for(&self, frame: u32) -> InputState {
        let t = frame % CYCLE;
        let repeat = t % KEY_REPEAT == 0;
        let input = InputState::new();

        match t {
            0..=59 if repeat => input.with_key(MoveKey::Forward),
            60..=89 => input.with_mouse_delta(10.0, 0.0),
            90..=149 => {
                let input = if repeat { input.with_key(MoveKey::Right) } else { input };
                // Two separate trigger pulls
                input.with_fire((100..110).contains(&t) || (135..140).contains(&t))
            }
            150..=209 => {
                let axes = self.gamepad_axes(0.0, -1.0);
                input.with_analog(AnalogInput::from_gamepad_axes(&axes, self.axes))
            }
            210..=224 => input.with_mouse_delta(0.0, -20.0),
            225..=239 => input.with_mouse_delta(-5.0, 20.0),
            _ => input,
        }
    }

    /// Run every frame of the session
    pub fn run(&self, world: &mut GameWorld) -> SessionStats {
        log::info!(
            "Running scripted session: {} frames at {:.4}s",
            self.frames,
            self.frame_time
        );

        for frame in 0..self.frames {
            let report = world.update(self.frame_time, &self.input_for(frame));
            if let Some(id) = report.fired {
                log::debug!("Frame {}: fired {:?}", frame, id);
            }
            if frame % 60 == 0 {
                log::debug!("{}", world.debug_info());
            }
        }

        let stats = world.stats();
        log::info!(
            "Session complete: {} frames, {}/{} steps committed, {} shots, {} expired",
            stats.frames,
            stats.steps_committed,
            stats.steps_attempted,
            stats.shots_fired,
            stats.projectiles_expired
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> ScriptedSession {
        ScriptedSession::new(&BootConfig::default())
    }

    #[test]
    fn test_script_phases() {
        let session = session();
        assert!(session.input_for(0).keys.forward);
        assert!(!session.input_for(1).keys.forward);
        assert_eq!(session.input_for(70).mouse_delta.x, 10.0);
        assert!(session.input_for(92).keys.right);
        assert!(session.input_for(105).fire);
        assert_eq!(session.input_for(160).analog, Some(AnalogInput::new(0.0, -1.0)));
        assert_eq!(session.input_for(CYCLE).keys, session.input_for(0).keys);
    }

    #[test]
    fn test_custom_axes() {
        let mut config = BootConfig::default();
        config.locomotion.thumbstick_axes = [0, 1];
        let session = ScriptedSession::new(&config);
        assert_eq!(session.input_for(160).analog, Some(AnalogInput::new(0.0, -1.0)));
    }

    #[test]
    fn test_unreachable_axis_reads_centered() {
        let mut config = BootConfig::default();
        config.locomotion.thumbstick_axes = [usize::MAX, 3];
        let session = ScriptedSession::new(&config);
        assert_eq!(session.input_for(160).analog, Some(AnalogInput::new(0.0, -1.0)));
    }

    #[test]
    fn test_full_session_keeps_invariants() {
        let mut config = BootConfig::default();
        config.session.frames = CYCLE * 2;
        let mut world = GameWorld::new(&config).unwrap();

        let stats = ScriptedSession::new(&config).run(&mut world);

        assert_eq!(stats.frames, u64::from(CYCLE * 2));
        assert_eq!(stats.shots_fired, 4);
        assert!(stats.steps_committed > 0);
        assert!(stats.steps_committed <= stats.steps_attempted);

        let y = world.agent().position().y;
        assert!((2.0..=5.0).contains(&y));
        let pitch = world.tracker().pitch();
        assert!(pitch.abs() <= gallery_locomotion::MAX_PITCH);
    }
}
