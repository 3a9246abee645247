//! Orientation tracking (mouse-look and headset)

use gallery_math::{consts, finite_or_zero, Quat, Vec2, Vec3};

/// Maximum look-up/look-down angle; keeps the view short of straight up or down
pub const MAX_PITCH: f32 = consts::FRAC_PI_2 - 0.1;

/// Accumulated view orientation.
///
/// Camera convention: identity looks down -Z with +Y up. Mouse-look keeps
/// yaw and pitch; while a headset pose is supplied it takes precedence.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrientationTracker {
    yaw: f32,
    pitch: f32,
    headset: Option<Quat>,
}

impl OrientationTracker {
    /// Tracker looking down -Z
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker with an initial yaw and pitch (pitch is clamped)
    pub fn with_angles(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw: finite_or_zero(yaw),
            pitch: finite_or_zero(pitch).clamp(-MAX_PITCH, MAX_PITCH),
            headset: None,
        }
    }

    /// Accumulate a mouse movement
    pub fn apply_mouse_delta(&mut self, delta: Vec2, sensitivity: f32) {
        let dx = finite_or_zero(delta.x);
        let dy = finite_or_zero(delta.y);

        self.yaw -= dx * sensitivity;
        self.pitch = (self.pitch - dy * sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Follow a tracked headset orientation
    pub fn apply_headset_pose(&mut self, orientation: Quat) {
        self.headset = Some(orientation.normalize());
    }

    /// Drop the headset pose and resume mouse-look from where it pointed
    pub fn release_headset(&mut self) {
        if let Some(headset) = self.headset.take() {
            let (yaw, pitch) = headset.to_yaw_pitch();
            self.yaw = yaw;
            self.pitch = pitch.clamp(-MAX_PITCH, MAX_PITCH);
            log::debug!("Headset released at yaw {:.3}, pitch {:.3}", self.yaw, self.pitch);
        }
    }

    /// Whether a headset pose is driving the orientation
    pub fn has_headset(&self) -> bool {
        self.headset.is_some()
    }

    /// Yaw in radians
    pub fn yaw(&self) -> f32 {
        match self.headset {
            Some(q) => q.to_yaw_pitch().0,
            None => self.yaw,
        }
    }

    /// Pitch in radians
    pub fn pitch(&self) -> f32 {
        match self.headset {
            Some(q) => q.to_yaw_pitch().1,
            None => self.pitch,
        }
    }

    /// Effective rotation
    pub fn orientation(&self) -> Quat {
        self.headset
            .unwrap_or_else(|| Quat::from_yaw_pitch(self.yaw, self.pitch))
    }

    /// Direction of forward travel; horizontal under mouse-look
    pub fn forward_vector(&self) -> Vec3 {
        match self.headset {
            Some(q) => q.forward(),
            None => {
                let (sin, cos) = self.yaw.sin_cos();
                Vec3::new(-sin, 0.0, -cos)
            }
        }
    }

    /// Direction of rightward strafe; horizontal under mouse-look
    pub fn right_vector(&self) -> Vec3 {
        match self.headset {
            Some(q) => q.right(),
            None => {
                let (sin, cos) = self.yaw.sin_cos();
                Vec3::new(cos, 0.0, -sin)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_looks_down_neg_z() {
        let tracker = OrientationTracker::new();
        assert_eq!(tracker.forward_vector(), Vec3::new(-0.0, 0.0, -1.0));
        assert_eq!(tracker.right_vector(), Vec3::new(1.0, 0.0, -0.0));
    }

    #[test]
    fn test_mouse_right_turns_right() {
        let mut tracker = OrientationTracker::new();
        // 785 px at 0.002 rad/px is roughly a quarter turn
        tracker.apply_mouse_delta(Vec2::new(785.4, 0.0), 0.002);

        let forward = tracker.forward_vector();
        assert_relative_eq!(forward.x, 1.0, epsilon = 1e-3);
        assert_relative_eq!(forward.z, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut tracker = OrientationTracker::new();
        tracker.apply_mouse_delta(Vec2::new(0.0, -1.0e6), 0.002);
        assert_relative_eq!(tracker.pitch(), MAX_PITCH);

        tracker.apply_mouse_delta(Vec2::new(0.0, 1.0e6), 0.002);
        assert_relative_eq!(tracker.pitch(), -MAX_PITCH);
    }

    #[test]
    fn test_non_finite_delta_ignored() {
        let mut tracker = OrientationTracker::with_angles(0.3, 0.1);
        tracker.apply_mouse_delta(Vec2::new(f32::NAN, f32::INFINITY), 0.002);
        assert_eq!(tracker.yaw(), 0.3);
        assert_eq!(tracker.pitch(), 0.1);
    }

    #[test]
    fn test_pitch_does_not_tilt_walk_direction() {
        let tracker = OrientationTracker::with_angles(0.0, 1.0);
        assert_eq!(tracker.forward_vector().y, 0.0);
        assert!(tracker.orientation().forward().y > 0.5);
    }

    #[test]
    fn test_headset_overrides_and_releases() {
        let mut tracker = OrientationTracker::new();
        let pose = Quat::from_yaw_pitch(0.5, 0.2);
        tracker.apply_headset_pose(pose);

        assert!(tracker.has_headset());
        assert_relative_eq!(tracker.yaw(), 0.5, epsilon = 1e-5);
        assert_relative_eq!(tracker.pitch(), 0.2, epsilon = 1e-5);
        let forward = tracker.forward_vector();
        let expected = pose.forward();
        assert_relative_eq!(forward.x, expected.x, epsilon = 1e-6);
        assert_relative_eq!(forward.y, expected.y, epsilon = 1e-6);

        tracker.release_headset();
        assert!(!tracker.has_headset());
        assert_relative_eq!(tracker.yaw(), 0.5, epsilon = 1e-5);
        assert_relative_eq!(tracker.pitch(), 0.2, epsilon = 1e-5);
    }
}
