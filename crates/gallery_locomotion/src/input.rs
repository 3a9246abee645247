//! Per-frame input snapshots
//!
//! Raw device input is sanitized here, once, at the sampling boundary:
//! missing gamepad axes and non-finite deltas become zero so movement code
//! never has to check for them.

use gallery_math::{finite_or_zero, Vec2};
use serde::{Deserialize, Serialize};

/// Movement keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
}

impl MoveKey {
    /// Fixed resolution order for held keys
    pub const ORDER: [MoveKey; 4] = [Self::Forward, Self::Back, Self::Left, Self::Right];

    /// Map a keyboard key name (`"w"`, `"s"`, `"a"`, `"d"`) to a movement key
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "w" | "W" => Some(Self::Forward),
            "s" | "S" => Some(Self::Back),
            "a" | "A" => Some(Self::Left),
            "d" | "D" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Key-down flags for the movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl KeyState {
    /// Set the state of a key
    pub fn set(&mut self, key: MoveKey, down: bool) {
        match key {
            MoveKey::Forward => self.forward = down,
            MoveKey::Back => self.back = down,
            MoveKey::Left => self.left = down,
            MoveKey::Right => self.right = down,
        }
    }

    /// Mark a key as held
    pub fn press(&mut self, key: MoveKey) {
        self.set(key, true);
    }

    /// Mark a key as released
    pub fn release(&mut self, key: MoveKey) {
        self.set(key, false);
    }

    /// Whether a key is held
    pub fn is_down(&self, key: MoveKey) -> bool {
        match key {
            MoveKey::Forward => self.forward,
            MoveKey::Back => self.back,
            MoveKey::Left => self.left,
            MoveKey::Right => self.right,
        }
    }

    /// Held keys in resolution order
    pub fn held(&self) -> impl Iterator<Item = MoveKey> + '_ {
        MoveKey::ORDER.into_iter().filter(|k| self.is_down(*k))
    }

    /// Whether any movement key is held
    pub fn any(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }
}

/// Two-axis analog stick sample in `[-1, 1]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalogInput {
    pub x: f32,
    pub y: f32,
}

impl AnalogInput {
    /// Create a sample; non-finite axes become zero and values are clamped to `[-1, 1]`
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: finite_or_zero(x).clamp(-1.0, 1.0),
            y: finite_or_zero(y).clamp(-1.0, 1.0),
        }
    }

    /// Read a stick from a raw gamepad axis array.
    ///
    /// `indices` selects the horizontal and vertical axes. Axes the device
    /// does not report read as zero.
    pub fn from_gamepad_axes(axes: &[f32], indices: [usize; 2]) -> Self {
        let read = |i: usize| axes.get(i).copied().unwrap_or(0.0);
        Self::new(read(indices[0]), read(indices[1]))
    }

    /// Stick deflection
    pub fn magnitude(&self) -> f32 {
        Vec2::new(self.x, self.y).length()
    }

    /// `None` when the deflection is within `deadzone`
    pub fn outside_deadzone(self, deadzone: f32) -> Option<Self> {
        let magnitude = self.magnitude();
        if magnitude <= deadzone || magnitude == 0.0 {
            None
        } else {
            Some(self)
        }
    }
}

/// Snapshot of all input for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    /// Movement keys held this frame
    pub keys: KeyState,
    /// Mouse movement since the previous sample, in pixels
    pub mouse_delta: Vec2,
    /// Thumbstick, when a controller with axes is connected
    pub analog: Option<AnalogInput>,
    /// Fire/select button held
    pub fire: bool,
}

impl InputState {
    /// Empty input
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold a movement key
    pub fn with_key(mut self, key: MoveKey) -> Self {
        self.keys.press(key);
        self
    }

    /// Set the mouse delta; non-finite components become zero
    pub fn with_mouse_delta(mut self, dx: f32, dy: f32) -> Self {
        self.mouse_delta = Vec2::new(finite_or_zero(dx), finite_or_zero(dy));
        self
    }

    /// Attach a thumbstick sample
    pub fn with_analog(mut self, analog: AnalogInput) -> Self {
        self.analog = Some(analog);
        self
    }

    /// Set the fire button state
    pub fn with_fire(mut self, pressed: bool) -> Self {
        self.fire = pressed;
        self
    }
}

/// Turns a held trigger into one shot per press
#[derive(Debug, Clone, Copy, Default)]
pub struct FireLatch {
    held: bool,
}

impl FireLatch {
    /// Create a released latch
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current button state; true only on the press edge
    pub fn update(&mut self, pressed: bool) -> bool {
        let fired = pressed && !self.held;
        self.held = pressed;
        fired
    }

    /// Whether the button was held at the last update
    pub fn is_held(&self) -> bool {
        self.held
    }
}
