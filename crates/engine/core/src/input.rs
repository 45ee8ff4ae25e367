//! Input mapping for agent movement
//!
//! The raw event capture (keyboard listeners, pointer lock, gamepad polling)
//! lives outside this crate. What arrives here is already reduced to held
//! keys, pointer deltas and stick axes, and what leaves is one [`MoveRequest`]
//! per tick.

use glam::{Vec2, Vec3};
use std::collections::HashSet;

// ============================================================================
// Movement Keys
// ============================================================================

/// A movement key the agent responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementKey {
    Forward,
    Backward,
    Left,
    Right,
}

impl MovementKey {
    /// Map a WASD character (case-insensitive) to a movement key
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(MovementKey::Forward),
            's' => Some(MovementKey::Backward),
            'a' => Some(MovementKey::Left),
            'd' => Some(MovementKey::Right),
            _ => None,
        }
    }
}

/// Set of currently held movement keys
#[derive(Debug, Clone, Default)]
pub struct MovementKeys {
    held: HashSet<MovementKey>,
}

impl MovementKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: MovementKey) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: MovementKey) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: MovementKey) -> bool {
        self.held.contains(&key)
    }

    /// Drop every held key (focus lost, chat opened, ...)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Local-space displacement for one tick
    ///
    /// Forward is +Z and left is +X. Keys on the same axis do not cancel:
    /// backward overrides forward and right overrides left.
    pub fn local_displacement(&self, speed: f32) -> Vec3 {
        let mut direction = Vec3::ZERO;
        if self.is_held(MovementKey::Forward) {
            direction.z = speed;
        }
        if self.is_held(MovementKey::Backward) {
            direction.z = -speed;
        }
        if self.is_held(MovementKey::Left) {
            direction.x = speed;
        }
        if self.is_held(MovementKey::Right) {
            direction.x = -speed;
        }
        direction
    }
}

// ============================================================================
// Pointer Look
// ============================================================================

/// Absolute view angles accumulated from pointer motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookState {
    /// Rotation about the vertical axis (radians)
    pub yaw: f32,
    /// Rotation about the horizontal axis (radians); never affects movement
    pub pitch: f32,
    /// Radians per pointer unit
    pub sensitivity: f32,
}

impl LookState {
    pub fn new(yaw: f32, pitch: f32, sensitivity: f32) -> Self {
        Self {
            yaw,
            pitch,
            sensitivity,
        }
    }

    /// Accumulate a relative pointer movement
    pub fn apply_pointer_delta(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch += dy * self.sensitivity;
    }

    /// Overwrite the angles, e.g. after a respawn
    pub fn reset(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
    }
}

// ============================================================================
// Analog Stick
// ============================================================================

/// Analog movement stick with a radial deadzone
#[derive(Debug, Clone, Default)]
pub struct AnalogStick {
    raw: Vec2,
    value: Vec2,
}

impl AnalogStick {
    const DEADZONE: f32 = 0.15;

    pub fn new() -> Self {
        Self::default()
    }

    /// Update both axes from raw device values in [-1, 1]
    pub fn set(&mut self, x: f32, y: f32) {
        self.raw = Vec2::new(x, y);

        if self.raw.length() < Self::DEADZONE {
            self.value = Vec2::ZERO;
        } else {
            let normalized = self.raw.normalize_or_zero();
            let magnitude =
                ((self.raw.length() - Self::DEADZONE) / (1.0 - Self::DEADZONE)).clamp(0.0, 1.0);
            self.value = normalized * magnitude;
        }
    }

    /// Stick position after the deadzone, magnitude in [0, 1]
    pub fn value(&self) -> Vec2 {
        self.value
    }

    /// Local-space displacement for one tick; stick up is forward, right is -X
    pub fn local_displacement(&self, speed: f32) -> Vec3 {
        Vec3::new(-self.value.x, 0.0, self.value.y) * speed
    }

    pub fn reset(&mut self) {
        self.raw = Vec2::ZERO;
        self.value = Vec2::ZERO;
    }
}

// ============================================================================
// Move Request
// ============================================================================

/// Everything the resolver needs from the input layer for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRequest {
    /// Requested displacement in the agent's local frame
    pub local_displacement: Vec3,
    /// Absolute yaw (radians)
    pub yaw: f32,
    /// Absolute pitch (radians)
    pub pitch: f32,
}

impl MoveRequest {
    pub fn new(local_displacement: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            local_displacement,
            yaw,
            pitch,
        }
    }

    /// A request that only updates orientation
    pub fn look(yaw: f32, pitch: f32) -> Self {
        Self::new(Vec3::ZERO, yaw, pitch)
    }

    /// Combine held keys and the current look angles
    pub fn from_keys(keys: &MovementKeys, look: &LookState, speed: f32) -> Self {
        Self::new(keys.local_displacement(speed), look.yaw, look.pitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(MovementKey::from_char('w'), Some(MovementKey::Forward));
        assert_eq!(MovementKey::from_char('D'), Some(MovementKey::Right));
        assert_eq!(MovementKey::from_char('e'), None);
    }

    #[test]
    fn test_forward_is_positive_z() {
        let mut keys = MovementKeys::new();
        keys.press(MovementKey::Forward);
        assert_eq!(keys.local_displacement(0.5), Vec3::new(0.0, 0.0, 0.5));

        keys.press(MovementKey::Left);
        assert_eq!(keys.local_displacement(0.5), Vec3::new(0.5, 0.0, 0.5));
    }

    #[test]
    fn test_opposing_keys_override() {
        let mut keys = MovementKeys::new();
        keys.press(MovementKey::Forward);
        keys.press(MovementKey::Backward);
        keys.press(MovementKey::Left);
        keys.press(MovementKey::Right);

        assert_eq!(keys.local_displacement(1.0), Vec3::new(-1.0, 0.0, -1.0));
    }

    #[test]
    fn test_release_and_clear() {
        let mut keys = MovementKeys::new();
        keys.press(MovementKey::Forward);
        keys.press(MovementKey::Right);
        keys.release(MovementKey::Forward);
        assert_eq!(keys.local_displacement(1.0), Vec3::new(-1.0, 0.0, 0.0));

        keys.clear();
        assert_eq!(keys.local_displacement(1.0), Vec3::ZERO);
    }

    #[test]
    fn test_pointer_delta_accumulates() {
        let mut look = LookState::new(0.0, 0.0, 0.01);
        look.apply_pointer_delta(10.0, -5.0);
        look.apply_pointer_delta(10.0, 0.0);

        assert!((look.yaw - 0.2).abs() < 1e-6);
        assert!((look.pitch + 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_stick_deadzone() {
        let mut stick = AnalogStick::new();
        stick.set(0.1, 0.05);
        assert_eq!(stick.value(), Vec2::ZERO);

        stick.set(0.0, 1.0);
        assert!((stick.value().y - 1.0).abs() < 1e-6);
        let displacement = stick.local_displacement(2.0);
        assert!((displacement.z - 2.0).abs() < 1e-6);
        assert_eq!(displacement.y, 0.0);
    }

    #[test]
    fn test_request_from_keys() {
        let mut keys = MovementKeys::new();
        keys.press(MovementKey::Forward);
        let look = LookState::new(1.0, 0.25, 0.01);

        let request = MoveRequest::from_keys(&keys, &look, 0.1);
        assert_eq!(request.local_displacement, Vec3::new(0.0, 0.0, 0.1));
        assert_eq!(request.yaw, 1.0);
        assert_eq!(request.pitch, 0.25);
    }
}
