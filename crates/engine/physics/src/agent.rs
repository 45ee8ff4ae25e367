//! Per-session agent state
//!
//! Owned by the session and handed to the resolver every tick. Only the
//! resolver moves the agent; callers read it back through [`Agent::snapshot`].

use glam::Vec3;
use walkabout_core::{AgentSnapshot, Animation};

use crate::config::{AgentConfig, SpawnConfig};

#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub half_width: f32,
    pub half_height: f32,
    pub animation: Animation,
    /// Ticks left on the current wave gesture
    pub(crate) wave_remaining: u32,
}

impl Agent {
    pub fn new(position: Vec3, half_width: f32, half_height: f32) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            half_width,
            half_height,
            animation: Animation::Idle,
            wave_remaining: 0,
        }
    }

    /// Create an agent at its spawn pose
    pub fn spawn(body: &AgentConfig, spawn: &SpawnConfig) -> Self {
        let mut agent = Self::new(spawn.position, body.half_width, body.half_height);
        agent.yaw = spawn.yaw;
        agent.pitch = spawn.pitch;
        agent
    }

    /// Put the agent back at its spawn pose, dropping any gesture
    pub fn respawn(&mut self, spawn: &SpawnConfig) {
        self.position = spawn.position;
        self.yaw = spawn.yaw;
        self.pitch = spawn.pitch;
        self.animation = Animation::Idle;
        self.wave_remaining = 0;
    }

    /// Start the wave gesture for `ticks` ticks
    ///
    /// The gesture shows while the agent stands still and ends early as soon
    /// as it walks.
    pub fn wave(&mut self, ticks: u32) {
        if ticks == 0 {
            return;
        }
        self.wave_remaining = ticks;
        self.animation = Animation::Wave;
    }

    pub fn is_waving(&self) -> bool {
        self.wave_remaining > 0
    }

    /// Advance the animation label for one tick
    pub(crate) fn update_animation(&mut self, walking: bool) {
        if walking {
            self.wave_remaining = 0;
            self.animation = Animation::Walk;
        } else if self.wave_remaining > 0 {
            self.wave_remaining -= 1;
            self.animation = Animation::Wave;
        } else {
            self.animation = Animation::Idle;
        }
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            position: self.position,
            yaw: self.yaw,
            pitch: self.pitch,
            animation: self.animation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_pose() {
        let spawn = SpawnConfig {
            position: Vec3::new(1.0, 2.0, 3.0),
            yaw: 0.5,
            pitch: -0.1,
        };
        let agent = Agent::spawn(&AgentConfig::default(), &spawn);

        let snapshot = agent.snapshot();
        assert_eq!(snapshot.position, spawn.position);
        assert_eq!(snapshot.yaw, 0.5);
        assert_eq!(snapshot.pitch, -0.1);
        assert_eq!(snapshot.animation, Animation::Idle);
    }

    #[test]
    fn test_wave_counts_down_while_idle() {
        let mut agent = Agent::new(Vec3::ZERO, 0.1, 0.5);
        agent.wave(2);
        assert_eq!(agent.animation, Animation::Wave);

        agent.update_animation(false);
        assert_eq!(agent.animation, Animation::Wave);
        agent.update_animation(false);
        assert_eq!(agent.animation, Animation::Wave);
        agent.update_animation(false);
        assert_eq!(agent.animation, Animation::Idle);
        assert!(!agent.is_waving());
    }

    #[test]
    fn test_walking_cancels_wave() {
        let mut agent = Agent::new(Vec3::ZERO, 0.1, 0.5);
        agent.wave(100);
        agent.update_animation(true);
        assert_eq!(agent.animation, Animation::Walk);

        agent.update_animation(false);
        assert_eq!(agent.animation, Animation::Idle);
    }

    #[test]
    fn test_respawn_resets_pose() {
        let mut agent = Agent::new(Vec3::new(5.0, -20.0, 5.0), 0.1, 0.5);
        agent.yaw = 3.0;
        agent.wave(10);

        agent.respawn(&SpawnConfig::default());
        assert_eq!(agent.position, SpawnConfig::default().position);
        assert_eq!(agent.yaw, 0.0);
        assert!(!agent.is_waving());
    }
}
