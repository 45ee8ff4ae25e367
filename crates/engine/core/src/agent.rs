//! Agent-facing output types
//!
//! After each tick the resolver publishes an [`AgentSnapshot`]. Renderers use
//! it to place the camera and avatar, the network layer broadcasts it to the
//! other session participants at whatever cadence it chooses.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Animation label derived from movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    #[default]
    Idle,
    Walk,
    /// Timed gesture; only plays while the agent stands still
    Wave,
}

impl Animation {
    pub fn as_str(self) -> &'static str {
        match self {
            Animation::Idle => "idle",
            Animation::Walk => "walk",
            Animation::Wave => "wave",
        }
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved agent state published once per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub animation: Animation,
}
