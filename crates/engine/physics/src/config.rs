//! Walkabout configuration
//!
//! Loaded from a TOML file with one table per concern:
//!
//! ```toml
//! [index]
//! half_extent = 64.0
//! partition = "quadtree"
//!
//! [agent]
//! half_width = 0.1
//!
//! [movement]
//! contact_policy = "nearest"
//!
//! [spawn]
//! position = [0.0, 2.0, 0.0]
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::spatial::{IndexParams, TrianglePlacement};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Which region subdivision the world index uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionKind {
    #[default]
    Octree,
    /// Height-collapsed; suits terrain-like worlds
    Quadtree,
}

/// Which contact wins when several candidates cross a probe segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactPolicy {
    /// First contact in query order
    #[default]
    FirstHit,
    /// Contact closest to the probe origin
    Nearest,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkaboutConfig {
    pub index: IndexConfig,
    pub agent: AgentConfig,
    pub movement: MovementConfig,
    pub spawn: SpawnConfig,
}

/// `[index]`: spatial index construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub partition: PartitionKind,
    pub center: Vec3,
    pub half_extent: f32,
    pub max_triangles: usize,
    pub max_depth: u32,
    pub placement: TrianglePlacement,
}

impl Default for IndexConfig {
    fn default() -> Self {
        let params = IndexParams::default();
        Self {
            partition: PartitionKind::default(),
            center: params.center,
            half_extent: params.half_extent,
            max_triangles: params.max_triangles,
            max_depth: params.max_depth,
            placement: params.placement,
        }
    }
}

impl IndexConfig {
    pub fn params(&self) -> IndexParams {
        IndexParams {
            center: self.center,
            half_extent: self.half_extent,
            max_triangles: self.max_triangles,
            max_depth: self.max_depth,
            placement: self.placement,
        }
    }
}

/// `[agent]`: collision footprint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Horizontal clearance kept from walls, and footprint half-size
    pub half_width: f32,
    /// Distance from the feet to the agent's reference point
    pub half_height: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            half_width: 0.1,
            half_height: 0.5,
        }
    }
}

/// `[movement]`: per-tick integration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Displacement per tick while a movement key is held
    pub speed: f32,
    /// Vertical drop per tick while airborne
    pub gravity_step: f32,
    /// Height below which the agent is respawned
    pub fall_limit: f32,
    pub contact_policy: ContactPolicy,
    /// Fixed tick cadence
    pub tick_interval_ms: u64,
    /// Radians per pointer unit
    pub look_sensitivity: f32,
    /// Duration of the wave gesture
    pub wave_ticks: u32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: 0.0025,
            gravity_step: 0.01,
            fall_limit: -10.0,
            contact_policy: ContactPolicy::FirstHit,
            tick_interval_ms: 15,
            look_sensitivity: 0.05_f32.to_radians(),
            // 2 seconds at the default cadence
            wave_ticks: 133,
        }
    }
}

/// `[spawn]`: initial pose, also used after a fall-through
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, 0.0),
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl WalkaboutConfig {
    /// Read, parse and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the resolver or index cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if !(self.index.half_extent > 0.0) {
            return invalid("index.half_extent must be positive");
        }
        if !self.index.center.is_finite() {
            return invalid("index.center must be finite");
        }
        if !(self.agent.half_width >= 0.0) || !(self.agent.half_height >= 0.0) {
            return invalid("agent dimensions must not be negative");
        }
        if !(self.movement.gravity_step > 0.0) {
            return invalid("movement.gravity_step must be positive");
        }
        if !(self.movement.speed >= 0.0) {
            return invalid("movement.speed must not be negative");
        }
        if self.movement.tick_interval_ms == 0 {
            return invalid("movement.tick_interval_ms must be at least 1");
        }
        if !self.spawn.position.is_finite() {
            return invalid("spawn.position must be finite");
        }
        if self.spawn.position.y < self.movement.fall_limit {
            return invalid("spawn.position is below movement.fall_limit");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WalkaboutConfig::default();
        assert_eq!(config.index.partition, PartitionKind::Octree);
        assert_eq!(config.index.max_triangles, 512);
        assert_eq!(config.index.max_depth, 8);
        assert_eq!(config.movement.tick_interval_ms, 15);
        assert_eq!(config.movement.contact_policy, ContactPolicy::FirstHit);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = WalkaboutConfig::from_toml_str("").unwrap();
        assert_eq!(config, WalkaboutConfig::default());
    }

    #[test]
    fn test_partial_tables() {
        let config = WalkaboutConfig::from_toml_str(
            r#"
            [index]
            half_extent = 64.0
            partition = "quadtree"
            placement = "bounds"

            [movement]
            contact_policy = "nearest"

            [spawn]
            position = [1.0, 2.0, 3.0]
            "#,
        )
        .unwrap();

        assert_eq!(config.index.partition, PartitionKind::Quadtree);
        assert_eq!(config.index.params().half_extent, 64.0);
        assert_eq!(config.index.params().placement, TrianglePlacement::Bounds);
        assert_eq!(config.index.max_depth, 8);
        assert_eq!(config.movement.contact_policy, ContactPolicy::Nearest);
        assert_eq!(config.movement.speed, 0.0025);
        assert_eq!(config.spawn.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_parse_error() {
        let err = WalkaboutConfig::from_toml_str("[index]\npartition = \"kdtree\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_errors() {
        let cases = [
            "[index]\nhalf_extent = 0.0",
            "[agent]\nhalf_width = -1.0",
            "[movement]\ngravity_step = 0.0",
            "[movement]\ntick_interval_ms = 0",
            "[spawn]\nposition = [0.0, -50.0, 0.0]",
        ];
        for case in cases {
            let err = WalkaboutConfig::from_toml_str(case).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{case}: {err}");
        }
    }

    #[test]
    fn test_missing_file() {
        let err = WalkaboutConfig::load("/nonexistent/walkabout.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("walkabout.toml"));
    }
}
