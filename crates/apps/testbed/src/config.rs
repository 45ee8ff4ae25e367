//! Config file resolution for the testbed binary
//!
//! Order: `--config`, then `WALKABOUT_CONFIG`, then the bundled file, then
//! built-in defaults.

use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::info;
use walkabout_physics::WalkaboutConfig;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "WALKABOUT_CONFIG";

/// Config shipped next to this crate's manifest
pub const BUNDLED_CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/config/walkabout.toml");

/// Pick the config file to load, if any
///
/// An explicit path or an env path is returned even when it does not exist so
/// that loading reports the error. The bundled file is only used when present.
pub fn config_path(explicit: Option<&Path>, env: Option<String>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env.filter(|value| !value.is_empty()).map(PathBuf::from))
        .or_else(|| {
            let bundled = PathBuf::from(BUNDLED_CONFIG);
            bundled.exists().then_some(bundled)
        })
}

/// Resolve and load the config, falling back to defaults when nothing is found
pub fn load_config(explicit: Option<&Path>, env: Option<String>) -> anyhow::Result<WalkaboutConfig> {
    match config_path(explicit, env) {
        Some(path) => {
            info!(path = %path.display(), "Loading config");
            WalkaboutConfig::load(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
        None => {
            info!("No config file found, using defaults");
            Ok(WalkaboutConfig::default())
        }
    }
}
