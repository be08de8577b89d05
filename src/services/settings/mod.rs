// Settings service
// Loads the scheduler config from an optional TOML file

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::models::settings::SchedulerConfig;

const CONFIG_FILE: &str = "scheduler.toml";

/// Locate the per-user config file, if the platform gives us a config
/// directory at all.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "CourtScheduler", "CourtScheduler")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Load the scheduler config: the user's file when present and valid,
/// compiled defaults otherwise. A broken or invalid file is reported and
/// ignored rather than aborting the calendar.
pub fn load() -> SchedulerConfig {
    match default_config_path() {
        Some(path) if path.exists() => load_from_path(&path).unwrap_or_else(|err| {
            log::warn!("Ignoring scheduler config {:?}: {:#}", path, err);
            SchedulerConfig::default()
        }),
        _ => SchedulerConfig::default(),
    }
}

/// Parse and validate a specific config file.
pub fn load_from_path(path: &Path) -> Result<SchedulerConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    let config: SchedulerConfig =
        toml::from_str(&raw).with_context(|| format!("Failed to parse config file {:?}", path))?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid scheduler config: {}", e))?;
    Ok(config)
}
