use std::path::{Path, PathBuf};

use anyhow::{Context, Ok};
use serde::{Deserialize, Serialize};

pub const PROFILE_FILENAME: &str = "profile.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Base URL of the backend, e.g. "http://localhost:4280"
    pub server_url: Option<String>,
    /// Default rows per page for list commands
    pub per_page: Option<u32>,
    /// Directory for cached collection snapshots
    pub cache_dir: Option<String>,
}

impl Profile {
    pub fn from_path(profile: &Path) -> anyhow::Result<Option<Self>> {
        if !profile.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(profile).context("Failed to read profile file")?;

        let profile: Self = toml::from_str(&contents).context("Failed to deserialize profile")?;

        Ok(Some(profile))
    }

    pub fn save(&self, profile_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = profile_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string(self).context("Failed to serialize profile")?;

        std::fs::write(profile_path, content).context("Failed to write profile")?;

        Ok(())
    }
}

/// Resolve the profile file location: explicit argument first, then the
/// XDG config directory.
pub fn get_profile_path(arg: &Option<String>) -> PathBuf {
    match arg {
        Some(path) => PathBuf::from(path),
        None => get_config_dir().join(PROFILE_FILENAME),
    }
}

/// Get the XDG config directory, respecting XDG_CONFIG_HOME
fn get_config_dir() -> PathBuf {
    if let std::result::Result::Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("tally")
    } else {
        directories::ProjectDirs::from("com", "tally", "tally")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Get the XDG data directory, respecting XDG_DATA_HOME
pub fn get_data_dir() -> PathBuf {
    if let std::result::Result::Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("tally")
    } else {
        directories::ProjectDirs::from("com", "tally", "tally")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
