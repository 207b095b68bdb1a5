use std::path::Path;

use anyhow::bail;

use crate::app_config::AppConfig;
use crate::profile::Profile;

/// Write a fresh profile with the effective settings so the user has a
/// file to edit.
pub fn init_cmd(config: &AppConfig, profile_path: &Path) -> anyhow::Result<()> {
    if profile_path.exists() {
        bail!("profile already exists at {}", profile_path.display());
    }

    let profile = Profile {
        server_url: Some(config.server_url.clone()),
        per_page: Some(config.per_page),
        cache_dir: Some(config.cache_dir.to_string_lossy().into_owned()),
    };
    profile.save(profile_path)?;

    println!("Profile created at {}", profile_path.display());
    Ok(())
}
