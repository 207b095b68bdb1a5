use std::path::{Path, PathBuf};

use serde::Serialize;

use tally_core::DEFAULT_ROWS_PER_PAGE;

use crate::args::ConfigArgs;
use crate::profile::{get_data_dir, Profile};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:4280";

/// Effective configuration after merging CLI arguments, environment, and
/// the profile file. Precedence: argument > profile > default.
#[derive(Debug, Serialize)]
pub struct AppConfig {
    pub profile_path: String,
    pub server_url: String,
    pub per_page: u32,
    pub cache_dir: PathBuf,
    pub profile_exists: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            profile_path: "./".to_string(),
            server_url: DEFAULT_SERVER_URL.to_string(),
            per_page: DEFAULT_ROWS_PER_PAGE,
            cache_dir: get_data_dir().join("cache"),
            profile_exists: false,
        }
    }
}

impl AppConfig {
    pub fn from_args(args: &ConfigArgs, profile_path: &Path, profile: Option<&Profile>) -> Self {
        let defaults = AppConfig::default();

        let server_url = args
            .server_url
            .clone()
            .or_else(|| profile.and_then(|p| p.server_url.clone()))
            .unwrap_or(defaults.server_url);

        let per_page = profile
            .and_then(|p| p.per_page)
            .unwrap_or(defaults.per_page);

        let cache_dir = profile
            .and_then(|p| p.cache_dir.as_ref())
            .map(PathBuf::from)
            .unwrap_or(defaults.cache_dir);

        AppConfig {
            profile_exists: profile.is_some(),
            profile_path: profile_path
                .to_str()
                .map(|p| p.to_string())
                .unwrap_or(defaults.profile_path),
            server_url,
            per_page,
            cache_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn no_args() -> ConfigArgs {
        ConfigArgs {
            profile_path: None,
            server_url: None,
        }
    }

    #[test]
    fn defaults_apply_without_profile() {
        let config = AppConfig::from_args(&no_args(), Path::new("/tmp/profile.toml"), None);

        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.per_page, DEFAULT_ROWS_PER_PAGE);
        assert!(!config.profile_exists);
    }

    #[test]
    fn profile_overrides_defaults_and_args_override_profile() {
        let profile = Profile {
            server_url: Some("http://profile:1234".to_string()),
            per_page: Some(50),
            cache_dir: Some("/tmp/tally-cache".to_string()),
        };

        let config = AppConfig::from_args(&no_args(), Path::new("/tmp/p.toml"), Some(&profile));
        assert_eq!(config.server_url, "http://profile:1234");
        assert_eq!(config.per_page, 50);
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/tally-cache"));

        let args = ConfigArgs {
            profile_path: None,
            server_url: Some("http://arg:9999".to_string()),
        };
        let config = AppConfig::from_args(&args, Path::new("/tmp/p.toml"), Some(&profile));
        assert_eq!(config.server_url, "http://arg:9999");
    }
}
