#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestContext {
    pub temp_dir: TempDir,
    pub profile_path: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let profile_path = temp_dir.path().join("profile.toml");

        Self {
            temp_dir,
            profile_path,
        }
    }

    pub fn with_profile(contents: &str) -> Self {
        let context = Self::new();
        std::fs::write(&context.profile_path, contents).unwrap();
        context
    }

    /// A `tally` invocation confined to the temp directory.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("tally").unwrap();
        cmd.env("TALLY_PROFILE", self.profile_path.to_str().unwrap())
            .env("XDG_CONFIG_HOME", self.temp_dir.path())
            .env("XDG_DATA_HOME", self.temp_dir.path())
            .env_remove("TALLY_SERVER_URL");
        cmd
    }
}
