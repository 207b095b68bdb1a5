#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::{
    predicate::str::{contains, is_empty},
    PredicateBooleanExt,
};

use test_context::TestContext;

pub mod test_context;

#[test]
fn config_shows_defaults_without_profile() {
    let context = TestContext::new();

    let assert = context.command().arg("config").assert();

    assert
        .success()
        .stdout(
            contains(r#""server_url": "http://localhost:4280""#)
                .and(contains(r#""per_page": 15"#))
                .and(contains(r#""profile_exists": false"#)),
        )
        .stderr(is_empty());
}

#[test]
fn profile_arg_overrides_env() {
    let context = TestContext::new();
    let other = context.temp_dir.path().join("other.toml");
    std::fs::write(&other, "server_url = \"http://from-arg:1\"\n").unwrap();

    let assert = context
        .command()
        .args(["--profile-path", other.to_str().unwrap()])
        .arg("config")
        .assert();

    assert
        .success()
        .stdout(contains(r#""server_url": "http://from-arg:1""#));
}

#[test]
fn profile_file_settings_are_picked_up() {
    let context = TestContext::with_profile(
        "server_url = \"http://profile:4280\"\nper_page = 25\n",
    );

    let assert = context.command().arg("config").assert();

    assert.success().stdout(
        contains(r#""server_url": "http://profile:4280""#)
            .and(contains(r#""per_page": 25"#))
            .and(contains(r#""profile_exists": true"#)),
    );
}

#[test]
fn init_creates_profile_and_refuses_to_overwrite() {
    let context = TestContext::new();

    context
        .command()
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Profile created at"));
    assert!(context.profile_path.exists());

    context
        .command()
        .arg("init")
        .assert()
        .failure()
        .stderr(contains("profile already exists"));
}

#[test]
fn malformed_filter_is_rejected() {
    let context = TestContext::new();

    context
        .command()
        .args(["product", "list", "--filter", "novalue"])
        .assert()
        .failure()
        .stderr(contains("expected KEY=VALUE"));
}

#[test]
fn purchase_create_rejects_bad_date() {
    let context = TestContext::new();

    context
        .command()
        .args([
            "purchase", "create", "SUP-1", "INV-1", "--total-cents", "100", "--date",
            "16/03/2024",
        ])
        .assert()
        .failure()
        .stderr(contains("expected YYYY-MM-DD"));
}

#[test]
fn account_create_requires_code_and_name() {
    let context = TestContext::new();

    context
        .command()
        .args(["account", "create"])
        .assert()
        .failure()
        .stderr(contains("required"));
}

#[test]
fn cached_list_without_snapshot_fails_cleanly() {
    let context = TestContext::with_profile(&format!(
        "cache_dir = \"{}\"\n",
        context_cache_dir()
    ));

    context
        .command()
        .args(["product", "list", "--cached"])
        .assert()
        .failure()
        .stderr(contains("no usable cached page"));
}

fn context_cache_dir() -> String {
    // a path that exists nowhere; load must fail, not hang
    std::env::temp_dir()
        .join(format!("tally-missing-{}", uuid::Uuid::new_v4()))
        .to_string_lossy()
        .into_owned()
}

#[test]
fn version_flag_works() {
    let mut cmd = Command::cargo_bin("tally").unwrap();

    cmd.arg("--version")
        .assert()
        .success()
        .stdout(contains("tally"));
}
