mod common;

use predicates::prelude::*;

use common::TestFixture;

#[test]
fn folder_settings_drive_count() {
    let fixture = TestFixture::new().with_sample_tree();
    fixture
        .cmd()
        .args(["config", "-e", "py", "-i", "sub/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved folder settings"));

    assert!(fixture.read(".codel/config.toml").contains("[defaults]"));

    fixture
        .cmd()
        .arg("count")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total lines: 3"));
}

#[test]
fn command_line_overrides_stored_settings() {
    let fixture = TestFixture::new().with_sample_tree();
    fixture.create_settings("[defaults]\nextensions = [\".py\"]\nignore = [\"sub/\"]\n");

    fixture
        .cmd()
        .args(["count", "-i", "nothing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total lines: 8"));
}

#[test]
fn delete_and_list() {
    let fixture = TestFixture::new();
    fixture.create_settings("[defaults]\nextensions = [\".py\"]\nignore = [\"sub/\"]\n");

    fixture
        .cmd()
        .args(["config", "-d", "ignore", "-l"])
        .assert()
        .success()
        .stdout(predicate::str::contains("extensions = [\".py\"]"))
        .stdout(predicate::str::contains("ignore =").not());
}

#[test]
fn delete_unknown_key_warns() {
    let fixture = TestFixture::new();
    fixture
        .cmd()
        .args(["config", "-d", "bogus"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown setting: bogus"));
}

#[test]
fn malformed_settings_exit_with_config_error() {
    let fixture = TestFixture::new().with_sample_tree();
    fixture.create_settings("[defaults\n");

    fixture
        .cmd()
        .args(["count", "-e", ".py"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse settings file"));
}

#[cfg(target_os = "linux")]
#[test]
fn global_settings_apply_to_every_folder() {
    let fixture = TestFixture::new().with_sample_tree();
    fixture
        .cmd()
        .args(["config", "-g", "-e", ".py"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved user settings"));

    assert!(fixture.home.path().join(".config/codel/config.toml").exists());

    fixture
        .cmd()
        .args(["count", "-f", "sub"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total lines: 5"));
}
