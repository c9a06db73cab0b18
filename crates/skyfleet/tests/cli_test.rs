use assert_cmd::Command;
use predicates::prelude::*;

/// Top-level help lists the fleet operations
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("skyfleet").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check-hosts"))
        .stdout(predicate::str::contains("check-volumes"))
        .stdout(predicate::str::contains("create-server"))
        .stdout(predicate::str::contains("show"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("skyfleet").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("skyfleet"));
}

#[test]
fn test_check_hosts_help() {
    let mut cmd = Command::cargo_bin("skyfleet").unwrap();
    cmd.arg("check-hosts")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--evacuate"))
        .stdout(predicate::str::contains("--failsafe"))
        .stdout(predicate::str::contains("--filter"));
}

#[test]
fn test_create_volume_help_mentions_config() {
    let mut cmd = Command::cargo_bin("skyfleet").unwrap();
    cmd.arg("create-volume")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--force"));
}

#[test]
fn test_invalid_command_fails() {
    let mut cmd = Command::cargo_bin("skyfleet").unwrap();
    cmd.arg("not-a-command").assert().failure();
}

/// create-server requires every reference flag
#[test]
fn test_create_server_requires_references() {
    let mut cmd = Command::cargo_bin("skyfleet").unwrap();
    cmd.arg("create-server")
        .arg("--name")
        .arg("svr1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--image"));
}

/// Missing credentials abort through the registry: full code on stderr,
/// coarse 3-digit status as the exit code.
#[test]
fn test_missing_credentials_reports_registry_code() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("skyfleet").unwrap();
    cmd.current_dir(tmp.path())
        .env_remove("SKYFLEET_ENV")
        .env_remove("SKYFLEET_CREDENTIALS_DIR")
        .arg("--log-file")
        .arg(tmp.path().join("run.log"))
        .arg("check-hosts-api")
        .assert()
        .failure()
        .code(150)
        .stderr(predicate::str::contains("1501"));
}

/// An unknown environment name aborts with the credentials failure code.
#[test]
fn test_unknown_environment_aborts_with_credentials_code() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("environments"), "sandbox\n").unwrap();

    let mut cmd = Command::cargo_bin("skyfleet").unwrap();
    cmd.current_dir(tmp.path())
        .arg("--env")
        .arg("production")
        .arg("--credentials-dir")
        .arg(tmp.path())
        .arg("--log-file")
        .arg(tmp.path().join("run.log"))
        .arg("check-hosts-api")
        .assert()
        .failure()
        .code(151)
        .stderr(predicate::str::contains("1510"));
}
