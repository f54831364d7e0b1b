use assert_cmd::Command;
use std::fs;

fn regionban() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("regionban").unwrap();
    // Keep the host environment from leaking into CLI behavior.
    cmd.env_remove("REGIONBAN_LOG_FILE")
        .env_remove("REGIONBAN_GEODB")
        .env_remove("REGIONBAN_ALLOW_MARKER")
        .env_remove("REGIONBAN_LOG_DIR")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_describes_the_pipeline_options() {
    let assert = regionban().arg("--help").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("--allow-marker"));
    assert!(stdout.contains("--ban-command"));
    assert!(stdout.contains("--interval"));
}

#[test]
fn allow_marker_is_required() {
    regionban()
        .args(["--log-file", "/tmp/server.log"])
        .assert()
        .failure();
}

#[test]
fn missing_geo_database_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let log_file = dir.path().join("server.log");
    fs::write(&log_file, "connect from 8.8.8.8\n").unwrap();

    let assert = regionban()
        .args([
            "--log-file",
            log_file.to_str().unwrap(),
            "--allow-marker",
            "Guangzhou",
            "--geodb",
            "/nonexistent/GeoLite2-City.mmdb",
        ])
        .assert()
        .failure();

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(
        stderr.contains("geo database"),
        "stderr should name the database failure: {stderr}"
    );
}
