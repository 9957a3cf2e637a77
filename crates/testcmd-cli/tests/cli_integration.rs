use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn testcmd() -> Command {
    let mut cmd = Command::cargo_bin("testcmd").unwrap();
    cmd.env_remove("TESTCMD_CONFIG");
    cmd
}

#[test]
fn test_help_exits_zero() {
    testcmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("testcmd"));
}

#[test]
fn test_show_unsupported_project_json() {
    let assert = testcmd()
        .args(["-f", "json", "show"])
        .arg(fixture_path("plain"))
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["executable"], "");
    assert_eq!(json["arguments"], serde_json::json!([]));
    assert_eq!(json["exclude_list"], serde_json::json!([]));
}

#[test]
fn test_show_unsupported_project_text() {
    testcmd()
        .arg("show")
        .arg(fixture_path("plain"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No Swift package or Xcode project found"));
}

#[test]
fn test_classify_swift_package() {
    let assert = testcmd()
        .args(["-f", "json", "classify"])
        .arg(fixture_path("swiftpm"))
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["kind"], "swift_package");
    assert_eq!(
        json["exclude_list"],
        serde_json::json!(["Package.swift", "Package@swift-5.11.swift"])
    );
    assert!(json["anchor"].as_str().unwrap().ends_with("/Package.swift"));
}

#[test]
fn test_classify_xcode_project_beats_package() {
    testcmd()
        .arg("classify")
        .arg(fixture_path("xcode"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Xcode project ("))
        .stdout(predicate::str::contains("CocoaApp.xcodeproj"));
}

#[test]
fn test_classify_unsupported() {
    testcmd()
        .arg("classify")
        .arg(fixture_path("plain"))
        .assert()
        .success()
        .stdout("unsupported\n");
}

#[test]
fn test_show_nonexistent_directory() {
    testcmd()
        .args(["show", "/nonexistent/project/dir"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn test_init_writes_store_and_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("main.swift"), "print(1)\n").unwrap();
    let store = dir.path().join("testcmd.conf.json");

    testcmd().arg("init").arg(dir.path()).assert().success();

    let contents = std::fs::read_to_string(&store).unwrap();
    let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(json["test_command_executable"], "");
    assert_eq!(json["test_command_arguments"], serde_json::json!([]));

    testcmd()
        .arg("init")
        .arg(dir.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("--force"));

    testcmd()
        .args(["init", "--force"])
        .arg(dir.path())
        .assert()
        .success();
}

#[test]
fn test_init_respects_config_name() {
    let dir = tempfile::tempdir().unwrap();

    testcmd()
        .args(["--config-name", "custom.json", "init"])
        .arg(dir.path())
        .assert()
        .success();

    assert!(dir.path().join("custom.json").exists());
    assert!(!dir.path().join("testcmd.conf.json").exists());
}
