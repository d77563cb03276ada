//! CLI commands run as a subprocess.
//!
//! Every command gets its own settings file and app.json inside a temp
//! directory, and the manifest URL environment variable is cleared so the
//! host environment cannot leak into the result.

use assert_cmd::Command;
use barbersbar_update::test_utils::{manifest_json, write_app_json};
use barbersbar_update::update::UpdateManifest;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn barbersbar(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("barbersbar-update").unwrap();
    cmd.current_dir(dir)
        .env("BARBERSBAR_CONFIG", dir.join("config.toml"))
        .env("NO_COLOR", "1")
        .env_remove("EXPO_PUBLIC_UPDATE_JSON_URL")
        .env_remove("RUST_LOG");
    cmd
}

async fn manifest_server(body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/update.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;
    server
}

fn manifest_url(server: &MockServer) -> String {
    format!("{}/update.json", server.uri())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_check_shows_available_update() {
    let temp = TempDir::new().unwrap();
    let server = manifest_server(&manifest_json("1.0.6", 6)).await;

    barbersbar(temp.path())
        .args(["check", "--url", &manifest_url(&server), "--installed-code", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Update available: 1.0.6 (build 6)"))
        .stdout(predicate::str::contains("https://downloads.test/app-1.0.6.apk"))
        .stdout(predicate::str::contains("Release 1.0.6"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_check_up_to_date() {
    let temp = TempDir::new().unwrap();
    let server = manifest_server(&manifest_json("1.0.6", 6)).await;

    barbersbar(temp.path())
        .args(["check", "--url", &manifest_url(&server), "--installed-code", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("You are on the latest version"))
        .stdout(predicate::str::contains("Update available").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_check_uses_app_json() {
    let temp = TempDir::new().unwrap();
    let server = manifest_server(&manifest_json("1.0.6", 6)).await;
    write_app_json(temp.path(), "1.0.5", 5, Some(manifest_url(&server).as_str())).unwrap();

    barbersbar(temp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Update available: 1.0.6"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_check_uses_environment_url() {
    let temp = TempDir::new().unwrap();
    let server = manifest_server(&manifest_json("1.0.6", 6)).await;
    write_app_json(temp.path(), "1.0.5", 5, None).unwrap();

    barbersbar(temp.path())
        .env("EXPO_PUBLIC_UPDATE_JSON_URL", manifest_url(&server))
        .args(["check", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"urlSource\": \"environment\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_check_json_output() {
    let temp = TempDir::new().unwrap();
    let server = manifest_server(&manifest_json("1.0.6", 6)).await;

    let output = barbersbar(temp.path())
        .args(["check", "--json", "--url", &manifest_url(&server), "--installed-code", "5"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["status"], "AVAILABLE");
    assert_eq!(report["urlSource"], "command-line");
    assert_eq!(report["currentVersion"], 5);
    assert_eq!(report["manifest"]["versionName"], "1.0.6");
    assert_eq!(report["prompt"]["releaseNotes"], "Release 1.0.6");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_check_failure_still_exits_zero() {
    let temp = TempDir::new().unwrap();
    let server = manifest_server("<html>oops</html>").await;

    barbersbar(temp.path())
        .args(["check", "--url", &manifest_url(&server), "--installed-code", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unable to check for updates"))
        .stdout(predicate::str::contains("Update available").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_check_invalid_installed_code() {
    let temp = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(manifest_json("1.0.6", 6)))
        .expect(0)
        .mount(&server)
        .await;

    barbersbar(temp.path())
        .args(["check", "--url", &manifest_url(&server), "--installed-code", "abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unable to check for updates"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_check_disabled_in_settings() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), "enabled = false\n").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(manifest_json("1.0.6", 6)))
        .expect(0)
        .mount(&server)
        .await;

    barbersbar(temp.path())
        .args(["check", "--url", &manifest_url(&server), "--installed-code", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Update checks are disabled"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_reports_source_and_result() {
    let temp = TempDir::new().unwrap();
    let server = manifest_server(&manifest_json("1.0.6", 6)).await;
    write_app_json(temp.path(), "1.0.6", 6, None).unwrap();

    barbersbar(temp.path())
        .args(["status", "--url", &manifest_url(&server)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Barbersbar"))
        .stdout(predicate::str::contains("(command-line)"))
        .stdout(predicate::str::contains("Installed build: 6 (up to date)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_watch_prompts_once() {
    let temp = TempDir::new().unwrap();
    let server = manifest_server(&manifest_json("1.0.6", 6)).await;

    let output = barbersbar(temp.path())
        .args([
            "watch",
            "--url",
            &manifest_url(&server),
            "--installed-code",
            "5",
            "--interval",
            "1",
            "--max-cycles",
            "2",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Update available: 1.0.6").count(), 1, "{stdout}");
}

#[test]
fn test_generate_writes_update_json() {
    let temp = TempDir::new().unwrap();
    write_app_json(temp.path(), "2.1.4", 4, None).unwrap();

    barbersbar(temp.path())
        .args([
            "generate",
            "--url-template",
            "https://cdn.example.com/barbersbar-{version}.apk",
            "--notes",
            "Faster booking",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("update.json generated"));

    let written =
        std::fs::read_to_string(temp.path().join("public").join("update.json")).unwrap();
    let manifest = UpdateManifest::parse(&written).unwrap();
    assert_eq!(manifest.version_name, "2.1.4");
    assert_eq!(manifest.version_code.get(), 4);
    assert_eq!(manifest.url, "https://cdn.example.com/barbersbar-2.1.4.apk");
    assert_eq!(manifest.release_notes, "Faster booking");
}

#[test]
fn test_generate_rejects_bad_version() {
    let temp = TempDir::new().unwrap();
    write_app_json(temp.path(), "1.0.beta", 1, None).unwrap();

    barbersbar(temp.path())
        .arg("generate")
        .assert()
        .failure()
        .code(1);
    assert!(!temp.path().join("public").join("update.json").exists());
}

#[test]
fn test_generate_requires_expo_version() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("app.json"),
        r#"{"expo":{"name":"Barbersbar","android":{"versionCode":7}}}"#,
    )
    .unwrap();

    barbersbar(temp.path()).arg("generate").assert().failure().code(1);
    assert!(!temp.path().join("public").join("update.json").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_check_with_negative_app_version_code() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("app.json"),
        r#"{"expo":{"version":"1.0.5","android":{"versionCode":-3}}}"#,
    )
    .unwrap();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(manifest_json("1.0.6", 6)))
        .expect(0)
        .mount(&server)
        .await;

    barbersbar(temp.path())
        .args(["check", "--url", &manifest_url(&server)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unable to check for updates"));

    barbersbar(temp.path())
        .args(["status", "--url", &manifest_url(&server)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed build: invalid"));
}

#[test]
fn test_generate_without_app_json_fails() {
    let temp = TempDir::new().unwrap();

    barbersbar(temp.path()).arg("generate").assert().failure().code(1);
}

#[test]
fn test_config_init_and_path() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("config.toml");

    barbersbar(temp.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    barbersbar(temp.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created settings"));
    assert!(config_path.exists());

    barbersbar(temp.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exist"));
}

#[test]
fn test_broken_settings_file_fails() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), "enabled = [").unwrap();

    barbersbar(temp.path())
        .args(["check", "--url", "https://updates.test/update.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("settings").or(predicate::str::contains("Settings")));
}
