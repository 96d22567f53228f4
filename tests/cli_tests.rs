//! Integration tests for the CLI interface
//!
//! Every test points `--root` (or the working directory) at a temporary
//! directory so nothing is written into the source tree.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JAR_NAME: &str = "iceberg-spark-runtime-3.3_2.12-0.14.1.jar";

fn cli(root: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("iceberg-fixtures").unwrap();
    cmd.arg("--root")
        .arg(root.path())
        .env_remove("ICEBERG_FIXTURES_ROOT")
        .env_remove("ICEBERG_FIXTURES_JAR_URL")
        .env_remove("ICEBERG_FIXTURES_REPOSITORY")
        .env_remove("ICEBERG_FIXTURES_TIMEOUT_SECS")
        .env_remove("ICEBERG_FIXTURES_LOG_LEVEL");
    cmd
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = Command::cargo_bin("iceberg-fixtures").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("download-jar"))
        .stdout(predicate::str::contains("warehouse"));
}

#[test]
fn test_invalid_command() {
    let mut cmd = Command::cargo_bin("iceberg-fixtures").unwrap();
    cmd.arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_url_and_coordinate_conflict() {
    let root = TempDir::new().unwrap();
    cli(&root)
        .args(["jar-path", "--url", "https://a/b.jar", "--coordinate", "a:b:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_jar_path_defaults_to_runtime_jar() {
    let root = TempDir::new().unwrap();
    let expected = root.path().join("jars").join(JAR_NAME);
    cli(&root)
        .arg("jar-path")
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));
    assert!(!root.path().join("jars").exists());
}

#[test]
fn test_jar_path_from_coordinate() {
    let root = TempDir::new().unwrap();
    cli(&root)
        .args(["jar-path", "--coordinate", "com.example:lib:2.0:sources"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lib-2.0-sources.jar"));
}

#[test]
fn test_jar_path_rejects_bad_coordinate() {
    let root = TempDir::new().unwrap();
    cli(&root)
        .args(["jar-path", "--coordinate", "com.example"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid Maven coordinate"));
}

#[test]
fn test_download_existing_jar_exits_with_distinct_code() {
    let root = TempDir::new().unwrap();
    let jar = root.path().join("jars").join(JAR_NAME);
    std::fs::create_dir_all(jar.parent().unwrap()).unwrap();
    std::fs::write(&jar, b"cached jar").unwrap();

    cli(&root)
        .assert()
        .code(255)
        .stdout(predicate::str::contains("File already exists:"))
        .stdout(predicate::str::contains(JAR_NAME));

    assert_eq!(std::fs::read(&jar).unwrap(), b"cached jar");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_jar_from_mock_repository() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maven2/com/example/lib/2.0/lib-2.0.jar"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jar bytes".to_vec()))
        .mount(&mock_server)
        .await;

    let root = TempDir::new().unwrap();
    let repository = format!("{}/maven2", mock_server.uri());

    cli(&root)
        .args(["download-jar", "--coordinate", "com.example:lib:2.0"])
        .args(["--repository", &repository])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jar downloaded to:"));

    assert_eq!(
        std::fs::read(root.path().join("jars").join("lib-2.0.jar")).unwrap(),
        b"jar bytes"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_http_error_fails() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let root = TempDir::new().unwrap();
    cli(&root)
        .args(["download-jar", "--url", &format!("{}/x.jar", mock_server.uri())])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));

    assert!(!root.path().join("jars").join("x.jar").exists());
}

#[test]
fn test_warehouse_is_idempotent() {
    let root = TempDir::new().unwrap();
    let expected = root.path().join("test_warehouse");

    for _ in 0..2 {
        cli(&root)
            .arg("warehouse")
            .assert()
            .success()
            .stdout(predicate::str::contains(expected.display().to_string()));
        assert!(expected.is_dir());
    }
}

#[test]
fn test_warehouse_no_create_only_prints() {
    let root = TempDir::new().unwrap();
    cli(&root)
        .args(["warehouse", "--no-create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("test_warehouse"));
    assert!(!root.path().join("test_warehouse").exists());
}

#[test]
fn test_config_file_renames_directories() {
    let root = TempDir::new().unwrap();
    std::fs::write(
        root.path().join("iceberg-fixtures.toml"),
        "warehouse_dir_name = \"wh\"\n",
    )
    .unwrap();

    cli(&root).arg("warehouse").assert().success();
    assert!(root.path().join("wh").is_dir());
}

#[test]
fn test_env_overrides_config_file() {
    let root = TempDir::new().unwrap();
    std::fs::write(
        root.path().join("iceberg-fixtures.toml"),
        "jar_url = \"https://file.example/from-file.jar\"\n",
    )
    .unwrap();

    cli(&root)
        .env("ICEBERG_FIXTURES_JAR_URL", "https://env.example/from-env.jar")
        .arg("jar-path")
        .assert()
        .success()
        .stdout(predicate::str::contains("from-env.jar"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let root = TempDir::new().unwrap();
    cli(&root)
        .args(["--config"])
        .arg(root.path().join("absent.toml"))
        .arg("warehouse")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_root_defaults_to_current_dir() {
    let cwd = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("iceberg-fixtures").unwrap();
    cmd.current_dir(cwd.path())
        .env_remove("ICEBERG_FIXTURES_ROOT")
        .arg("warehouse")
        .assert()
        .success();
    assert!(cwd.path().join("test_warehouse").is_dir());
}
