#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::path::Path;

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::{PredicateBooleanExt, predicate};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_config(dir: &Path, base_url: &str) {
    std::fs::write(
        dir.join("config.toml"),
        format!("[catalog]\nbase_url = \"{base_url}\"\napi_host = \"localhost\"\n"),
    )
    .unwrap();
}

#[test]
fn test_search_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviefind");
    cmd.args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--query"));
}

#[test]
fn test_search_requires_api_key() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("moviefind");
    cmd.env_remove("RAPIDAPI_KEY")
        .args(["--dir", dir.path().to_str().unwrap(), "search", "--query", "heat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "RAPIDAPI_KEY environment variable is required",
        ));
}

#[test]
fn test_browse_requires_api_key() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("moviefind");
    cmd.env_remove("RAPIDAPI_KEY")
        .args(["--dir", dir.path().to_str().unwrap(), "browse"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("RAPIDAPI_KEY"));
}

#[test]
fn test_config_init_then_show() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let dir_arg = dir.path().to_str().unwrap();

    // Act
    cargo_bin_cmd!("moviefind")
        .args(["--dir", dir_arg, "config", "init"])
        .assert()
        .success();

    // Assert
    let written = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(written.contains("imdb236.p.rapidapi.com"));
    assert!(!written.contains("api_key"));
    cargo_bin_cmd!("moviefind")
        .env("RAPIDAPI_KEY", "super-secret")
        .env("RUST_LOG", "info")
        .args(["--dir", dir_arg, "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api_host: imdb236.p.rapidapi.com"))
        .stdout(predicate::str::contains("RAPIDAPI_KEY: set"))
        .stdout(predicate::str::contains("super-secret").not());
}

#[test]
fn test_config_init_refuses_overwrite() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "http://127.0.0.1:1/");

    // Act & Assert
    cargo_bin_cmd!("moviefind")
        .args(["--dir", dir.path().to_str().unwrap(), "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_prints_results() {
    // Arrange
    let server = MockServer::start().await;
    let json_body = include_str!("../../../fixtures/catalog/search_matrix.json");
    Mock::given(method("GET"))
        .and(path("/api/imdb/search"))
        .and(query_param("title", "matrix"))
        .and(header("X-RapidAPI-Key", "test-key"))
        .and(header("X-RapidAPI-Host", "localhost"))
        .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &format!("{}/api/imdb/", server.uri()));

    // Act & Assert
    cargo_bin_cmd!("moviefind")
        .env("RAPIDAPI_KEY", "test-key")
        .env("RUST_LOG", "info")
        .args(["--dir", dir.path().to_str().unwrap(), "search", "--query", "matrix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Results: 2"))
        .stdout(predicate::str::contains("The Matrix Reloaded"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_failure_prints_generic_message() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &format!("{}/api/imdb/", server.uri()));

    // Act & Assert
    cargo_bin_cmd!("moviefind")
        .env("RAPIDAPI_KEY", "test-key")
        .env("RUST_LOG", "info")
        .args(["--dir", dir.path().to_str().unwrap(), "search"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Failed to fetch movies. Please try again later.",
        ));
}
