//! Shared helpers for integration tests

#![allow(dead_code)]

use scryfall_client::{Config, ScryfallClient};
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::MockServer;

/// Create a temporary directory for test files
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Setup test logging
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// Path of a file under `tests/fixtures`
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Contents of a file under `tests/fixtures`
pub fn fixture(name: &str) -> Vec<u8> {
    std::fs::read(fixture_path(name)).expect("Failed to read fixture")
}

/// Parsed JSON value of a fixture
pub fn fixture_json(name: &str) -> serde_json::Value {
    serde_json::from_slice(&fixture(name)).expect("Fixture is not valid JSON")
}

/// Configuration pointed at `server` with a fast retry policy
pub fn test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.api.base_url = server.uri();
    config.api.timeout_secs = 5;
    config.rate_limit.max_per_window = 100;
    config.retry.initial_backoff_ms = 10;
    config.retry.max_backoff_ms = 50;
    config
}

/// Client talking to `server`
pub fn test_client(server: &MockServer) -> ScryfallClient {
    ScryfallClient::new(&test_config(server)).expect("Failed to build client")
}

/// The `n`th card of `cards.json`
pub fn card_json(n: usize) -> serde_json::Value {
    fixture_json("cards.json")[n].clone()
}

/// A list object wrapping `data`
pub fn list_json(data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "object": "list",
        "has_more": false,
        "data": data,
    })
}

/// An error object as the API returns it
pub fn error_json(status: u16, code: &str, details: &str) -> serde_json::Value {
    serde_json::json!({
        "object": "error",
        "status": status,
        "code": code,
        "details": details,
    })
}
