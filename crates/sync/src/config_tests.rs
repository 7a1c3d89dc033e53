// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for API configuration loading.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::fs;
use std::time::Duration;

use tempfile::TempDir;

use super::{ApiConfig, ConfigError};

#[test]
fn test_load_full_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gatelog.toml");
    fs::write(
        &path,
        r#"
url = "https://api.example.com"
api_key = "svc-key"
bearer_token = "session-token"
submit_timeout_secs = 10
"#,
    )
    .unwrap();

    let config = ApiConfig::load(&path).unwrap();
    assert_eq!(config.url, "https://api.example.com");
    assert_eq!(config.api_key, "svc-key");
    assert_eq!(config.bearer_token.as_deref(), Some("session-token"));
    assert_eq!(config.submit_timeout(), Duration::from_secs(10));
}

#[test]
fn test_load_applies_defaults_for_missing_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gatelog.toml");
    fs::write(&path, "url = \"https://api.example.com\"\n").unwrap();

    let config = ApiConfig::load(&path).unwrap();
    assert_eq!(config.api_key, "");
    assert!(config.bearer_token.is_none());
    assert_eq!(config.submit_timeout(), Duration::from_secs(6));
}

#[test]
fn test_load_missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let result = ApiConfig::load(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Read(_))));
}

#[test]
fn test_load_rejects_config_without_url() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gatelog.toml");
    fs::write(&path, "api_key = \"svc-key\"\n").unwrap();

    let result = ApiConfig::load(&path);
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_new_uses_defaults() {
    let config = ApiConfig::new("https://api.example.com");
    assert_eq!(config.url, "https://api.example.com");
    assert_eq!(config.api_key, "");
    assert!(config.bearer_token.is_none());
    assert_eq!(config.submit_timeout(), Duration::from_secs(6));
}
