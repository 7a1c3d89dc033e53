// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote API configuration.
//!
//! Loaded from a TOML file, with environment overrides so deployments
//! can keep the API key out of the config file:
//! `GATELOG_API_URL`, `GATELOG_API_KEY`, `GATELOG_API_TOKEN`.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

const ENV_API_URL: &str = "GATELOG_API_URL";
const ENV_API_KEY: &str = "GATELOG_API_KEY";
const ENV_API_TOKEN: &str = "GATELOG_API_TOKEN";

const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 6;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for the remote check-in service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the check-in service.
    pub url: String,
    /// Service API key injected as `x-api-key` on every request.
    #[serde(default)]
    pub api_key: String,
    /// Bearer token for an authenticated operator session, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    /// Per-record submission timeout in seconds (default: 6).
    #[serde(default = "default_submit_timeout_secs")]
    pub submit_timeout_secs: u64,
}

fn default_submit_timeout_secs() -> u64 {
    DEFAULT_SUBMIT_TIMEOUT_SECS
}

impl ApiConfig {
    /// Create a config with defaults for everything but the URL.
    pub fn new(url: impl Into<String>) -> Self {
        ApiConfig {
            url: url.into(),
            api_key: String::new(),
            bearer_token: None,
            submit_timeout_secs: DEFAULT_SUBMIT_TIMEOUT_SECS,
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: ApiConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply environment overrides on top of the loaded values.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            self.url = url;
        }
        if let Ok(key) = std::env::var(ENV_API_KEY) {
            self.api_key = key;
        }
        if let Ok(token) = std::env::var(ENV_API_TOKEN) {
            self.bearer_token = Some(token);
        }
    }

    /// Per-record submission timeout.
    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.submit_timeout_secs)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
