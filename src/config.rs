//! Environment-driven configuration.

use std::env;
use std::time::Duration;

use crate::client::auth::Credential;
use crate::error::{FatsecretError, Result};

pub const DEFAULT_BASE_URL: &str = "https://platform.fatsecret.com/rest/server.api";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for the client and the MCP binary.
#[derive(Clone, Debug)]
pub struct FatsecretConfig {
    pub credential: Credential,
    pub base_url: String,
    pub timeout: Duration,
    pub bind_addr: String,
    /// Region applied by the MCP tools when a call does not name one.
    pub default_region: Option<String>,
    pub default_language: Option<String>,
}

impl FatsecretConfig {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            credential: Credential::new(consumer_key, consumer_secret),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            default_region: None,
            default_language: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `FATSECRET_CONSUMER_KEY` and `FATSECRET_CONSUMER_SECRET` are required;
    /// everything else falls back to a default.
    pub fn from_env() -> Result<Self> {
        let consumer_key = required("FATSECRET_CONSUMER_KEY")?;
        let consumer_secret = required("FATSECRET_CONSUMER_SECRET")?;

        let base_url = env::var("FATSECRET_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = env::var("FATSECRET_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            credential: Credential::new(consumer_key, consumer_secret),
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            bind_addr,
            default_region: optional("FATSECRET_REGION"),
            default_language: optional("FATSECRET_LANGUAGE"),
        })
    }
}

fn required(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(FatsecretError::Configuration(format!(
            "{name} must be set"
        ))),
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
