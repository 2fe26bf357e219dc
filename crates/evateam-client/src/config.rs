//! Environment-driven client configuration.

use std::time::Duration;

use crate::client::{ClientBuilder, DEFAULT_TIMEOUT};
use crate::error::{Error, Result};

/// Base URL of the API server.
pub const ENV_API_URL: &str = "EVA_API_URL";
/// Bearer token.
pub const ENV_API_TOKEN: &str = "EVA_API_TOKEN";
/// `true`/`1` turns on request logging.
pub const ENV_DEBUG: &str = "EVA_DEBUG";
/// Request timeout in seconds; `0` keeps the default.
pub const ENV_TIMEOUT: &str = "EVA_TIMEOUT";

/// Connection settings for [`EvaClient`](crate::EvaClient).
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_token: String,
    pub timeout: Duration,
    pub debug: bool,
}

impl ClientConfig {
    /// Create a config with the default timeout and debug off.
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: api_token.into(),
            timeout: DEFAULT_TIMEOUT,
            debug: false,
        }
    }

    /// Read `EVA_API_URL`, `EVA_API_TOKEN`, `EVA_DEBUG` and `EVA_TIMEOUT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup(ENV_API_URL)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::config(format!("{} is required", ENV_API_URL)))?;
        let api_token = lookup(ENV_API_TOKEN)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::config(format!("{} is required", ENV_API_TOKEN)))?;

        let mut config = Self::new(base_url, api_token);

        if let Some(value) = lookup(ENV_DEBUG) {
            config.debug = parse_flag(&value);
        }

        if let Some(value) = lookup(ENV_TIMEOUT) {
            let secs: u64 = value.trim().parse().map_err(|_| {
                Error::config(format!("{} must be a number of seconds, got {:?}", ENV_TIMEOUT, value))
            })?;
            if secs > 0 {
                config.timeout = Duration::from_secs(secs);
            }
        }

        Ok(config)
    }

    /// Start a client builder from these settings.
    pub fn builder(&self) -> ClientBuilder {
        ClientBuilder::new()
            .base_url(&self.base_url)
            .api_token(&self.api_token)
            .timeout(self.timeout)
            .debug(self.debug)
    }
}

fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1" || value.eq_ignore_ascii_case("yes")
}
