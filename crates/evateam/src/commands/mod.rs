//! CLI command handlers.

pub mod query;
pub mod serve;
pub mod tools;

use std::time::Duration;

use anyhow::{Context as _, Result, bail};
use serde_json::Value;

use evateam_client::{ClientConfig, EvaClient};

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// API base URL.
    pub url: Option<String>,
    /// API token.
    pub token: Option<String>,
    pub timeout: Duration,
    /// Log every exchange.
    pub debug: bool,
    /// Print compact JSON.
    pub compact: bool,
    pub verbose: bool,
}

impl Context {
    /// Connection settings from flags and environment.
    pub fn config(&self) -> Result<ClientConfig> {
        let Some(url) = self.url.as_deref().filter(|u| !u.trim().is_empty()) else {
            bail!("API URL is required (--url or EVA_API_URL)");
        };
        let Some(token) = self.token.as_deref().filter(|t| !t.trim().is_empty()) else {
            bail!("API token is required (--token or EVA_API_TOKEN)");
        };

        let mut config = ClientConfig::new(url, token);
        config.timeout = self.timeout;
        config.debug = self.debug;
        Ok(config)
    }

    /// Build an API client.
    pub fn client(&self) -> Result<EvaClient> {
        let config = self.config()?;
        config
            .builder()
            .build()
            .with_context(|| format!("failed to create client for {}", config.base_url))
    }

    /// Print a JSON value to stdout.
    pub fn print_json(&self, value: &Value) -> Result<()> {
        let text = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        println!("{}", text);
        Ok(())
    }
}
