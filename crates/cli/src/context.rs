//! CLI execution context.

use anyhow::Result;

use atelier_client::ApiClient;

use crate::config::CliConfig;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    pub config: CliConfig,
    pub output: Output,
}

impl Context {
    pub fn new(config: CliConfig, output: Output) -> Self {
        Self { config, output }
    }

    /// API client for the configured url.
    pub fn client(&self) -> Result<ApiClient> {
        let config = self.config.client_config()?;
        self.output.debug(&format!("API at {}", config.base_url()));
        Ok(ApiClient::new(config)?)
    }
}
