use std::sync::Arc;

use anclora_agent::{ollama::OllamaClient, runtime::QuoteGenerator};
use anclora_core::config::{AppConfig, ConfigError};
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub generator: QuoteGenerator,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http client construction failed: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Builds the process-wide generation client. It is created exactly once here
/// and shared by every request until shutdown.
pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    let client = OllamaClient::from_config(&config.llm).map_err(BootstrapError::HttpClient)?;
    info!(
        event_name = "system.bootstrap.llm_client_ready",
        correlation_id = "bootstrap",
        base_url = %config.llm.base_url,
        model = %config.llm.model,
        timeout_secs = config.llm.timeout_secs,
        "generation client initialized"
    );

    Ok(Application { generator: QuoteGenerator::new(Arc::new(client)), config })
}
