use std::time::Duration;

use anclora_core::config::LlmConfig;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::llm::{LlmClient, LlmError};

pub const TEMPERATURE: f64 = 0.7;
pub const TOP_P: f64 = 0.9;
pub const NUM_PREDICT: u32 = 2048;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
    options: SamplingOptions,
}

#[derive(Debug, Serialize)]
struct SamplingOptions {
    temperature: f64,
    top_p: f64,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateReply {
    #[serde(default)]
    response: String,
}

/// Ollama `/api/generate` adapter. Holds one pooled HTTP client for the life
/// of the process.
#[derive(Clone, Debug)]
pub struct OllamaClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: Option<SecretString>,
}

impl OllamaClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url, model: model.into(), api_key: None })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, reqwest::Error> {
        let client =
            Self::new(&config.base_url, &config.model, Duration::from_secs(config.timeout_secs))?;
        Ok(match &config.api_key {
            Some(api_key) => client.with_api_key(api_key.clone()),
            None => client,
        })
    }

    pub fn with_api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(api_key) => request.bearer_auth(api_key.expose_secret()),
            None => request,
        }
    }
}

fn classify(error: reqwest::Error) -> LlmError {
    if error.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::Communication(error.to_string())
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt: user_prompt,
            system: system_prompt,
            stream: false,
            options: SamplingOptions {
                temperature: TEMPERATURE,
                top_p: TOP_P,
                num_predict: NUM_PREDICT,
            },
        };

        let response = self
            .authorize(self.http.post(format!("{}/api/generate", self.base_url)))
            .json(&body)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                event_name = "agent.ollama.upstream_status",
                status = status.as_u16(),
                model = %self.model,
                "ollama generation returned non-success status"
            );
            return Err(LlmError::UpstreamStatus { status: status.as_u16() });
        }

        let reply: GenerateReply = response.json().await.map_err(classify)?;
        debug!(
            event_name = "agent.ollama.completed",
            model = %self.model,
            response_chars = reply.response.chars().count(),
            "ollama generation completed"
        );
        Ok(reply.response)
    }

    async fn is_available(&self) -> bool {
        match self.authorize(self.http.get(format!("{}/api/tags", self.base_url))).send().await {
            Ok(response) => response.status().is_success(),
            Err(error) => {
                debug!(
                    event_name = "agent.ollama.probe_failed",
                    error = %error,
                    "ollama availability probe failed"
                );
                false
            }
        }
    }

    fn model(&self) -> &str {
        &self.model
    }
}
