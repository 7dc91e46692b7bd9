use axum::{extract::State, Json};
use serde::Serialize;
use tracing::debug;

use crate::routes::AppState;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ollama_available: bool,
    pub model: String,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let ollama_available = state.generator.backend_available().await;
    debug!(event_name = "system.health.checked", ollama_available, "health probe completed");

    Json(HealthResponse {
        status: if ollama_available { "healthy" } else { "degraded" },
        ollama_available,
        model: state.generator.model().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anclora_agent::{runtime::QuoteGenerator, stub::ScriptedLlmClient};
    use axum::{extract::State, Json};

    use crate::health::health;
    use crate::routes::AppState;

    #[tokio::test]
    async fn health_reports_healthy_when_backend_is_reachable() {
        let state = AppState {
            generator: QuoteGenerator::new(Arc::new(ScriptedLlmClient::replying("{}"))),
        };

        let Json(payload) = health(State(state)).await;

        assert_eq!(payload.status, "healthy");
        assert!(payload.ollama_available);
        assert_eq!(payload.model, "scripted");
    }

    #[tokio::test]
    async fn health_reports_degraded_when_backend_is_unreachable() {
        let state =
            AppState { generator: QuoteGenerator::new(Arc::new(ScriptedLlmClient::unavailable())) };

        let Json(payload) = health(State(state)).await;

        assert_eq!(payload.status, "degraded");
        assert!(!payload.ollama_available);
    }
}
