use std::sync::Arc;

use anclora_core::{assemble_content, ApplicationError, QuoteRequest, QuoteResponse};
use tracing::{info, warn};

use crate::extract::extract_json;
use crate::llm::LlmClient;
use crate::prompts::PromptPair;

/// Runs one quote request end to end: probe, prompt, generate, extract,
/// reconcile.
///
/// Backend failures come back as `Err` and are meant to become HTTP errors.
/// Content failures (unparseable or malformed model output) come back as an
/// `Ok` response with `success: false`.
#[derive(Clone)]
pub struct QuoteGenerator {
    llm: Arc<dyn LlmClient>,
}

impl QuoteGenerator {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub fn model(&self) -> &str {
        self.llm.model()
    }

    pub async fn backend_available(&self) -> bool {
        self.llm.is_available().await
    }

    pub async fn generate_quote(
        &self,
        request: &QuoteRequest,
        correlation_id: &str,
    ) -> Result<QuoteResponse, ApplicationError> {
        if !self.llm.is_available().await {
            warn!(
                event_name = "agent.quote.backend_unavailable",
                correlation_id,
                model = self.llm.model(),
                "generation backend failed availability probe"
            );
            return Err(ApplicationError::BackendUnavailable);
        }

        let prompts = PromptPair::for_request(request);
        info!(
            event_name = "agent.quote.generation_started",
            correlation_id,
            model = self.llm.model(),
            services = request.services.len(),
            language = request.language.code(),
            "requesting quote content from backend"
        );

        let raw = self.llm.complete(&prompts.system, &prompts.user).await.map_err(|error| {
            warn!(
                event_name = "agent.quote.generation_failed",
                correlation_id,
                error = %error,
                "generation backend call failed"
            );
            ApplicationError::from(error)
        })?;

        let object = match extract_json(&raw) {
            Ok(object) => object,
            Err(error) => {
                warn!(
                    event_name = "agent.quote.parse_failed",
                    correlation_id,
                    raw_chars = raw.chars().count(),
                    "model reply did not contain a JSON object"
                );
                return Ok(QuoteResponse::failed(
                    format!("Failed to parse AI response: {error}"),
                    Some(raw),
                ));
            }
        };

        match assemble_content(&object, &request.services, request.language) {
            Ok(content) => {
                info!(
                    event_name = "agent.quote.generated",
                    correlation_id,
                    services = content.services.len(),
                    "quote content reconciled"
                );
                Ok(QuoteResponse::generated(content, raw))
            }
            Err(error) => {
                warn!(
                    event_name = "agent.quote.reconcile_failed",
                    correlation_id,
                    error = %error,
                    "model reply could not be reconciled"
                );
                Ok(QuoteResponse::failed(format!("Unexpected error: {error}"), None))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anclora_core::{ApplicationError, Language, QuoteRequest, ServiceInput, TechnicalDepth, Tone};
    use rust_decimal::Decimal;

    use super::QuoteGenerator;
    use crate::llm::LlmError;
    use crate::stub::ScriptedLlmClient;

    fn request(language: Language) -> QuoteRequest {
        QuoteRequest {
            client_name: "Acme".to_string(),
            project_name: "Portal".to_string(),
            project_description: None,
            services: vec![ServiceInput {
                name: "Build".to_string(),
                description: "Backend implementation".to_string(),
                estimated_hours: 10,
                hourly_rate: Decimal::new(50, 0),
            }],
            language,
            tone: Tone::Professional,
            technical_depth: TechnicalDepth::default(),
            custom_instructions: None,
        }
    }

    #[tokio::test]
    async fn fenced_reply_is_reconciled_against_inputs() {
        let raw = "Here you go:\n```json\n{\"introduction\":\"Hi\",\"services\":[],\"timeline\":\"t\",\"payment_terms\":\"p\",\"conclusion\":\"c\"}\n```";
        let llm = Arc::new(ScriptedLlmClient::replying(raw));
        let generator = QuoteGenerator::new(llm.clone());

        let response =
            generator.generate_quote(&request(Language::En), "req-1").await.expect("response");

        assert!(response.success);
        assert_eq!(response.raw_response.as_deref(), Some(raw));
        let content = response.content.expect("content");
        assert_eq!(content.introduction, "Hi");
        assert_eq!(content.timeline, "t");
        assert_eq!(content.payment_terms, "p");
        assert_eq!(content.conclusion, "c");
        assert_eq!(content.services.len(), 1);
        assert_eq!(content.services[0].hours, 10);
        assert_eq!(content.services[0].hourly_rate, Decimal::new(50, 0));
        assert_eq!(content.services[0].amount, Decimal::new(500, 0));
        assert_eq!(content.services[0].description, "Backend implementation");
        assert_eq!(llm.completions(), 1);
    }

    #[tokio::test]
    async fn model_numbers_are_overridden() {
        let raw = r#"{"introduction":"Hola","services":[{"name":"Build","description":"API y base de datos","hours":3,"hourly_rate":999,"amount":1}]}"#;
        let generator = QuoteGenerator::new(Arc::new(ScriptedLlmClient::replying(raw)));

        let response =
            generator.generate_quote(&request(Language::Es), "req-2").await.expect("response");

        let content = response.content.expect("content");
        assert_eq!(content.services[0].description, "API y base de datos");
        assert_eq!(content.services[0].hours, 10);
        assert_eq!(content.services[0].amount, Decimal::new(500, 0));
        assert_eq!(content.timeline, "A determinar según disponibilidad");
        assert_eq!(content.payment_terms, "50% al inicio, 50% a la entrega");
    }

    #[tokio::test]
    async fn prose_reply_is_a_parse_failure_with_raw_text() {
        let prose = "I am unable to write this quote.";
        let generator = QuoteGenerator::new(Arc::new(ScriptedLlmClient::replying(prose)));

        let response =
            generator.generate_quote(&request(Language::En), "req-3").await.expect("response");

        assert!(!response.success);
        assert!(response.content.is_none());
        let error = response.error.expect("error message");
        assert!(error.starts_with("Failed to parse AI response"));
        assert_eq!(response.raw_response.as_deref(), Some(prose));
    }

    #[tokio::test]
    async fn malformed_content_is_an_unexpected_error() {
        let raw = r#"{"introduction": "Hi", "services": "none"}"#;
        let generator = QuoteGenerator::new(Arc::new(ScriptedLlmClient::replying(raw)));

        let response =
            generator.generate_quote(&request(Language::En), "req-4").await.expect("response");

        assert!(!response.success);
        assert!(response.error.expect("error").starts_with("Unexpected error"));
        assert!(response.raw_response.is_none());
    }

    #[tokio::test]
    async fn unavailable_backend_short_circuits_before_generation() {
        let llm = Arc::new(ScriptedLlmClient::unavailable());
        let generator = QuoteGenerator::new(llm.clone());

        let error = generator
            .generate_quote(&request(Language::En), "req-5")
            .await
            .expect_err("unavailable backend should fail");

        assert_eq!(error, ApplicationError::BackendUnavailable);
        assert_eq!(llm.completions(), 0);
    }

    #[tokio::test]
    async fn backend_failures_propagate_as_application_errors() {
        let cases = [
            (LlmError::Timeout, ApplicationError::BackendTimeout),
            (LlmError::UpstreamStatus { status: 500 }, ApplicationError::BackendStatus(500)),
            (
                LlmError::Communication("connection reset".to_string()),
                ApplicationError::BackendCommunication("connection reset".to_string()),
            ),
        ];

        for (failure, expected) in cases {
            let generator = QuoteGenerator::new(Arc::new(ScriptedLlmClient::failing(failure)));
            let error = generator
                .generate_quote(&request(Language::En), "req-6")
                .await
                .expect_err("backend failure should propagate");
            assert_eq!(error, expected);
        }
    }
}
