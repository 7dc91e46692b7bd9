use anclora_agent::runtime::QuoteGenerator;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::{health, quotes};

#[derive(Clone)]
pub struct AppState {
    pub generator: QuoteGenerator,
}

pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(quotes::root))
        .route("/health", get(health::health))
        .route("/api/generate-quote", post(quotes::generate_quote))
        .with_state(state)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Credentialed CORS cannot use wildcard headers, so request headers are
/// mirrored instead.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(
                    event_name = "system.cors.invalid_origin",
                    origin = %origin,
                    "skipping origin that is not a valid header value"
                );
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anclora_agent::{runtime::QuoteGenerator, stub::ScriptedLlmClient};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::{router, AppState};

    fn app(llm: ScriptedLlmClient) -> Router {
        router(
            AppState { generator: QuoteGenerator::new(Arc::new(llm)) },
            &["http://localhost:3000".to_string()],
        )
    }

    fn quote_body() -> Value {
        json!({
            "client_name": "Acme",
            "project_name": "Portal",
            "services": [
                {"name": "Build", "description": "Backend implementation", "estimated_hours": 10, "hourly_rate": 50}
            ],
            "language": "en",
            "tone": "formal",
            "technical_depth": 7
        })
    }

    async fn post_quote(app: Router, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/generate-quote")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn generate_quote_route_returns_reconciled_json() {
        let raw = r#"{"introduction":"Dear Acme","services":[{"description":"API work","hours":1,"hourly_rate":1,"amount":1}],"conclusion":"Regards"}"#;

        let (status, body) = post_quote(app(ScriptedLlmClient::replying(raw)), quote_body()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["error"], Value::Null);
        assert_eq!(body["content"]["services"][0]["name"], "Build");
        assert_eq!(body["content"]["services"][0]["description"], "API work");
        assert_eq!(body["content"]["services"][0]["hours"], 10);
        assert_eq!(body["content"]["services"][0]["hourly_rate"].as_f64(), Some(50.0));
        assert_eq!(body["content"]["services"][0]["amount"].as_f64(), Some(500.0));
        assert_eq!(body["content"]["timeline"], "Timeline to be determined based on availability");
        assert_eq!(body["raw_response"], raw);
    }

    #[tokio::test]
    async fn prose_reply_returns_200_with_failure_flag() {
        let prose = "Happy to help, but I cannot format that.";

        let (status, body) = post_quote(app(ScriptedLlmClient::replying(prose)), quote_body()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert_eq!(body["content"], Value::Null);
        assert_eq!(body["raw_response"], prose);
    }

    #[tokio::test]
    async fn unreachable_backend_returns_503_detail() {
        let (status, body) = post_quote(app(ScriptedLlmClient::unavailable()), quote_body()).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["detail"].as_str().unwrap_or_default().contains("not available"));
    }

    #[tokio::test]
    async fn negative_rate_is_rejected_with_422() {
        let mut body = quote_body();
        body["services"][0]["hourly_rate"] = json!(-5);

        let (status, body) = post_quote(app(ScriptedLlmClient::replying("{}")), body).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap_or_default().contains("hourly_rate"));
    }

    #[tokio::test]
    async fn overflowing_amount_is_rejected_with_422() {
        let mut body = quote_body();
        body["services"][0]["estimated_hours"] = json!(4_000_000_000_u32);
        body["services"][0]["hourly_rate"] = json!(1e20);

        let (status, body) = post_quote(app(ScriptedLlmClient::replying("{}")), body).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap_or_default().contains("supported range"));
    }

    #[tokio::test]
    async fn health_route_reports_model() {
        let response = app(ScriptedLlmClient::replying("{}"))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let body: Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(body, json!({"status": "healthy", "ollama_available": true, "model": "scripted"}));
    }

    #[tokio::test]
    async fn cors_preflight_allows_configured_origin_only() {
        let preflight = |origin: &'static str| {
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/generate-quote")
                .header(header::ORIGIN, origin)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .expect("request")
        };

        let allowed = app(ScriptedLlmClient::replying("{}"))
            .oneshot(preflight("http://localhost:3000"))
            .await
            .expect("response");
        assert_eq!(
            allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).map(|v| v.as_bytes()),
            Some(&b"http://localhost:3000"[..])
        );
        assert_eq!(
            allowed.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).map(|v| v.as_bytes()),
            Some(&b"true"[..])
        );

        let denied = app(ScriptedLlmClient::replying("{}"))
            .oneshot(preflight("http://evil.test"))
            .await
            .expect("response");
        assert!(denied.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
