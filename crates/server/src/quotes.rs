//! Quote generation endpoints.
//!
//! - `POST /api/generate-quote`: generate proposal content for a quote request
//! - `GET  /`: static service metadata

use anclora_core::{ApplicationError, InterfaceError, QuoteRequest, QuoteResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug)]
pub struct ApiError(pub InterfaceError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorBody { detail: self.0.message().to_string() })).into_response()
    }
}

fn reject(error: ApplicationError, correlation_id: &str) -> ApiError {
    let interface = error.into_interface(correlation_id);
    warn!(
        event_name = "server.quote.rejected",
        correlation_id = interface.correlation_id(),
        status = interface.status_code(),
        error = %interface,
        "quote request failed"
    );
    ApiError(interface)
}

pub async fn generate_quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let correlation_id = Uuid::new_v4().simple().to_string();
    info!(
        event_name = "server.quote.received",
        correlation_id = %correlation_id,
        client_name = %request.client_name,
        services = request.services.len(),
        "quote generation requested"
    );

    request
        .validate()
        .map_err(|error| reject(ApplicationError::from(error), &correlation_id))?;

    let response = state
        .generator
        .generate_quote(&request, &correlation_id)
        .await
        .map_err(|error| reject(error, &correlation_id))?;

    Ok(Json(response))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub endpoints: [&'static str; 3],
}

pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "Anclora AI Service",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ["GET /", "GET /health", "POST /api/generate-quote"],
    })
}
