use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, error, warn};

use crate::config::Environment;
use crate::errors::AppError;
use crate::models::{EnvReport, ErrorResponse, GenerateResponse};
use crate::routes::AppState;
use crate::service::dispatch_service::parse_request;

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST `/api/generate` — validates the envelope, runs one generation call
/// and returns `{ "result": ... }`.
pub async fn generate_handler(State(state): State<AppState>, body: Bytes) -> Response {
    debug!("Raw request body: {}", String::from_utf8_lossy(&body));

    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(err) => {
            warn!("Rejected generate request: {err}");
            return error_response(&err, state.config.environment);
        }
    };

    match state.dispatch.dispatch(request).await {
        Ok(outcome) => Json(GenerateResponse { result: outcome.into_text() }).into_response(),
        Err(err) => {
            error!("Generation request failed: {err}");
            error_response(&err, state.config.environment)
        }
    }
}

/// GET `/api/env-test` — reports whether the API key is configured, masked.
pub async fn env_test_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(EnvReport {
        api_key_defined: state.config.api_key.is_some(),
        api_key_preview: state.config.api_key_preview(),
        environment: state.config.environment.to_string(),
    })
}

// ── Helper ────────────────────────────────────────────────────────────────────

fn error_response(err: &AppError, environment: Environment) -> Response {
    let status = err.status_code();
    let body = if status == StatusCode::BAD_REQUEST {
        ErrorResponse::message(err.to_string())
    } else {
        ErrorResponse {
            error: "Failed to process request".to_string(),
            details: Some(err.to_string()),
            stack: environment.is_development().then(|| error_chain(err)),
        }
    };
    (status, Json(body)).into_response()
}

fn error_chain(err: &AppError) -> String {
    let mut chain = format!("{err:?}");
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        chain.push_str(&format!("\nCaused by: {cause}"));
        source = cause.source();
    }
    chain
}
