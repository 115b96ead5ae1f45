mod agent;
mod config;
mod errors;
mod models;
mod routes;
mod service;

use std::sync::Arc;

use tracing::{info, warn};

use crate::agent::GeminiAgent;
use crate::config::AppConfig;
use crate::routes::{router, AppState};
use crate::service::dispatch_service::DispatchService;
use crate::service::generation_service::GenerationService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "case_gateway=debug,tower_http=debug".into()),
        )
        .init();

    // ── Configuration ─────────────────────────────────────────────────────────
    let config = AppConfig::from_env();
    info!(
        "Starting in {} mode with model {}",
        config.environment, config.model
    );
    if config.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; generation requests will return fallback text");
    }

    // ── Dependency wiring ─────────────────────────────────────────────────────
    let agent = GeminiAgent::new(config.api_key.as_deref(), &config.model, &config.base_url);
    let generation = GenerationService::new(Arc::new(agent));
    let state = AppState {
        dispatch: DispatchService::new(generation),
        config: Arc::new(config),
    };

    // ── Router ────────────────────────────────────────────────────────────────
    let addr = format!("0.0.0.0:{}", state.config.port);
    let app = router(state);

    // ── Listen ────────────────────────────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
