pub mod api_routes;

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, routing::post, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::AppConfig;
use crate::service::dispatch_service::DispatchService;
use api_routes::{env_test_handler, generate_handler};

#[derive(Clone)]
pub struct AppState {
    pub dispatch: DispatchService,
    pub config: Arc<AppConfig>,
}

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);

    let app = Router::new()
        .route("/api/generate", post(generate_handler))
        // Path used by dashboard builds that predate `/api/generate`
        .route("/api/gemini", post(generate_handler))
        .route("/api/env-test", get(env_test_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    match cors {
        Some(layer) => app.layer(layer),
        None => app,
    }
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {o}");
                None
            }
        })
        .collect();
    if allowed.is_empty() {
        return None;
    }
    Some(
        CorsLayer::new()
            .allow_origin(allowed)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]),
    )
}
