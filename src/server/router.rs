use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::handlers::{chat, faqs, health};
use crate::state::AppState;

/// Browser origins allowed when `server.cors_allowed_origins` is empty:
/// the usual local frontend dev servers.
const LOCAL_DEV_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

/// HTTP surface of the support assistant.
///
/// - `GET /api/health`
/// - `POST /api/chat`
/// - `GET /api/faqs`
pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.settings.server.cors_allowed_origins);
    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/chat", post(chat::chat))
        .route("/api/faqs", get(faqs::list_faqs))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(configured: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = if configured.is_empty() {
        LOCAL_DEV_ORIGINS
            .into_iter()
            .map(HeaderValue::from_static)
            .collect()
    } else {
        configured
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Skipping invalid CORS origin {:?}", origin);
                    None
                }
            })
            .collect()
    };

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE])
}
