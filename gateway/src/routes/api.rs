use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use http::{HeaderValue, Method, header::CONTENT_TYPE};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers::{api, chat, speech};
use crate::state::AppState;

/// Create the API router
///
/// Each endpoint accepts POST, answers OPTIONS with 200 and rejects every
/// other method with a JSON 405.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/speech-to-text",
            post(speech::speech_to_text)
                .options(api::preflight)
                .fallback(api::method_not_allowed),
        )
        .route(
            "/api/chat",
            post(chat::chat_completion)
                .options(api::preflight)
                .fallback(api::method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
}

/// CORS from the configured origins: `*`, a comma-separated list, or
/// same-origin only when unset.
pub fn cors_layer(origins: Option<&str>) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    match origins.map(str::trim) {
        Some("*") => base.allow_origin(Any),
        Some(list) => {
            let origins: Vec<HeaderValue> = list
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            base.allow_origin(origins)
        }
        None => {
            info!(
                "CORS not configured, defaulting to same-origin only. \
                 Set CORS_ALLOWED_ORIGINS to enable cross-origin access."
            );
            base
        }
    }
}

/// Full application: health check, API routes, CORS, security headers and
/// the request body limit.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(state.config.cors_allowed_origins.as_deref());
    let body_limit = state.config.max_request_body_bytes;

    let security_headers = tower::ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            http::header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    Router::new()
        .route("/", get(api::health_check))
        .merge(create_api_router())
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(security_headers)
}
