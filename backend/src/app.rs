//! Router assembly
//!
//! Wires the API handlers, the static client fallback, and the request
//! middleware into a single `Router`.

use crate::api;
use crate::state::AppState;
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::time::Instant;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Request ID middleware - adds unique ID to each request for tracing
async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    let response = next.run(request).instrument(span).await;

    let duration = start.elapsed();
    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status().as_u16(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}

/// Routes under `/api`
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/assignments", get(api::assignments::list_assignments))
        .route("/assign", post(api::assignments::assign))
        .route("/clear", post(api::assignments::clear))
        .route("/health", get(api::health::health_check))
        .fallback(api::api_not_found)
}

/// Build the application router
///
/// # Arguments
/// * `state` - Shared handler state
/// * `static_dir` - Directory holding the client application; any
///   non-API path that is not a file in it resolves to `index.html`
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    let client = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .nest("/api", api_routes())
        .fallback_service(client)
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
