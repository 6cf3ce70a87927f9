// Router wiring for the dashboard endpoints
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{dashboard_page, graph_svg, health_check, not_found};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// Compression is applied per response in the handlers, so no CompressionLayer here.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/index.html", get(dashboard_page))
        .route("/graph.svg", get(graph_svg))
        .route("/healthz", get(health_check))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
