// HTTP request handlers
use crate::infrastructure::http_response::{accepts_brotli, markup_response, HTML, SVG};
use crate::infrastructure::svg_writer::drawing_to_svg;
use crate::presentation::app_state::AppState;
use crate::presentation::pages::{render_dashboard_page, render_error_page};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Full dashboard page: metrics bar plus the 24-hour power graph
pub async fn dashboard_page(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = accepts_brotli(&headers);
    let service = &state.dashboard_service;
    let config = service.config();
    let now = Utc::now();

    let (body, status) = match service.fetch_dashboard(now).await {
        Ok(data) => {
            let svg = drawing_to_svg(&service.render_chart(&data.history, now));
            let page = render_dashboard_page(&data, &svg, &config.display, &config.timezone);
            (page, StatusCode::OK)
        }
        Err(e) => {
            tracing::error!("Error fetching dashboard data: {}", e);
            let page = render_error_page(&e, now, &config.display, &config.timezone);
            (page, StatusCode::SERVICE_UNAVAILABLE)
        }
    };

    match markup_response(body, HTML, status, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Standalone power graph
pub async fn graph_svg(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = accepts_brotli(&headers);
    let service = &state.dashboard_service;
    let now = Utc::now();

    match service.fetch_history(now).await {
        Ok(history) => {
            let svg = drawing_to_svg(&service.render_chart(&history, now));
            match markup_response(svg, SVG, StatusCode::OK, compress).await {
                Ok(response) => response,
                Err(status) => status.into_response(),
            }
        }
        Err(e) => {
            tracing::error!("Error fetching graph history: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("Graph unavailable: {}", e),
            )
                .into_response()
        }
    }
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
