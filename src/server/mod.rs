//! Local web UI.
//!
//! Routes:
//! - `GET /`           dashboard page
//! - `GET /api/chart`  chart refresh (Plotly figure JSON, rebuilt per request)
//! - `POST /api/hover` hover event -> panel text
//! - `GET /chart.svg`  static rendering of the same chart
//! - `GET /health`     liveness + dataset counts
//!
//! The dataset is loaded before the router exists and shared read-only
//! through axum `State`; handlers never mutate it.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::chart::{Figure, build_chart, render_svg, svg};
use crate::data::Dataset;
use crate::error::AppError;
use crate::hover::{HoverEvent, HoverResponse, resolve_hover};

pub mod page;

pub fn router(dataset: Arc<Dataset>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/chart", get(chart))
        .route("/api/hover", post(hover))
        .route("/chart.svg", get(chart_svg))
        .route("/health", get(health))
        .with_state(dataset)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(dataset: Arc<Dataset>, bind: &str) -> Result<(), AppError> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| AppError::io(format!("Failed to bind '{bind}': {e}")))?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| AppError::io(format!("Failed to read bound address: {e}")))?;

    info!(url = %format!("http://{local_addr}/"), "dashboard ready");

    axum::serve(listener, router(dataset))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::io(format!("Server error: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

async fn index() -> Html<&'static str> {
    Html(page::INDEX_HTML)
}

async fn chart(State(dataset): State<Arc<Dataset>>) -> Json<Figure> {
    let spec = build_chart(&dataset.series, &dataset.events);
    debug!(traces = spec.trace_count(), "chart refreshed");
    Json(spec.to_figure())
}

async fn hover(State(dataset): State<Arc<Dataset>>, body: Bytes) -> Json<HoverResponse> {
    let response = match decode_hover(&body) {
        Ok(event) => resolve_hover(event.as_ref(), &dataset.events),
        Err(e) => {
            warn!(error = %e, "undecodable hover event");
            HoverResponse::placeholder_with(format!("Invalid hover event: {e}"))
        }
    };
    Json(response)
}

/// An empty body or JSON `null` means "no hover".
fn decode_hover(body: &[u8]) -> Result<Option<HoverEvent>, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
}

async fn chart_svg(State(dataset): State<Arc<Dataset>>) -> Response {
    let spec = build_chart(&dataset.series, &dataset.events);
    match render_svg(&spec, svg::DEFAULT_WIDTH, svg::DEFAULT_HEIGHT) {
        Ok(svg) => ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response(),
        Err(err) => {
            error!(error = %err, "chart render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

async fn health(State(dataset): State<Arc<Dataset>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "events": dataset.events.len(),
        "observations": dataset.series.len(),
    }))
}
