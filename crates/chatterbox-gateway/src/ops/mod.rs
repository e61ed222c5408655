//! Plain HTTP endpoints.
//!
//! - `/`        : demo page
//! - `/healthz` : liveness
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::app_state::AppState;

/// Built-in page used when no `server.index_html` is configured.
pub const INDEX_HTML: &str = include_str!("../../static/index.html");

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let Some(path) = state.cfg().server.index_html.as_deref() else {
        return Html(INDEX_HTML.to_string());
    };
    match tokio::fs::read_to_string(path).await {
        Ok(page) => Html(page),
        Err(e) => {
            tracing::warn!(path, error = %e, "index page unreadable, serving built-in page");
            Html(INDEX_HTML.to_string())
        }
    }
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.metrics().render(&state.metrics_extra());

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
