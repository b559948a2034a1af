//! HTTP handlers for the push gateway

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::dispatch::{DispatchReceipt, DispatcherStatsSnapshot};
use crate::error::Result;
use crate::renderer::render_worker_script;
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub notifications: DispatcherStatsSnapshot,
}

/// Forward one push notification to the provider.
///
/// The body is taken raw rather than through the JSON extractor because
/// callers may double-encode the payload as a JSON string.
#[tracing::instrument(name = "http.send_push", skip(state, body), fields(bytes = body.len()))]
pub async fn send_push(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DispatchReceipt>> {
    let receipt = state.dispatcher.dispatch(&body).await?;
    Ok(Json(receipt))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        notifications: state.dispatcher.stats(),
    })
}

/// Serve the generated messaging service worker. 404 when the web-push
/// section is not configured.
pub async fn service_worker(State(state): State<AppState>) -> Response {
    match &state.settings.web_push {
        Some(web) => (
            [(header::CONTENT_TYPE, "application/javascript")],
            render_worker_script(web),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
