use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::server::{api_key_auth, AppState};

use super::handlers::{health, send_push, service_worker, stats};

pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health & Stats
        .route("/health", get(health))
        .route("/stats", get(stats))
        // Web client service worker
        .route("/firebase-messaging-sw.js", get(service_worker))
        // Dispatch endpoint
        .nest(
            "/api/v1",
            Router::new()
                .route("/push/send", post(send_push))
                .route_layer(middleware::from_fn_with_state(state, api_key_auth)),
        )
}
