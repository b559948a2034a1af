//! Router-level tests
//!
//! Drive the full axum app through `tower::ServiceExt::oneshot` and assert
//! on status codes and response bodies.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use fcm_push_gateway::config::{ApiConfig, Settings, WebPushConfig};
use fcm_push_gateway::dispatch::PushDispatcher;
use fcm_push_gateway::provider::MockProvider;
use fcm_push_gateway::server::{create_app, AppState};

fn app_with(settings: Settings, provider: Arc<MockProvider>) -> axum::Router {
    let dispatcher = Arc::new(PushDispatcher::with_provider(
        Arc::new(settings.clone()),
        provider,
    ));
    create_app(AppState::with_dispatcher(settings, dispatcher))
}

fn send_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/push/send")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn send_returns_receipt() {
    let app = app_with(Settings::default(), Arc::new(MockProvider::new()));

    let body = json!({"token": "T1", "title": "Hi", "body": "Hello"}).to_string();
    let response = app.oneshot(send_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Push notification sent successfully");
    assert_eq!(json["messageId"], "projects/test/messages/1");
}

#[tokio::test]
async fn missing_field_returns_400() {
    let app = app_with(Settings::default(), Arc::new(MockProvider::new()));

    let body = json!({"title": "Hi", "body": "Hello"}).to_string();
    let response = app.oneshot(send_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["success"], false);
    let message = json["message"].as_str().unwrap();
    assert!(message.contains("token"));
}

#[tokio::test]
async fn malformed_payload_returns_400() {
    let app = app_with(Settings::default(), Arc::new(MockProvider::new()));

    let response = app.oneshot(send_request("{")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn provider_failure_returns_500_with_message() {
    let app = app_with(
        Settings::default(),
        Arc::new(MockProvider::failing("Requested entity was not found.")),
    );

    let body = json!({"token": "T1", "title": "Hi", "body": "Hello"}).to_string();
    let response = app.oneshot(send_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = response_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Requested entity was not found.");
}

#[tokio::test]
async fn configured_api_key_is_enforced() {
    let settings = Settings {
        api: ApiConfig {
            key: Some("secret".to_string()),
        },
        ..Settings::default()
    };
    let provider = Arc::new(MockProvider::new());
    let body = json!({"token": "T1", "title": "Hi", "body": "Hello"}).to_string();

    let response = app_with(settings.clone(), provider.clone())
        .oneshot(send_request(&body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(provider.sent_count(), 0);

    let mut request = send_request(&body);
    request
        .headers_mut()
        .insert("X-API-Key", "secret".parse().unwrap());
    let response = app_with(settings, provider.clone())
        .oneshot(request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(provider.sent_count(), 1);
}

#[tokio::test]
async fn health_reports_status_and_version() {
    let app = app_with(Settings::default(), Arc::new(MockProvider::new()));

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn stats_count_dispatches() {
    let app = app_with(Settings::default(), Arc::new(MockProvider::new()));

    let body = json!({"token": "T1", "title": "Hi", "body": "Hello"}).to_string();
    let response = app
        .clone()
        .oneshot(send_request(&body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder()
        .uri("/stats")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let json = response_json(response).await;
    assert_eq!(json["notifications"]["dispatched"], 1);
    assert_eq!(json["notifications"]["delivered"], 1);
}

#[tokio::test]
async fn service_worker_requires_web_push_config() {
    let app = app_with(Settings::default(), Arc::new(MockProvider::new()));

    let request = Request::builder()
        .uri("/firebase-messaging-sw.js")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn service_worker_embeds_web_push_config() {
    let web_push: WebPushConfig = serde_json::from_value(json!({
        "api_key": "k",
        "auth_domain": "tea-serve.firebaseapp.com",
        "project_id": "tea-serve",
        "storage_bucket": "tea-serve.appspot.com",
        "messaging_sender_id": "123",
        "app_id": "1:123:web:abc"
    }))
    .unwrap();
    let settings = Settings {
        web_push: Some(web_push),
        ..Settings::default()
    };
    let app = app_with(settings, Arc::new(MockProvider::new()));

    let request = Request::builder()
        .uri("/firebase-messaging-sw.js")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("application/javascript")
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let script = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(script.contains("tea-serve"));
    assert!(script.contains("setBackgroundMessageHandler"));
}
