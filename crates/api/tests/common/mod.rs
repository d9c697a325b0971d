//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the application router through the same [`build_app_router`]
//! used by `main.rs`, so tests exercise the production middleware stack.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use calcsite_api::config::ServerConfig;
use calcsite_api::router::build_app_router;
use calcsite_api::state::AppState;
use calcsite_api::translate::{
    TranslateError, TranslationBackend, TranslationJob, TranslatedContent,
};
use calcsite_core::messages::MessageStore;

/// Build a test `ServerConfig` with safe defaults.
///
/// The message directory points at the workspace `messages/` bundles so the
/// candidate pool resolves real static-calculator titles.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        messages_dir: "../../messages".to_string(),
        translator_url: None,
        translator_timeout_secs: 30,
    }
}

/// Scripted translation backend: returns a fixed German-ish payload that
/// omits the body, exercising the fall-back-to-source path.
pub struct EchoTranslator;

#[async_trait]
impl TranslationBackend for EchoTranslator {
    async fn translate(&self, job: &TranslationJob) -> Result<TranslatedContent, TranslateError> {
        Ok(TranslatedContent {
            title: Some(format!("[{}] {}", job.target_locale, job.title)),
            description: job.description.clone(),
            body: None,
            faq_items: None,
        })
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a scripted translation backend.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        messages: Arc::new(MessageStore::new(&config.messages_dir)),
        translator: Arc::new(EchoTranslator),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a response is an error with the given status and `code` field.
pub async fn assert_error(response: Response<Body>, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code, "unexpected error body: {json}");
}
