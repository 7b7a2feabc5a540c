//! HTTP proxy between the form and the completion API.
//!
//! One route, `/generate-hooks`:
//! - `OPTIONS` answers CORS preflight with an empty body
//! - `POST {topic, platform, tone}` answers `200 {hooks}` or `500 {error}`
//!
//! Every response carries the permissive CORS headers.

pub mod handler;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    http::{HeaderValue, header},
    routing::post,
};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;

use crate::llm::{CompletionBackend, DEFAULT_MODEL, DEFAULT_TEMPERATURE, OpenAiBackend};
use handler::{ProxyState, generate_hooks, preflight};

pub const HOOKS_PATH: &str = "/generate-hooks";
pub const DEFAULT_ADDR: &str = "127.0.0.1:8787";

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";
pub const ALLOW_METHODS: &str = "POST, OPTIONS";

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub addr: SocketAddr,
}

impl ProxyConfig {
    pub fn new(api_key: String, addr: SocketAddr) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            addr,
        }
    }
}

pub fn router(backend: Arc<dyn CompletionBackend>) -> Router {
    Router::new()
        .route(HOOKS_PATH, post(generate_hooks).options(preflight))
        .with_state(ProxyState { backend })
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
}

pub async fn serve(config: ProxyConfig) -> Result<()> {
    let backend: Arc<dyn CompletionBackend> = Arc::new(OpenAiBackend::new(
        &config.api_key,
        config.model.as_str(),
        config.temperature,
    ));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    let addr = listener.local_addr()?;

    info!(model = %config.model, "hook proxy listening on http://{addr}{HOOKS_PATH}");

    axum::serve(listener, router(backend))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("shutting down");
        })
        .await
        .context("Hook proxy failed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use anyhow::anyhow;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::hooks::{ErrorBody, HookResponse};
    use handler::MAX_BODY_BYTES;

    struct CannedBackend {
        reply: Result<String, String>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl CannedBackend {
        fn ok(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message.to_string()),
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionBackend for CannedBackend {
        async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((system_prompt.to_string(), user_prompt.to_string()));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(message) => {
                    Err(anyhow!("{message}")).context("Completion request to test-model failed")
                }
            }
        }
    }

    fn post_hooks(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(HOOKS_PATH)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn assert_cors(response: &axum::response::Response) {
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], ALLOW_ORIGIN);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], ALLOW_HEADERS);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], ALLOW_METHODS);
    }

    #[tokio::test]
    async fn preflight_has_no_body_and_cors_headers() {
        let backend = CannedBackend::ok("unused");
        let request = Request::builder()
            .method("OPTIONS")
            .uri(HOOKS_PATH)
            .body(Body::empty())
            .unwrap();

        let response = router(backend.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
        assert!(backend.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn post_returns_parsed_hooks() {
        let backend =
            CannedBackend::ok("1. Hook A\n2. Hook B\n\n3. Hook C\n4. Hook D\n5. Hook E\n6. Hook F");

        let response = router(backend.clone())
            .oneshot(post_hooks(
                r#"{"topic":"morning routines","platform":"tiktok","tone":"casual"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: HookResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            parsed.hooks,
            vec!["Hook A", "Hook B", "Hook C", "Hook D", "Hook E"]
        );

        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (system, user) = &calls[0];
        assert!(system.contains("(tiktok) and tone (casual)"));
        assert_eq!(
            user,
            "Generate 5 hooks for topic: morning routines. Platform: tiktok. Tone: casual"
        );
    }

    #[tokio::test]
    async fn upstream_failure_returns_root_message_only() {
        let backend = CannedBackend::failing("rate limited");

        let response = router(backend)
            .oneshot(post_hooks(
                r#"{"topic":"x","platform":"google","tone":"formal"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(&response);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: ErrorBody = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.error, "rate limited");
    }

    #[tokio::test]
    async fn undecodable_body_is_500_without_calling_backend() {
        let backend = CannedBackend::ok("1. never");

        let response = router(backend.clone())
            .oneshot(post_hooks(r#"{"topic":"x","platform":"vine","tone":"formal"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: ErrorBody = serde_json::from_slice(&body).unwrap();
        assert!(parsed.error.contains("vine"));
        assert!(backend.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_completion_returns_empty_list() {
        let backend = CannedBackend::ok("\n\n");

        let response = router(backend)
            .oneshot(post_hooks(
                r#"{"topic":"x","platform":"youtube","tone":"vivid"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: HookResponse = serde_json::from_slice(&body).unwrap();
        assert!(parsed.hooks.is_empty());
    }

    #[tokio::test]
    async fn oversized_body_is_500_with_error_field() {
        let backend = CannedBackend::ok("1. never");
        let topic = "x".repeat(MAX_BODY_BYTES + 1);
        let body = format!(r#"{{"topic":"{topic}","platform":"youtube","tone":"direct"}}"#);

        let response = router(backend.clone())
            .oneshot(post_hooks(&body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(&response);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: ErrorBody = serde_json::from_slice(&body).unwrap();
        assert!(parsed.error.starts_with("Failed to read request body"));
        assert!(backend.calls.lock().unwrap().is_empty());
    }
}
