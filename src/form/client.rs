use async_trait::async_trait;

use crate::error::HookError;
use crate::hooks::{ErrorBody, HookRequest, HookResponse};
use crate::proxy::{DEFAULT_ADDR, HOOKS_PATH};

/// Where generation requests go. The form only ever talks to this.
#[async_trait]
pub trait HookApi: Send + Sync {
    async fn generate(&self, request: &HookRequest) -> Result<HookResponse, HookError>;
}

pub fn default_proxy_url() -> String {
    format!("http://{DEFAULT_ADDR}{HOOKS_PATH}")
}

pub struct ProxyClient {
    http: reqwest::Client,
    url: String,
}

impl ProxyClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl HookApi for ProxyClient {
    async fn generate(&self, request: &HookRequest) -> Result<HookResponse, HookError> {
        let response = self.http.post(&self.url).json(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .map(|b| b.error);
            return Err(HookError::upstream(status.as_u16(), message));
        }

        serde_json::from_slice::<HookResponse>(&body)
            .map_err(|e| HookError::MalformedPayload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;
    use crate::hooks::{Platform, Tone};

    fn request() -> HookRequest {
        HookRequest {
            topic: "budget travel".to_string(),
            platform: Platform::Instagram,
            tone: Tone::Friendly,
        }
    }

    #[tokio::test]
    async fn posts_triple_and_reads_hooks() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", HOOKS_PATH)
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "topic": "budget travel",
                "platform": "instagram",
                "tone": "friendly"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"hooks":["One","Two"]}"#)
            .expect(1)
            .create_async()
            .await;

        let client = ProxyClient::new(format!("{}{}", server.url(), HOOKS_PATH));
        let response = client.generate(&request()).await.unwrap();

        assert_eq!(response.hooks, vec!["One", "Two"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_error_surfaces_error_field() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", HOOKS_PATH)
            .with_status(500)
            .with_body(r#"{"error":"Incorrect API key provided"}"#)
            .create_async()
            .await;

        let client = ProxyClient::new(format!("{}{}", server.url(), HOOKS_PATH));
        let err = client.generate(&request()).await.unwrap_err();

        match err {
            HookError::Upstream { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_falls_back_to_status() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", HOOKS_PATH)
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let client = ProxyClient::new(format!("{}{}", server.url(), HOOKS_PATH));
        let err = client.generate(&request()).await.unwrap_err();

        assert_eq!(err.display_message(), "Hook proxy returned HTTP 502");
    }

    #[tokio::test]
    async fn success_without_hooks_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", HOOKS_PATH)
            .with_status(200)
            .with_body(r#"{"items":[]}"#)
            .create_async()
            .await;

        let client = ProxyClient::new(format!("{}{}", server.url(), HOOKS_PATH));
        let err = client.generate(&request()).await.unwrap_err();

        assert!(matches!(err, HookError::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn unreachable_proxy_is_transport_error() {
        let client = ProxyClient::new("http://127.0.0.1:9/generate-hooks");
        let err = client.generate(&request()).await.unwrap_err();
        assert!(matches!(err, HookError::Transport(_)));
    }

    #[test]
    fn default_url_points_at_local_proxy() {
        assert_eq!(default_proxy_url(), "http://127.0.0.1:8787/generate-hooks");
    }
}
