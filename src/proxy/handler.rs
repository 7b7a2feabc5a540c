use std::sync::Arc;

use anyhow::{Result, anyhow};
use axum::{
    Json,
    body::{Body, to_bytes},
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info};

use crate::hooks::{ErrorBody, HookRequest, HookResponse, parse_hooks};
use crate::llm::CompletionBackend;
use crate::llm::prompt::{system_prompt, user_prompt};

/// Request bodies above this size are answered with 500 `{error}`.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared by every request; nothing in here is mutable.
#[derive(Clone)]
pub struct ProxyState {
    pub backend: Arc<dyn CompletionBackend>,
}

/// Preflight: empty body, the CORS headers come from the router layers.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn generate_hooks(State(state): State<ProxyState>, body: Body) -> Response {
    match run_generation(state.backend.as_ref(), body).await {
        Ok(hooks) => {
            info!(count = hooks.len(), "returning hooks");
            (StatusCode::OK, Json(HookResponse { hooks })).into_response()
        }
        Err(err) => {
            error!(error = %format_args!("{err:#}"), "hook generation failed");
            // clients only see the underlying failure, not our context
            let message = err.root_cause().to_string();
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody { error: message }),
            )
                .into_response()
        }
    }
}

async fn run_generation(backend: &dyn CompletionBackend, body: Body) -> Result<Vec<String>> {
    let body = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|err| anyhow!("Failed to read request body: {err}"))?;
    let request: HookRequest = serde_json::from_slice(&body)?;
    info!(platform = %request.platform, tone = %request.tone, "generating hooks");

    let raw = backend
        .complete(
            &system_prompt(request.platform, request.tone),
            &user_prompt(&request),
        )
        .await?;

    Ok(parse_hooks(&raw))
}
