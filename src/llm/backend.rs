use anyhow::{Context, Result, anyhow};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::responses::{
        CreateResponse, CreateResponseArgs, InputMessage, InputRole, OutputItem,
        OutputMessageContent, Response,
    },
};
use async_trait::async_trait;

use super::client::initialize_client;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.9;

/// A single-shot text completion: system + user prompt in, raw text out.
///
/// Implementations make exactly one upstream call and never retry.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

pub struct OpenAiBackend {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAiBackend {
    pub fn new(api_key: &str, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            client: initialize_client(api_key),
            model: model.into(),
            temperature,
        }
    }

    fn build_request(&self, system_prompt: &str, user_prompt: &str) -> Result<CreateResponse> {
        let message = |role, text: &str| InputMessage {
            role,
            content: vec![text.into()],
            status: None,
        };

        let request = CreateResponseArgs::default()
            .model(self.model.as_str())
            .temperature(self.temperature)
            .input(vec![
                message(InputRole::System, system_prompt),
                message(InputRole::User, user_prompt),
            ])
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = self.build_request(system_prompt, user_prompt)?;

        let response = self
            .client
            .responses()
            .create(request)
            .await
            .with_context(|| format!("Completion request to {} failed", self.model))?;

        first_output_text(response).ok_or_else(|| anyhow!("No text output returned from model"))
    }
}

/// The first non-blank text block of the reply, trimmed.
fn first_output_text(response: Response) -> Option<String> {
    response
        .output
        .into_iter()
        .filter_map(|item| match item {
            OutputItem::Message(message) => Some(message.content),
            _ => None,
        })
        .flatten()
        .find_map(|content| match content {
            OutputMessageContent::OutputText(text) if !text.text.trim().is_empty() => {
                Some(text.text.trim().to_string())
            }
            _ => None,
        })
}
