use anyhow::{Context, Result};
use async_openai::{Client, config::OpenAIConfig};

use super::secrets::{ApiKeySource, resolve_api_key};

pub fn initialize_client(api_key: &str) -> Client<OpenAIConfig> {
    let config = OpenAIConfig::new().with_api_key(api_key);
    Client::with_config(config)
}

/// Checks the configured key against the models endpoint.
pub async fn test_configured_api_key(flag: Option<&str>) -> Result<ApiKeySource> {
    let lookup = resolve_api_key(flag)?;
    let client = initialize_client(&lookup.api_key);
    healthcheck_client(&client).await?;
    Ok(lookup.source)
}

async fn healthcheck_client(client: &Client<OpenAIConfig>) -> Result<()> {
    client
        .models()
        .list()
        .await
        .context("Failed to validate API key with OpenAI")?;
    Ok(())
}
