use std::net::SocketAddr;

use anyhow::Result;
use tracing::info;

use crate::llm::resolve_api_key;
use crate::logging::init_logging;
use crate::proxy::{self, ProxyConfig};

pub async fn run(addr: SocketAddr, api_key: Option<String>, model: Option<String>) -> Result<()> {
    init_logging()?;

    let lookup = resolve_api_key(api_key.as_deref())?;
    info!("using OpenAI API key from the {}", lookup.source.description());

    let mut config = ProxyConfig::new(lookup.api_key, addr);
    if let Some(model) = model {
        config.model = model;
    }

    proxy::serve(config).await
}
