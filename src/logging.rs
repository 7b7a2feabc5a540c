use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const DEFAULT_FILTER: &str = "hooksmith=info,tower_http=warn";

/// Installs the global subscriber for the proxy. `RUST_LOG` overrides the
/// default filter.
pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::builder().parse(DEFAULT_FILTER))
        .context("Invalid log filter")?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
