use std::env;

use anyhow::{Result, bail};

use crate::utils::trim_line;

pub const API_KEY_ENV: &str = "HOOKSMITH_OPENAI_API_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Flag,
    Environment,
}

impl ApiKeySource {
    pub fn description(&self) -> &'static str {
        match self {
            ApiKeySource::Flag => "--api-key flag",
            ApiKeySource::Environment => "environment variable",
        }
    }
}

#[derive(Debug)]
pub struct ApiKeyLookup {
    pub api_key: String,
    pub source: ApiKeySource,
}

/// Resolves the OpenAI key once at startup. An explicit flag wins over the
/// environment; blank values count as unset.
pub fn resolve_api_key(flag: Option<&str>) -> Result<ApiKeyLookup> {
    if let Some(key) = flag.and_then(trim_line) {
        return Ok(ApiKeyLookup {
            api_key: key.to_string(),
            source: ApiKeySource::Flag,
        });
    }

    if let Ok(value) = env::var(API_KEY_ENV)
        && let Some(key) = trim_line(&value)
    {
        return Ok(ApiKeyLookup {
            api_key: key.to_string(),
            source: ApiKeySource::Environment,
        });
    }

    bail!(
        "No OpenAI API key configured. Set {} or pass --api-key <KEY>.",
        API_KEY_ENV
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_takes_precedence() {
        let lookup = resolve_api_key(Some("  flag-key ")).unwrap();
        assert_eq!(lookup.api_key, "flag-key");
        assert_eq!(lookup.source, ApiKeySource::Flag);
    }

    #[test]
    fn blank_flag_falls_back_to_environment() {
        unsafe {
            env::set_var(API_KEY_ENV, "env-key");
        }
        let lookup = resolve_api_key(Some("   ")).unwrap();
        assert_eq!(lookup.api_key, "env-key");
        assert_eq!(lookup.source, ApiKeySource::Environment);
        assert_eq!(lookup.source.description(), "environment variable");
    }
}
