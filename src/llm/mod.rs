pub mod backend;
pub mod client;
pub mod prompt;
pub mod secrets;

pub use backend::{CompletionBackend, DEFAULT_MODEL, DEFAULT_TEMPERATURE, OpenAiBackend};
pub use client::test_configured_api_key;
pub use secrets::{API_KEY_ENV, resolve_api_key};
