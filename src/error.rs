use thiserror::Error;

pub const GENERIC_ERROR: &str = "An unexpected error occurred";

#[derive(Debug, Error)]
pub enum HookError {
    #[error("Please enter a topic")]
    EmptyTopic,

    #[error("A request is already in progress")]
    Busy,

    #[error("Failed to reach the hook proxy: {0}")]
    Transport(#[from] reqwest::Error),

    /// The proxy answered with a non-2xx status.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("Unexpected response from the hook proxy: {0}")]
    MalformedPayload(String),

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
}

impl HookError {
    pub fn upstream(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Hook proxy returned HTTP {status}"));
        HookError::Upstream { status, message }
    }

    /// Text shown in the form's error panel.
    pub fn display_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_ERROR.to_string()
        } else {
            message
        }
    }
}
