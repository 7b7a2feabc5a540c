//! The request form: inputs, the loading/error/results triple, and the copy
//! actions. Front ends (terminal form, plain command) drive this state.

pub mod client;

pub use client::{HookApi, ProxyClient, default_proxy_url};

use crate::clipboard::{ClipboardWriter, join_hooks};
use crate::error::HookError;
use crate::hooks::{HookRequest, HookResponse, Platform, Tone};
use crate::utils::trim_line;

#[derive(Debug, Default)]
pub struct FormState {
    pub topic: String,
    pub platform: Platform,
    pub tone: Tone,
    loading: bool,
    hooks: Vec<String>,
    error: Option<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn hooks(&self) -> &[String] {
        &self.hooks
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validates the inputs and enters the loading state.
    ///
    /// A blank topic never produces a request.
    pub fn begin(&mut self) -> Result<HookRequest, HookError> {
        if self.loading {
            return Err(HookError::Busy);
        }
        let Some(topic) = trim_line(&self.topic) else {
            let err = HookError::EmptyTopic;
            self.error = Some(err.display_message());
            return Err(err);
        };

        let request = HookRequest {
            topic: topic.to_string(),
            platform: self.platform,
            tone: self.tone,
        };
        self.loading = true;
        self.error = None;
        Ok(request)
    }

    /// Leaves the loading state. Hooks are replaced only on success.
    pub fn finish(
        &mut self,
        outcome: Result<HookResponse, HookError>,
    ) -> Result<usize, HookError> {
        self.loading = false;
        match outcome {
            Ok(response) => {
                self.hooks = response.hooks;
                self.error = None;
                Ok(self.hooks.len())
            }
            Err(err) => {
                self.error = Some(err.display_message());
                Err(err)
            }
        }
    }

    /// One full submission: validate, call once, settle.
    pub async fn generate(&mut self, api: &dyn HookApi) -> Result<usize, HookError> {
        let request = self.begin()?;
        let outcome = api.generate(&request).await;
        self.finish(outcome)
    }

    /// Returns `false` when there is no hook at `index`.
    pub fn copy_hook(
        &self,
        index: usize,
        clipboard: &mut dyn ClipboardWriter,
    ) -> Result<bool, HookError> {
        let Some(hook) = self.hooks.get(index) else {
            return Ok(false);
        };
        clipboard.write_text(hook)?;
        Ok(true)
    }

    /// Returns `false` when there is nothing to copy.
    pub fn copy_all(&self, clipboard: &mut dyn ClipboardWriter) -> Result<bool, HookError> {
        if self.hooks.is_empty() {
            return Ok(false);
        }
        clipboard.write_text(&join_hooks(&self.hooks))?;
        Ok(true)
    }
}
