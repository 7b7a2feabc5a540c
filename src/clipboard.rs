use arboard::Clipboard;

use crate::error::HookError;

/// Write-only clipboard access.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), HookError>;
}

/// How long copied text must outlive the writer.
///
/// On X11 and Wayland the copying process serves the clipboard itself, so
/// the text disappears when the process exits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Ownership {
    /// The process keeps running (the terminal form); a plain set is enough.
    Session,
    /// The process exits right after copying; setting blocks until another
    /// program (usually a clipboard manager) takes the selection over.
    Handoff,
}

impl Ownership {
    pub fn blocks_on_set(self) -> bool {
        self == Ownership::Handoff && cfg!(target_os = "linux")
    }
}

pub struct ArboardClipboard {
    clipboard: Clipboard,
    ownership: Ownership,
}

impl ArboardClipboard {
    pub fn new(ownership: Ownership) -> Result<Self, HookError> {
        let clipboard = Clipboard::new().map_err(|e| HookError::Clipboard(e.to_string()))?;
        Ok(Self {
            clipboard,
            ownership,
        })
    }
}

impl ClipboardWriter for ArboardClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), HookError> {
        let result = match self.ownership {
            Ownership::Session => self.clipboard.set_text(text),
            Ownership::Handoff => set_and_wait(&mut self.clipboard, text),
        };
        result.map_err(|e| HookError::Clipboard(e.to_string()))
    }
}

#[cfg(target_os = "linux")]
fn set_and_wait(clipboard: &mut Clipboard, text: &str) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    clipboard.set().wait().text(text)
}

#[cfg(not(target_os = "linux"))]
fn set_and_wait(clipboard: &mut Clipboard, text: &str) -> Result<(), arboard::Error> {
    clipboard.set_text(text)
}

/// All hooks in display order, separated by a blank line.
pub fn join_hooks(hooks: &[String]) -> String {
    hooks.join("\n\n")
}
