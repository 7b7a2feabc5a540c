pub mod clipboard;
pub mod commands;
pub mod error;
pub mod form;
pub mod hooks;
pub mod llm;
pub mod logging;
pub mod palette;
pub mod proxy;
pub mod tui;
pub mod utils;
