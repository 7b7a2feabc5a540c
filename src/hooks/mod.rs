pub mod parse;
pub mod request;

pub use parse::{MAX_HOOKS, parse_hooks};
pub use request::{ErrorBody, HookRequest, HookResponse, Platform, Tone};
