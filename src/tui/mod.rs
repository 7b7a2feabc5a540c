pub mod input;
pub mod theme;

pub use input::TextInput;
pub use theme::Theme;
