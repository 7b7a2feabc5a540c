use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Youtube,
    Tiktok,
    Instagram,
    Google,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Youtube,
        Platform::Tiktok,
        Platform::Instagram,
        Platform::Google,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Tiktok => "tiktok",
            Platform::Instagram => "instagram",
            Platform::Google => "google",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Platform::Youtube => "📺",
            Platform::Tiktok => "📱",
            Platform::Instagram => "📸",
            Platform::Google => "🔍",
        }
    }

    pub fn label(self) -> String {
        capitalize(self.key())
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Formal,
    Friendly,
    Casual,
    Professional,
    Diplomatic,
    Confident,
    Middleschool,
    Highschool,
    Academic,
    Simplified,
    Vivid,
    Empathetic,
    Luxury,
    #[default]
    Engaging,
    Direct,
    Persuasive,
}

impl Tone {
    pub const ALL: [Tone; 16] = [
        Tone::Formal,
        Tone::Friendly,
        Tone::Casual,
        Tone::Professional,
        Tone::Diplomatic,
        Tone::Confident,
        Tone::Middleschool,
        Tone::Highschool,
        Tone::Academic,
        Tone::Simplified,
        Tone::Vivid,
        Tone::Empathetic,
        Tone::Luxury,
        Tone::Engaging,
        Tone::Direct,
        Tone::Persuasive,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Tone::Formal => "formal",
            Tone::Friendly => "friendly",
            Tone::Casual => "casual",
            Tone::Professional => "professional",
            Tone::Diplomatic => "diplomatic",
            Tone::Confident => "confident",
            Tone::Middleschool => "middleschool",
            Tone::Highschool => "highschool",
            Tone::Academic => "academic",
            Tone::Simplified => "simplified",
            Tone::Vivid => "vivid",
            Tone::Empathetic => "empathetic",
            Tone::Luxury => "luxury",
            Tone::Engaging => "engaging",
            Tone::Direct => "direct",
            Tone::Persuasive => "persuasive",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Tone::Formal => "👔",
            Tone::Friendly => "🙂",
            Tone::Casual => "😎",
            Tone::Professional => "💼",
            Tone::Diplomatic => "🤝",
            Tone::Confident => "💪",
            Tone::Middleschool => "📕",
            Tone::Highschool => "📗",
            Tone::Academic => "🎓",
            Tone::Simplified => "📖",
            Tone::Vivid => "🦄",
            Tone::Empathetic => "🤗",
            Tone::Luxury => "💎",
            Tone::Engaging => "👍",
            Tone::Direct => "➡️",
            Tone::Persuasive => "🎯",
        }
    }

    pub fn label(self) -> String {
        capitalize(self.key())
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// What the form sends to the proxy. Built fresh for every submission.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HookRequest {
    pub topic: String,
    pub platform: Platform,
    pub tone: Tone,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HookResponse {
    pub hooks: Vec<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: usize) -> T {
    let idx = all.iter().position(|item| *item == current).unwrap_or(0);
    all[(idx + step) % all.len()]
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
