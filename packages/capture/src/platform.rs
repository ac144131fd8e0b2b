//! Provider detection from share URLs.
//!
//! Each provider publishes conversations under a fixed share-link shape:
//! a domain, a fixed path segment, and an opaque id. Patterns are anchored and
//! case-insensitive, evaluated in order, first match wins.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// AI chat provider a page belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    ChatGpt,
    Claude,
    Gemini,
    Grok,
    Perplexity,
    Copilot,
    /// Not a recognised share link. Extraction still runs the generic sweep.
    Unknown,
}

impl Platform {
    /// Every recognised provider, in detection order.
    pub const KNOWN: [Platform; 6] = [
        Platform::ChatGpt,
        Platform::Claude,
        Platform::Gemini,
        Platform::Grok,
        Platform::Perplexity,
        Platform::Copilot,
    ];

    /// Human-readable provider name, as written into transcript headers and
    /// thread source labels.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::ChatGpt => "ChatGPT",
            Platform::Claude => "Claude",
            Platform::Gemini => "Gemini",
            Platform::Grok => "Grok",
            Platform::Perplexity => "Perplexity",
            Platform::Copilot => "Copilot",
            Platform::Unknown => "Unknown",
        }
    }

    /// `false` for [`Platform::Unknown`] ("platform not supported").
    pub fn is_supported(&self) -> bool {
        !matches!(self, Platform::Unknown)
    }

    /// Reverse of [`Platform::display_name`], case-insensitive.
    pub fn from_display_name(name: &str) -> Self {
        let name = name.trim();
        Self::KNOWN
            .into_iter()
            .find(|p| p.display_name().eq_ignore_ascii_case(name))
            .unwrap_or(Platform::Unknown)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

lazy_static! {
    /// Ordered (platform, pattern) table.
    static ref SHARE_PATTERNS: Vec<(Platform, Regex)> = vec![
        (
            Platform::ChatGpt,
            share_pattern(r"(?:chatgpt\.com|chat\.openai\.com)/share"),
        ),
        (Platform::Claude, share_pattern(r"claude\.ai/share")),
        (
            Platform::Gemini,
            share_pattern(r"(?:gemini\.google\.com/share|g\.co/gemini/share)"),
        ),
        (Platform::Grok, share_pattern(r"grok\.com/share")),
        (
            Platform::Perplexity,
            share_pattern(r"(?:www\.)?perplexity\.ai/search"),
        ),
        (
            Platform::Copilot,
            share_pattern(r"copilot\.microsoft\.com/shares"),
        ),
    ];
}

/// Build an anchored, case-insensitive share-link pattern for
/// `https://<host_and_segment>/<opaque-id>`, tolerating a trailing query or
/// fragment.
fn share_pattern(host_and_segment: &str) -> Regex {
    let pattern = format!(r"(?i)^https?://{host_and_segment}/[A-Za-z0-9_-]+/?(?:[?#].*)?$");
    // Patterns are compile-time constants; a failure here is a programming error.
    Regex::new(&pattern).expect("share pattern must compile")
}

/// Classify a URL into a known provider or [`Platform::Unknown`].
pub fn detect_platform(url: &str) -> Platform {
    let url = url.trim();
    SHARE_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(url))
        .map(|(platform, _)| *platform)
        .unwrap_or(Platform::Unknown)
}
