//! Page fixtures for tests.
//!
//! Builds small provider-shaped HTML documents so tests can exercise the
//! capture pipeline without network access.

use crate::types::Role;

/// Builder for a ChatGPT-style share page with role attributes.
#[derive(Default)]
pub struct ChatGptPage {
    messages: Vec<(Role, String)>,
    chrome: Vec<String>,
}

impl ChatGptPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn human(mut self, text: impl Into<String>) -> Self {
        self.messages.push((Role::Human, text.into()));
        self
    }

    pub fn assistant(mut self, text: impl Into<String>) -> Self {
        self.messages.push((Role::Assistant, text.into()));
        self
    }

    /// Add a UI chrome element (button row, footer link) to the page.
    pub fn chrome(mut self, text: impl Into<String>) -> Self {
        self.chrome.push(text.into());
        self
    }

    pub fn build(&self) -> String {
        let mut body = String::new();
        for chrome in &self.chrome {
            body.push_str(&format!("<div class=\"toolbar\"><span>{chrome}</span></div>\n"));
        }
        for (i, (role, text)) in self.messages.iter().enumerate() {
            let attr = match role {
                Role::Human => "user",
                Role::Assistant => "assistant",
            };
            body.push_str(&format!(
                "<article data-testid=\"conversation-turn-{i}\">\
                 <div data-message-author-role=\"{attr}\">\
                 <div class=\"markdown\">{}</div></div></article>\n",
                paragraphs(text)
            ));
        }
        page(&body)
    }
}

/// A page with no provider markup, only ordinary paragraphs.
pub fn plain_page(paragraphs_text: &[&str]) -> String {
    let body: String = paragraphs_text
        .iter()
        .map(|p| format!("<p>{p}</p>\n"))
        .collect();
    page(&format!("<main>{body}</main>"))
}

/// A page built from messages matched by a CSS class, no role attributes.
pub fn class_page(class: &str, messages: &[&str]) -> String {
    let body: String = messages
        .iter()
        .map(|m| format!("<div class=\"{class}\">{}</div>\n", paragraphs(m)))
        .collect();
    page(&body)
}

fn paragraphs(text: &str) -> String {
    text.lines().map(|l| format!("<p>{l}</p>")).collect()
}

fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Shared conversation</title></head>\
         <body>{body}</body></html>"
    )
}
