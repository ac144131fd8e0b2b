//! Extraction strategy implementations.
//!
//! - [`RoleTaggedStrategy`] - explicit per-message role attributes
//! - [`SelectorStrategy`] - provider CSS selectors, roles inferred later
//! - [`GenericSweep`] - page-wide block sweep for anything else

use scraper::{ElementRef, Html, Selector};
use std::collections::{HashMap, HashSet};

use super::text::element_text;
use super::ExtractionStrategy;
use crate::error::{CaptureError, Result};
use crate::types::{RawBlock, Role, Tier};

/// Tags considered by the generic sweep.
const GENERIC_BLOCK_TAGS: &[&str] = &["p", "li", "pre", "blockquote", "article", "section", "div"];

/// Subtrees the generic sweep never looks inside.
const BOILERPLATE_TAGS: &[&str] = &["nav", "header", "footer", "aside", "script", "style", "noscript"];

fn parse_selector(strategy: &str, selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|_| CaptureError::InvalidSelector {
        strategy: strategy.to_string(),
        selector: selector.to_string(),
    })
}

fn long_enough(text: &str, min_length: usize) -> bool {
    text.chars().count() > min_length
}

// =============================================================================
// SelectorStrategy
// =============================================================================

/// Selects message containers with a CSS selector (group).
///
/// Nested matches are dropped in favour of their outermost matching ancestor,
/// so a selector group never yields the same text twice.
pub struct SelectorStrategy {
    id: String,
    selector: Selector,
    min_length: usize,
}

impl SelectorStrategy {
    pub fn new(id: impl Into<String>, selector: &str, min_length: usize) -> Result<Self> {
        let id = id.into();
        let selector = parse_selector(&id, selector)?;
        Ok(Self {
            id,
            selector,
            min_length,
        })
    }
}

impl ExtractionStrategy for SelectorStrategy {
    fn id(&self) -> &str {
        &self.id
    }

    fn min_length(&self) -> usize {
        self.min_length
    }

    fn extract(&self, document: &Html) -> Vec<RawBlock> {
        let matched: Vec<ElementRef<'_>> = document.select(&self.selector).collect();
        let matched_ids: HashSet<_> = matched.iter().map(|el| el.id()).collect();

        matched
            .into_iter()
            .filter(|el| !el.ancestors().any(|a| matched_ids.contains(&a.id())))
            .map(element_text)
            .filter(|text| long_enough(text, self.min_length))
            .map(RawBlock::new)
            .collect()
    }
}

// =============================================================================
// RoleTaggedStrategy
// =============================================================================

/// Reads messages carrying an explicit role attribute.
///
/// Human and assistant elements are queried separately, which on some pages
/// returns them in a different relative order than the conversation. Each
/// block therefore records its index in the combined, untyped attribute query;
/// the turn assembler sorts on that shared key.
pub struct RoleTaggedStrategy {
    id: String,
    all: Selector,
    human: Selector,
    assistant: Selector,
    content: Option<Selector>,
    min_length: usize,
}

impl RoleTaggedStrategy {
    /// `attribute` holds the role, with `human_value` / `assistant_value` as
    /// its values. `content` narrows each message to its text body.
    pub fn new(
        id: impl Into<String>,
        attribute: &str,
        human_value: &str,
        assistant_value: &str,
        content: Option<&str>,
        min_length: usize,
    ) -> Result<Self> {
        let id = id.into();
        let all = parse_selector(&id, &format!("[{attribute}]"))?;
        let human = parse_selector(&id, &format!("[{attribute}=\"{human_value}\"]"))?;
        let assistant = parse_selector(&id, &format!("[{attribute}=\"{assistant_value}\"]"))?;
        let content = content.map(|c| parse_selector(&id, c)).transpose()?;
        Ok(Self {
            id,
            all,
            human,
            assistant,
            content,
            min_length,
        })
    }

    fn message_text(&self, element: ElementRef<'_>) -> String {
        self.content
            .as_ref()
            .and_then(|content| element.select(content).next())
            .map(element_text)
            .unwrap_or_else(|| element_text(element))
    }
}

impl ExtractionStrategy for RoleTaggedStrategy {
    fn id(&self) -> &str {
        &self.id
    }

    fn min_length(&self) -> usize {
        self.min_length
    }

    fn extract(&self, document: &Html) -> Vec<RawBlock> {
        let positions: HashMap<_, usize> = document
            .select(&self.all)
            .enumerate()
            .map(|(position, el)| (el.id(), position))
            .collect();

        let mut blocks = Vec::new();
        for (role, selector) in [(Role::Human, &self.human), (Role::Assistant, &self.assistant)] {
            for element in document.select(selector) {
                let Some(&position) = positions.get(&element.id()) else {
                    continue;
                };
                let text = self.message_text(element);
                if long_enough(&text, self.min_length) {
                    blocks.push(RawBlock::tagged(text, role, position));
                }
            }
        }
        blocks
    }
}

// =============================================================================
// GenericSweep
// =============================================================================

/// Page-wide sweep over leaf-most block elements.
pub struct GenericSweep {
    selector: Selector,
    min_length: usize,
    max_blocks: usize,
    chrome_phrases: Vec<String>,
}

impl GenericSweep {
    pub const ID: &'static str = "generic.blocks";

    pub fn new(min_length: usize, max_blocks: usize, chrome_phrases: Vec<String>) -> Result<Self> {
        let selector = parse_selector(Self::ID, &GENERIC_BLOCK_TAGS.join(", "))?;
        Ok(Self {
            selector,
            min_length,
            max_blocks,
            chrome_phrases,
        })
    }

    fn is_leaf_block(element: &ElementRef<'_>) -> bool {
        !element.descendants().skip(1).any(|node| {
            node.value()
                .as_element()
                .is_some_and(|e| GENERIC_BLOCK_TAGS.contains(&e.name()))
        })
    }

    fn in_boilerplate(element: &ElementRef<'_>) -> bool {
        element.ancestors().any(|node| {
            node.value()
                .as_element()
                .is_some_and(|e| BOILERPLATE_TAGS.contains(&e.name()))
        })
    }

    fn is_chrome(&self, text: &str) -> bool {
        self.chrome_phrases.iter().any(|p| text.contains(p.as_str()))
    }
}

impl ExtractionStrategy for GenericSweep {
    fn id(&self) -> &str {
        Self::ID
    }

    fn min_length(&self) -> usize {
        self.min_length
    }

    fn tier(&self) -> Tier {
        Tier::Generic
    }

    fn extract(&self, document: &Html) -> Vec<RawBlock> {
        let mut seen = HashSet::new();
        document
            .select(&self.selector)
            .filter(Self::is_leaf_block)
            .filter(|el| !Self::in_boilerplate(el))
            .map(element_text)
            .filter(|text| long_enough(text, self.min_length))
            .filter(|text| !self.is_chrome(text))
            .filter(|text| seen.insert(text.clone()))
            .take(self.max_blocks)
            .map(RawBlock::new)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_selector_is_reported() {
        let err = SelectorStrategy::new("broken", "div[[", 10).err().unwrap();
        assert!(matches!(err, CaptureError::InvalidSelector { .. }));
    }

    #[test]
    fn selector_strategy_drops_short_and_nested_matches() {
        let html = Html::parse_document(
            r#"<div class="msg">Short</div>
               <div class="msg">An outer message that is long enough
                 <div class="msg">nested inner message text</div>
               </div>"#,
        );
        let strategy = SelectorStrategy::new("test", ".msg", 10).unwrap();
        let blocks = strategy.extract(&html);

        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].text.starts_with("An outer message"));
    }

    #[test]
    fn role_tagged_records_combined_positions() {
        let html = Html::parse_document(
            r#"<div data-role="user">What is a borrow checker?</div>
               <div data-role="bot">It enforces ownership rules at compile time.</div>
               <div data-role="user">And lifetimes, how do they work?</div>"#,
        );
        let strategy =
            RoleTaggedStrategy::new("test", "data-role", "user", "bot", None, 10).unwrap();
        let blocks = strategy.extract(&html);

        let summary: Vec<_> = blocks.iter().map(|b| (b.role, b.position)).collect();
        assert_eq!(
            summary,
            vec![
                (Some(Role::Human), Some(0)),
                (Some(Role::Human), Some(2)),
                (Some(Role::Assistant), Some(1)),
            ]
        );
    }

    #[test]
    fn generic_sweep_filters_chrome_and_caps() {
        let mut body = String::from("<p>Skip to main content and other things</p>");
        for i in 0..30 {
            body.push_str(&format!("<p>Paragraph number {i} with plenty of text</p>"));
        }
        let html = Html::parse_document(&format!("<html><body>{body}</body></html>"));
        let sweep = GenericSweep::new(20, 20, vec!["Skip to".to_string()]).unwrap();
        let blocks = sweep.extract(&html);

        assert_eq!(blocks.len(), 20);
        assert!(blocks.iter().all(|b| !b.text.contains("Skip to")));
        assert!(blocks.iter().all(|b| b.text.chars().count() > 20));
    }

    #[test]
    fn generic_sweep_ignores_navigation() {
        let html = Html::parse_document(
            "<html><body><nav><p>A navigation paragraph that is long</p></nav>\
             <main><p>The actual conversation content lives here</p></main></body></html>",
        );
        let sweep = GenericSweep::new(20, 20, vec![]).unwrap();
        let blocks = sweep.extract(&html);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "The actual conversation content lives here");
    }
}
