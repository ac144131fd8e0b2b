//! Per-provider strategy chains.
//!
//! Provider markup is undocumented and changes without notice, so each chain
//! keeps older selectors behind newer ones instead of replacing them.

use super::strategies::{GenericSweep, RoleTaggedStrategy, SelectorStrategy};
use super::{ExtractionStrategy, StrategyChain};
use crate::error::Result;
use crate::platform::Platform;
use crate::types::CaptureConfig;

/// (id, selector) pairs tried in order after any role-tagged strategy.
fn selector_fallbacks(platform: Platform) -> &'static [(&'static str, &'static str)] {
    match platform {
        Platform::ChatGpt => &[
            ("chatgpt.conversation_turn", "[data-testid^='conversation-turn-']"),
            ("chatgpt.markdown", ".markdown, .whitespace-pre-wrap"),
        ],
        Platform::Claude => &[
            (
                "claude.message_testids",
                "[data-testid='user-message'], .font-claude-response, .font-claude-message",
            ),
            ("claude.prose", ".prose, .whitespace-pre-wrap"),
        ],
        Platform::Gemini => &[
            ("gemini.custom_elements", "user-query, model-response"),
            ("gemini.text_classes", ".query-text, .model-response-text, message-content"),
        ],
        Platform::Grok => &[
            ("grok.message_bubble", "[class*='message-bubble']"),
            ("grok.message_row", ".message-row, [class*='response-content']"),
        ],
        Platform::Perplexity => &[
            ("perplexity.query_answer", "[class*='group/query'], .prose"),
            ("perplexity.prose", "[class*='prose']"),
        ],
        Platform::Copilot => &[
            (
                "copilot.data_content",
                "[data-content='user-message'], [data-content='ai-message']",
            ),
            ("copilot.cib_message", "cib-message, [class*='message-content']"),
        ],
        Platform::Unknown => &[],
    }
}

/// Build the chain for `platform`, ending with the generic sweep.
pub fn chain_for(platform: Platform, config: &CaptureConfig) -> Result<StrategyChain> {
    let min = config.provider_min_length;
    let mut strategies: Vec<Box<dyn ExtractionStrategy>> = Vec::new();

    if platform == Platform::ChatGpt {
        strategies.push(Box::new(RoleTaggedStrategy::new(
            "chatgpt.author_role",
            "data-message-author-role",
            "user",
            "assistant",
            Some(".markdown, .whitespace-pre-wrap"),
            min,
        )?));
    }

    for (id, selector) in selector_fallbacks(platform) {
        strategies.push(Box::new(SelectorStrategy::new(*id, selector, min)?));
    }

    strategies.push(Box::new(GenericSweep::new(
        config.fallback_min_length,
        config.fallback_max_blocks,
        config.chrome_phrases.clone(),
    )?));

    Ok(StrategyChain::new(platform, strategies))
}
