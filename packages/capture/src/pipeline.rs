//! Capture entrypoint: page in, transcript and citations out.

use scraper::Html;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::citations::split_citations;
use crate::error::{CaptureError, Result};
use crate::extractor::extract_blocks;
use crate::platform::{detect_platform, Platform};
use crate::turns::assemble_turns;
use crate::types::{CaptureConfig, Citation, Confidence, Tier};

/// Everything a capture hands to the submission step.
///
/// Citations travel out-of-band next to the transcript text, never inside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturePayload {
    /// Canonical serialized transcript.
    pub transcript: String,
    pub citations: Vec<Citation>,
    pub platform: Platform,
    /// Strategy that produced the blocks.
    pub strategy: String,
    pub tier: Tier,
    pub confidence: Confidence,
    pub turn_count: usize,
}

/// Capture a conversation from a page's HTML.
///
/// Fails with [`CaptureError::NoContentFound`] when nothing could be
/// extracted; an empty transcript is never produced.
///
/// [`CaptureError::NoContentFound`]: crate::error::CaptureError::NoContentFound
pub fn capture_page(html: &str, url: &str, config: &CaptureConfig) -> Result<CapturePayload> {
    let document = Html::parse_document(html);
    capture_document(&document, url, config)
}

/// [`capture_page`] over an already parsed document.
pub fn capture_document(
    document: &Html,
    url: &str,
    config: &CaptureConfig,
) -> Result<CapturePayload> {
    let platform = detect_platform(url);
    if !platform.is_supported() {
        warn!(url = %url, "Platform not supported, using generic extraction");
    }

    let extraction = extract_blocks(document, platform, config)?;
    let strategy = extraction.strategy.clone();
    let tier = extraction.tier;
    let mut blocks = extraction.blocks;

    // Citation pills are a provider rendering detail; skip them for unknown pages.
    // Collected pills are removed from the block text so they only travel
    // in `citations`.
    let mut citations = Vec::new();
    if config.include_citations && platform.is_supported() {
        for block in &mut blocks {
            let (text, found) = split_citations(&block.text);
            if !found.is_empty() {
                block.text = text.trim().to_string();
                citations.extend(found);
            }
        }
        blocks.retain(|block| !block.text.is_empty());
        if blocks.is_empty() {
            return Err(CaptureError::NoContentFound {
                platform,
                strategies_tried: vec![strategy],
            });
        }
    }

    let transcript = assemble_turns(blocks, platform);
    let turn_count = transcript.len();
    let confidence = transcript.confidence;

    info!(
        platform = %platform,
        strategy = %strategy,
        turns = turn_count,
        citations = citations.len(),
        confidence = ?confidence,
        "Captured conversation"
    );

    Ok(CapturePayload {
        transcript: transcript.serialize(url),
        citations,
        platform,
        strategy,
        tier,
        confidence,
        turn_count,
    })
}
