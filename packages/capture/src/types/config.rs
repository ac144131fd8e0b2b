//! Capture configuration.
//!
//! Everything the surrounding app wants to influence (thresholds, whether
//! citations are collected) is passed in here explicitly.

use serde::{Deserialize, Serialize};

/// Chrome phrases excluded from the generic sweep.
pub const DEFAULT_CHROME_PHRASES: &[&str] = &["Skip to", "Sign in", "Settings"];

/// Configuration for a single capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Minimum trimmed length for blocks from provider strategies.
    ///
    /// Filters UI chrome such as "Copy" buttons. Default: 10.
    pub provider_min_length: usize,

    /// Minimum trimmed length for blocks from the generic sweep. Default: 20.
    pub fallback_min_length: usize,

    /// Cap on generic sweep blocks, bounding pathological pages. Default: 20.
    pub fallback_max_blocks: usize,

    /// Blocks containing any of these phrases are dropped by the generic sweep.
    pub chrome_phrases: Vec<String>,

    /// Collect citation pills from the extracted text.
    ///
    /// Default: true. Ignored for unknown platforms.
    pub include_citations: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            provider_min_length: 10,
            fallback_min_length: 20,
            fallback_max_blocks: 20,
            chrome_phrases: DEFAULT_CHROME_PHRASES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            include_citations: true,
        }
    }
}

impl CaptureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn citation collection on or off.
    pub fn with_citations(mut self, include: bool) -> Self {
        self.include_citations = include;
        self
    }
}
