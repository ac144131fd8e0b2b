//! Transcript extraction with per-provider fallback chains.
//!
//! Each provider has an ordered list of strategies, most structural first
//! (explicit role markup) down to loose class-name heuristics. The first
//! strategy that yields at least one block wins. When none do, a page-wide
//! generic sweep runs with a stricter length floor and a block cap.

mod chains;
pub mod strategies;
pub mod text;

use scraper::Html;
use tracing::{debug, info, warn};

use crate::error::{CaptureError, Result};
use crate::platform::Platform;
use crate::types::{CaptureConfig, Extraction, RawBlock, Tier};

pub use chains::chain_for;
pub use strategies::{GenericSweep, RoleTaggedStrategy, SelectorStrategy};

/// A single way of pulling conversation blocks out of a page.
///
/// Implementations must return an empty vec, never fail, when nothing matches.
/// Every returned block's trimmed text must be longer than [`min_length`].
///
/// [`min_length`]: ExtractionStrategy::min_length
pub trait ExtractionStrategy: Send + Sync {
    /// Stable identifier reported for diagnostics.
    fn id(&self) -> &str;

    /// Blocks at or under this many characters are discarded.
    fn min_length(&self) -> usize;

    /// Tier this strategy belongs to.
    fn tier(&self) -> Tier {
        Tier::Provider
    }

    fn extract(&self, document: &Html) -> Vec<RawBlock>;
}

/// Ordered strategies for one provider, generic sweep last.
pub struct StrategyChain {
    platform: Platform,
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl StrategyChain {
    pub fn new(platform: Platform, strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self {
            platform,
            strategies,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Strategy ids in evaluation order.
    pub fn ids(&self) -> Vec<String> {
        self.strategies.iter().map(|s| s.id().to_string()).collect()
    }

    /// Run strategies in order; first non-empty result wins.
    pub fn run(&self, document: &Html) -> Result<Extraction> {
        for strategy in &self.strategies {
            let blocks = strategy.extract(document);
            if blocks.is_empty() {
                debug!(
                    platform = %self.platform,
                    strategy = strategy.id(),
                    "Strategy matched nothing, trying next"
                );
                continue;
            }

            info!(
                platform = %self.platform,
                strategy = strategy.id(),
                blocks = blocks.len(),
                "Extracted conversation blocks"
            );
            return Ok(Extraction {
                platform: self.platform,
                blocks,
                strategy: strategy.id().to_string(),
                tier: strategy.tier(),
            });
        }

        warn!(platform = %self.platform, "No strategy found conversation content");
        Err(CaptureError::NoContentFound {
            platform: self.platform,
            strategies_tried: self.ids(),
        })
    }
}

/// Extract raw conversation blocks from a parsed page.
pub fn extract_blocks(
    document: &Html,
    platform: Platform,
    config: &CaptureConfig,
) -> Result<Extraction> {
    chain_for(platform, config)?.run(document)
}
