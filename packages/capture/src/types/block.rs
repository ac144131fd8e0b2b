//! Raw text blocks pulled out of a page, before turn assembly.

use serde::{Deserialize, Serialize};

use super::turn::Role;
use crate::platform::Platform;

/// One block of conversation text as found in the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBlock {
    /// Trimmed text content.
    pub text: String,

    /// Speaker, when the page marks it explicitly.
    pub role: Option<Role>,

    /// Index of the element within the provider-wide role-tagged node list.
    /// Shared across roles, so it restores true conversation order.
    pub position: Option<usize>,
}

impl RawBlock {
    /// An untagged block. Roles will be inferred by position.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: None,
            position: None,
        }
    }

    /// A block carrying an explicit role and its combined-list position.
    pub fn tagged(text: impl Into<String>, role: Role, position: usize) -> Self {
        Self {
            text: text.into(),
            role: Some(role),
            position: Some(position),
        }
    }

    pub fn is_tagged(&self) -> bool {
        self.role.is_some() && self.position.is_some()
    }
}

/// Which tier of the fallback chain produced an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// A provider-specific strategy.
    Provider,
    /// The page-wide generic sweep.
    Generic,
}

/// How much the assembled speaker labels can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Roles and order came from explicit per-message role markup.
    Authoritative,
    /// Roles were inferred by strict positional alternation and may be wrong
    /// when the page does not alternate.
    Heuristic,
}

/// Output of the transcript extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extraction {
    pub platform: Platform,

    /// Blocks in the order the winning strategy produced them.
    pub blocks: Vec<RawBlock>,

    /// Identifier of the strategy that succeeded (for diagnostics).
    pub strategy: String,

    pub tier: Tier,
}
