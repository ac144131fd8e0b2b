//! Turns and transcripts.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::block::Confidence;
use crate::platform::Platform;

/// Speaker of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Human,
    Assistant,
}

impl Role {
    /// Role for a block at `index` under strict alternation.
    pub fn by_position(index: usize) -> Self {
        if index % 2 == 0 {
            Role::Human
        } else {
            Role::Assistant
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Human => f.write_str("human"),
            Role::Assistant => f.write_str("assistant"),
        }
    }
}

/// One speaker's contiguous utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    pub platform: Platform,
}

/// An ordered conversation captured from one page.
///
/// Ephemeral: it lives only during capture and is flattened into a single
/// string by [`Transcript::serialize`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub platform: Platform,
    pub turns: Vec<Turn>,
    pub confidence: Confidence,
}

impl Transcript {
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
