//! Citation annotations recovered from rendered source pills.

use serde::{Deserialize, Serialize};

/// A source label paired with its "+N" badge count.
///
/// Order-preserving and never deduplicated: the same source with a different
/// count is a distinct citation event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub source: String,

    /// Badge count. Serialized as `number` on the wire.
    #[serde(rename = "number")]
    pub count: u32,
}

impl Citation {
    pub fn new(source: impl Into<String>, count: u32) -> Self {
        Self {
            source: source.into(),
            count,
        }
    }
}
