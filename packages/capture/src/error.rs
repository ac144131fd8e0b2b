//! Typed errors for the capture library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can tell a
//! page with nothing to capture apart from a broken strategy definition.

use thiserror::Error;

use crate::platform::Platform;

/// Errors that can occur while capturing a conversation.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Every strategy, including the generic sweep, came back empty.
    #[error("no conversation content found on {platform} page (tried: {})", strategies_tried.join(", "))]
    NoContentFound {
        platform: Platform,
        strategies_tried: Vec<String>,
    },

    /// A strategy was built with a CSS selector that does not parse.
    #[error("invalid selector {selector:?} in strategy {strategy}")]
    InvalidSelector { strategy: String, selector: String },

    /// Serialized transcript could not be read back.
    #[error("malformed transcript: {reason}")]
    MalformedTranscript { reason: String },
}

/// Result type alias for capture operations.
pub type Result<T> = std::result::Result<T, CaptureError>;
