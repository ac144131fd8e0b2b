//! Conversation Capture Library
//!
//! Turns a shared AI chat page into a canonical transcript plus the citation
//! pills it carried. Runs synchronously on one parsed document with no I/O.
//!
//! # Pipeline
//!
//! 1. [`platform`] - classify the share URL into a provider
//! 2. [`extractor`] - per-provider strategy chains pull raw text blocks
//! 3. [`turns`] - label blocks as human/assistant turns and serialize
//! 4. [`citations`] - recover `(source, count)` pairs from the text
//!
//! # Usage
//!
//! ```rust,ignore
//! use capture::{capture_page, CaptureConfig};
//!
//! let payload = capture_page(&html, "https://claude.ai/share/abc", &CaptureConfig::default())?;
//! println!("{} turns via {}", payload.turn_count, payload.strategy);
//! ```

pub mod citations;
pub mod error;
pub mod extractor;
pub mod pipeline;
pub mod platform;
pub mod testing;
pub mod turns;
pub mod types;

// Re-export core types at crate root
pub use citations::{parse_citations, split_citations};
pub use error::{CaptureError, Result};
pub use extractor::{extract_blocks, ExtractionStrategy, StrategyChain};
pub use pipeline::{capture_document, capture_page, CapturePayload};
pub use platform::{detect_platform, Platform};
pub use turns::{
    assemble_turns, has_role_markers, parse_transcript, ParsedTranscript, ASSISTANT_MARKER,
    HUMAN_MARKER, TURN_DELIMITER,
};
pub use types::{CaptureConfig, Citation, Confidence, Extraction, RawBlock, Role, Tier, Transcript, Turn};
