//! Capture data types.

pub mod block;
pub mod citation;
pub mod config;
pub mod turn;

pub use block::{Confidence, Extraction, RawBlock, Tier};
pub use citation::Citation;
pub use config::CaptureConfig;
pub use turn::{Role, Transcript, Turn};
