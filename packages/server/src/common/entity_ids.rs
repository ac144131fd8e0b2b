//! Typed ID definitions for domain entities.

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Member entities (users).
pub struct Member;

/// Marker type for submitted threads (captured transcripts).
pub struct Thread;

/// Marker type for pending references (saved "capture later" links).
pub struct Reference;

/// Marker type for text segments that can receive reactions.
pub struct Segment;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type MemberId = Id<Member>;

pub type ThreadId = Id<Thread>;

pub type ReferenceId = Id<Reference>;

pub type SegmentId = Id<Segment>;
