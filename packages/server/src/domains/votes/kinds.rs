use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::common::{SegmentId, ThreadId};
use crate::domains::votes::models::VoteScope;

/// A closed set of mutually exclusive vote kinds for one kind of target.
pub trait VoteKind:
    Copy + Eq + Ord + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Id type of the thing being voted on.
    type Target: Copy + Into<uuid::Uuid> + DeserializeOwned + Send;

    const SCOPE: VoteScope;
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == value)
    }
}

/// Whole-thread vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadVote {
    Up,
    Down,
}

impl VoteKind for ThreadVote {
    type Target = ThreadId;

    const SCOPE: VoteScope = VoteScope::Thread;
    const ALL: &'static [Self] = &[Self::Up, Self::Down];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// Reaction to a highlighted text segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentReaction {
    Like,
    Dislike,
}

impl VoteKind for SegmentReaction {
    type Target = SegmentId;

    const SCOPE: VoteScope = VoteScope::Segment;
    const ALL: &'static [Self] = &[Self::Like, Self::Dislike];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}
