//! Vote ledger shared by thread votes and segment reactions.

pub mod kinds;
pub mod ledger;
pub mod models;

pub use kinds::{SegmentReaction, ThreadVote, VoteKind};
pub use ledger::{VoteLedger, VoteSummary};
pub use models::{InsertOutcome, VoteScope};
