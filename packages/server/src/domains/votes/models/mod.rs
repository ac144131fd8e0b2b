pub mod vote_record;

pub use vote_record::{InsertOutcome, VoteRecord, VoteScope};
