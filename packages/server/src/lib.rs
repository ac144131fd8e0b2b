// Conversation capture API - server core
//
// Stores submitted threads and pending references, reconciles the two after
// each submission, and runs the vote ledger. Page capture itself lives in the
// `capture` crate.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
