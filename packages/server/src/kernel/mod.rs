//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod stores;
pub mod traits;

pub use deps::ServerDeps;
pub use stores::{MemoryStore, PostgresStore};
pub use traits::*;
