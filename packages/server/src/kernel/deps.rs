//! Server dependencies for domain activities (using traits for testability)

use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::reconciliation::ReconciliationConfig;
use crate::kernel::stores::{MemoryStore, PostgresStore};
use crate::kernel::traits::{BaseReferenceStore, BaseThreadStore, BaseVoteStore};

/// Dependencies shared by every unit of work. The stores are the only
/// shared state.
#[derive(Clone)]
pub struct ServerDeps {
    pub threads: Arc<dyn BaseThreadStore>,
    pub references: Arc<dyn BaseReferenceStore>,
    pub votes: Arc<dyn BaseVoteStore>,
    pub reconciliation: ReconciliationConfig,
    /// Present when running against Postgres; used by the health check.
    pub db_pool: Option<PgPool>,
}

impl ServerDeps {
    pub fn new(
        threads: Arc<dyn BaseThreadStore>,
        references: Arc<dyn BaseReferenceStore>,
        votes: Arc<dyn BaseVoteStore>,
        reconciliation: ReconciliationConfig,
    ) -> Self {
        Self {
            threads,
            references,
            votes,
            reconciliation,
            db_pool: None,
        }
    }

    /// All stores backed by one Postgres pool.
    pub fn postgres(pool: PgPool, reconciliation: ReconciliationConfig) -> Self {
        let store = Arc::new(PostgresStore::new(pool.clone()));
        Self {
            threads: store.clone(),
            references: store.clone(),
            votes: store,
            reconciliation,
            db_pool: Some(pool),
        }
    }

    /// All stores backed by one shared in-memory store.
    pub fn in_memory(store: Arc<MemoryStore>, reconciliation: ReconciliationConfig) -> Self {
        Self::new(store.clone(), store.clone(), store, reconciliation)
    }
}
