//! Test harness for in-memory and Postgres-backed dependencies.
//!
//! The Postgres container is started once and shared by every test in the
//! binary; migrations run once on first use.

use anyhow::{Context, Result};
use sqlx::PgPool;
use std::sync::Arc;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use server_core::domains::reconciliation::ReconciliationConfig;
use server_core::kernel::{MemoryStore, ServerDeps};

/// Shared in-memory store plus deps wired to it.
pub struct MemoryHarness {
    pub store: Arc<MemoryStore>,
    pub deps: ServerDeps,
}

pub fn memory_harness() -> MemoryHarness {
    init_tracing();
    let store = Arc::new(MemoryStore::new());
    let deps = ServerDeps::in_memory(store.clone(), ReconciliationConfig::default());
    MemoryHarness { store, deps }
}

fn init_tracing() {
    // Run tests with: RUST_LOG=debug cargo test -- --nocapture
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct SharedPostgres {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_POSTGRES: OnceCell<SharedPostgres> = OnceCell::const_new();

impl SharedPostgres {
    async fn init() -> Result<Self> {
        init_tracing();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let host = postgres.get_host().await?;
        let port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }
}

/// Deps backed by the shared Postgres container.
pub async fn postgres_deps() -> Result<ServerDeps> {
    let shared = SHARED_POSTGRES
        .get_or_try_init(SharedPostgres::init)
        .await?;
    let pool = PgPool::connect(&shared.db_url)
        .await
        .context("Failed to connect to test database")?;
    Ok(ServerDeps::postgres(pool, ReconciliationConfig::default()))
}
