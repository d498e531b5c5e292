use anyhow::Result;
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::info;

pub mod migrator;
pub mod repositories;

/// How long a connection waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Held for the lifetime of a write transaction.
pub type WritePermit = OwnedMutexGuard<()>;

/// Pooled connection to the meal-plan database.
///
/// The store hands out one transaction per unit of work; repositories never
/// reach for the pool on their own. Write transactions are serialized
/// in-process, since `SQLite` allows a single writer and a deferred
/// transaction that reads before writing cannot wait for the lock.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
    writer: Arc<Mutex<()>>,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");
        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false)
            .map_sqlx_sqlite_opts(move |opts| {
                let opts = opts.busy_timeout(BUSY_TIMEOUT);
                if in_memory {
                    opts
                } else {
                    opts.journal_mode(sea_orm::sqlx::sqlite::SqliteJournalMode::Wal)
                }
            });

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self {
            conn,
            writer: Arc::new(Mutex::new(())),
        })
    }

    /// Opens the transaction that scopes one read-only service operation.
    ///
    /// Dropping the returned handle without calling `commit` rolls it back.
    pub async fn begin(&self) -> Result<DatabaseTransaction, DbErr> {
        self.conn.begin().await
    }

    /// Opens a transaction for an operation that writes.
    ///
    /// Waits until no other write transaction is open. Bind the permit before
    /// the transaction (`let (_permit, txn) = ..`) so the transaction is
    /// finished before the next writer starts.
    pub async fn begin_write(&self) -> Result<(WritePermit, DatabaseTransaction), DbErr> {
        let permit = Arc::clone(&self.writer).lock_owned().await;
        let txn = self.conn.begin().await?;
        Ok((permit, txn))
    }
}
