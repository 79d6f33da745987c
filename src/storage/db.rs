use std::path::{Path, PathBuf};

use log::{debug, info};
use sea_orm::sqlx::sqlite::SqlitePoolOptions;
use sea_orm::{ConnectionTrait, DatabaseConnection, Schema, SqlxSqliteConnector, TransactionTrait};
use tokio::sync::OnceCell;

use super::error::{StoreError, StoreResult};
use super::record::{Record, RecordKind};
use crate::config::StorageConfig;
use crate::entities;

const MEMORY_URL: &str = "sqlite::memory:";

/// Durable store for user, task and category records.
///
/// The connection is opened lazily by [`RecordStore::open`] and then shared by
/// every operation for the lifetime of the store. SQLite serializes writers,
/// so no extra locking happens here.
pub struct RecordStore {
    database_path: Option<PathBuf>,
    conn: OnceCell<DatabaseConnection>,
}

impl RecordStore {
    /// Store backed by a SQLite file, created on first open.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: Some(path.into()),
            conn: OnceCell::new(),
        }
    }

    /// Store that lives only as long as this process.
    pub fn in_memory() -> Self {
        Self {
            database_path: None,
            conn: OnceCell::new(),
        }
    }

    /// Build the store described by the `[storage]` configuration section.
    pub fn from_config(config: &StorageConfig) -> anyhow::Result<Self> {
        if config.in_memory {
            return Ok(Self::in_memory());
        }
        Ok(Self::at_path(config.resolve_database_path()?))
    }

    pub fn database_path(&self) -> Option<&Path> {
        self.database_path.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.conn.initialized()
    }

    /// Open the database and create any missing tables.
    ///
    /// Calling this again after a successful open does nothing. A failed open
    /// leaves the store closed, so a later call tries again.
    pub async fn open(&self) -> StoreResult<()> {
        self.conn.get_or_try_init(|| self.connect()).await?;
        Ok(())
    }

    async fn connect(&self) -> StoreResult<DatabaseConnection> {
        let url = match &self.database_path {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        StoreError::Initialization(format!("cannot create {}: {e}", parent.display()))
                    })?;
                }
                format!("sqlite://{}?mode=rwc", path.display())
            }
            None => MEMORY_URL.to_string(),
        };

        info!("🗄️ Opening record store at {url}");

        // An in-memory database exists per connection, so keep exactly one.
        let max_connections = if self.database_path.is_some() { 4 } else { 1 };
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(max_connections)
            .idle_timeout(None) // a recycled in-memory connection comes back empty
            .max_lifetime(None)
            .connect(&url)
            .await
            .map_err(|e| StoreError::Initialization(e.to_string()))?;
        let conn = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);

        Self::init_schema(&conn).await?;
        info!("✅ Record store ready");
        Ok(conn)
    }

    /// Create the three collections if they do not exist yet.
    async fn init_schema(conn: &DatabaseConnection) -> StoreResult<()> {
        let backend = conn.get_database_backend();
        let schema = Schema::new(backend);

        let mut statements = [
            schema.create_table_from_entity(entities::User),
            schema.create_table_from_entity(entities::Task),
            schema.create_table_from_entity(entities::Category),
        ];

        for statement in &mut statements {
            statement.if_not_exists();
            conn.execute(backend.build(&*statement))
                .await
                .map_err(|e| StoreError::Initialization(e.to_string()))?;
        }
        Ok(())
    }

    /// The shared connection, once [`RecordStore::open`] has succeeded.
    pub fn connection(&self) -> Option<&DatabaseConnection> {
        self.conn.get()
    }

    fn reader(&self, kind: RecordKind) -> StoreResult<&DatabaseConnection> {
        self.connection()
            .ok_or_else(|| StoreError::read(kind, "record store is not open"))
    }

    fn writer(&self, kind: RecordKind) -> StoreResult<&DatabaseConnection> {
        self.connection()
            .ok_or_else(|| StoreError::write(kind, "record store is not open"))
    }

    /// Fetch the record stored under `key`, if any.
    pub async fn get<R: Record>(&self, key: &str) -> StoreResult<Option<R>> {
        let conn = self.reader(R::KIND)?;
        R::find(conn, key).await.map_err(|e| StoreError::read(R::KIND, e))
    }

    /// Every record of the kind, in no particular order.
    pub async fn get_all<R: Record>(&self) -> StoreResult<Vec<R>> {
        let conn = self.reader(R::KIND)?;
        R::find_all(conn).await.map_err(|e| StoreError::read(R::KIND, e))
    }

    /// Insert the record or replace the one already stored under its key.
    pub async fn put<R: Record>(&self, record: &R) -> StoreResult<()> {
        let conn = self.writer(R::KIND)?;
        record.save(conn).await.map_err(|e| StoreError::write(R::KIND, e))?;
        debug!("Stored {} record {}", R::KIND, record.key());
        Ok(())
    }

    /// Remove the record stored under `key`. Returns whether one existed.
    pub async fn delete<R: Record>(&self, key: &str) -> StoreResult<bool> {
        let conn = self.writer(R::KIND)?;
        R::remove(conn, key).await.map_err(|e| StoreError::write(R::KIND, e))
    }

    /// Replace the whole collection with `records` in a single transaction.
    ///
    /// When this returns `Ok`, [`RecordStore::get_all`] yields exactly the
    /// given records. On error the transaction is rolled back.
    pub async fn replace_all<R: Record>(&self, records: &[R]) -> StoreResult<()> {
        let conn = self.writer(R::KIND)?;
        let txn = conn.begin().await.map_err(|e| StoreError::write(R::KIND, e))?;
        let cleared = R::clear(&txn).await.map_err(|e| StoreError::write(R::KIND, e))?;
        for record in records {
            record.save(&txn).await.map_err(|e| StoreError::write(R::KIND, e))?;
        }
        txn.commit().await.map_err(|e| StoreError::write(R::KIND, e))?;

        debug!("Replaced {} {} records with {}", cleared, R::KIND, records.len());
        Ok(())
    }
}
