//! SQLite connection pool and schema bootstrap.
//!
//! The schema is created idempotently on open. There are no migrations: the two
//! tables below are the whole persisted state.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tracing::instrument;

use crate::error::{StoreResult, map_sqlx_error};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS spare_parts (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        part_number  TEXT NOT NULL UNIQUE,
        description  TEXT NOT NULL DEFAULT '',
        machine_type TEXT NOT NULL DEFAULT '',
        supplier     TEXT NOT NULL DEFAULT '',
        min_qty      INTEGER NOT NULL DEFAULT 0 CHECK (min_qty >= 0),
        current_qty  INTEGER NOT NULL DEFAULT 0 CHECK (current_qty >= 0),
        location     TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS transactions (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        part_id  INTEGER NOT NULL REFERENCES spare_parts(id) ON DELETE CASCADE,
        ts       TEXT NOT NULL,
        user     TEXT NOT NULL,
        action   TEXT NOT NULL CHECK (action IN ('IN', 'OUT')),
        quantity INTEGER NOT NULL CHECK (quantity > 0),
        remarks  TEXT NOT NULL DEFAULT ''
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_transactions_part_id ON transactions (part_id)",
    "CREATE INDEX IF NOT EXISTS idx_transactions_ts ON transactions (ts)",
];

/// Connection settings for the inventory database.
#[derive(Debug, Clone)]
pub struct DatabaseOptions {
    /// SQLite URL, e.g. `sqlite://inventory.db` or `sqlite::memory:`.
    pub url: String,
    /// How long a writer waits for the database lock before failing.
    pub busy_timeout: Duration,
    pub max_connections: u32,
}

impl DatabaseOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            busy_timeout: Duration::from_secs(5),
            max_connections: 8,
        }
    }

    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::new(format!("sqlite://{}", path.as_ref().to_string_lossy()))
    }

    pub fn in_memory() -> Self {
        Self::new("sqlite::memory:")
    }

    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    fn is_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// Handle to the inventory database. Cheap to clone; clones share the pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) the database and ensure the schema exists.
    #[instrument(skip_all, fields(url = %options.url), err)]
    pub async fn open(options: DatabaseOptions) -> StoreResult<Self> {
        let mut connect = SqliteConnectOptions::from_str(&options.url)
            .map_err(|e| map_sqlx_error("parse_database_url", e))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(options.busy_timeout);

        // A private in-memory database lives and dies with its single connection.
        let pool_options = if options.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            connect = connect.journal_mode(SqliteJournalMode::Wal);
            SqlitePoolOptions::new().max_connections(options.max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(connect)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;

        let db = Self { pool };
        db.init_schema().await?;
        tracing::debug!("inventory database ready");
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn init_schema(&self) -> StoreResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("init_schema", e))?;
        }
        Ok(())
    }
}
