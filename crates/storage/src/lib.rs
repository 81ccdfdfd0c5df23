use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::RwLock;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};

/// Whole-value read/replace persistence for the workout counter. No partial
/// updates, no history; missing state reads as zero.
pub trait CounterRepository: Send + Sync {
    async fn load_count(&self) -> Result<u64>;
    async fn save_count(&self, count: u64) -> Result<()>;
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    count: Arc<RwLock<u64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CounterRepository for MemoryStore {
    async fn load_count(&self) -> Result<u64> {
        Ok(*self.count.read())
    }

    async fn save_count(&self, count: u64) -> Result<()> {
        *self.count.write() = count;
        Ok(())
    }
}

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        // Single writer; one connection also keeps sqlite::memory: URLs
        // coherent across calls.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await
            .with_context(|| format!("failed connecting to sqlite at {database_url}"))?;

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS workout_counter (
              id INTEGER PRIMARY KEY CHECK (id = 1),
              count INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

impl CounterRepository for SqliteStore {
    async fn load_count(&self) -> Result<u64> {
        let row = sqlx::query("SELECT count FROM workout_counter WHERE id = 1")
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(0);
        };

        let count: i64 = row.get("count");
        Ok(count.max(0) as u64)
    }

    async fn save_count(&self, count: u64) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO workout_counter (id, count)
            VALUES (1, ?1)
            ON CONFLICT(id) DO UPDATE SET count=excluded.count
            "#,
        )
        .bind(count as i64)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[derive(Clone)]
pub enum Store {
    Memory(MemoryStore),
    Sqlite(SqliteStore),
}

impl Store {
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    pub async fn sqlite(database_url: &str) -> Result<Self> {
        let sqlite = SqliteStore::connect(database_url).await?;
        Ok(Self::Sqlite(sqlite))
    }
}

impl CounterRepository for Store {
    async fn load_count(&self) -> Result<u64> {
        match self {
            Store::Memory(store) => store.load_count().await,
            Store::Sqlite(store) => store.load_count().await,
        }
    }

    async fn save_count(&self, count: u64) -> Result<()> {
        match self {
            Store::Memory(store) => store.save_count(count).await,
            Store::Sqlite(store) => store.save_count(count).await,
        }
    }
}
