use std::{path::PathBuf, str::FromStr, sync::Arc};

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{
    Pool, Row, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::debug;

use crate::domain::storage::KeyValueStore;

/// Key-value slots in a single SQLite table.
#[derive(Clone)]
pub struct SqliteKvStore {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteKvStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let in_memory = is_in_memory(database_url);
        if let Some(dir) = database_file(database_url).as_deref().and_then(|f| f.parent()) {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;
            }
        }
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid database url `{database_url}`"))?
            .create_if_missing(true);
        // Every connection to `:memory:` is its own database, so keep exactly one alive.
        let pool_options = if in_memory {
            SqlitePoolOptions::new().max_connections(1).idle_timeout(None).max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options.connect_with(options).await?;
        debug!(database_url, "connected key-value store");
        Ok(Self { pool: Arc::new(pool) })
    }
}

#[async_trait]
impl KeyValueStore for SqliteKvStore {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM kv WHERE key = ?1")
            .bind(key)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.map(|r| r.get("value")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.starts_with("sqlite::memory:") || database_url.contains("mode=memory")
}

/// The file behind a `sqlite:` url, without query parameters. `None` for
/// in-memory databases and urls of another scheme.
fn database_file(database_url: &str) -> Option<PathBuf> {
    if is_in_memory(database_url) {
        return None;
    }
    let rest = database_url.strip_prefix("sqlite:")?;
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    let file = rest.split_once('?').map_or(rest, |(file, _)| file);
    (!file.is_empty()).then(|| PathBuf::from(file))
}
