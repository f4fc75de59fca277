use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::{domain::storage::KeyValueStore, infrastructure::memory_kv::InMemoryKvStore};

/// Reads from an in-memory map but refuses every write.
#[derive(Clone, Default)]
pub(crate) struct ReadOnlyStore {
    pub inner: InMemoryKvStore,
}

#[async_trait]
impl KeyValueStore for ReadOnlyStore {
    async fn init(&self) -> Result<()> { Ok(()) }
    async fn get(&self, key: &str) -> Result<Option<String>> { self.inner.get(key).await }
    async fn set(&self, key: &str, _value: &str) -> Result<()> { bail!("storage is read-only: {key}") }
}
