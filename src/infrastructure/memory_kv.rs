use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::storage::KeyValueStore;

/// Process-local store. Clones share the same map.
#[derive(Clone, Default)]
pub struct InMemoryKvStore {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryKvStore {
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.items.lock().unwrap_or_else(PoisonError::into_inner).insert(key.to_string(), value.to_string());
        store
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKvStore {
    async fn init(&self) -> Result<()> { Ok(()) }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).insert(key.to_string(), value.to_string());
        Ok(())
    }
}
