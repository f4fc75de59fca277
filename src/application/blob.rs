use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};

use crate::{domain::storage::KeyValueStore, error::PlannerError};

/// Reads a JSON array from `key`. An empty slot is an empty collection.
pub async fn load_collection<T, S>(kv: &S, key: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = kv.get(key).await? else { return Ok(Vec::new()) };
    let items = serde_json::from_str(&raw)
        .map_err(|source| PlannerError::CorruptBlob { key: key.to_string(), source })?;
    Ok(items)
}

pub async fn save_collection<T, S>(kv: &S, key: &str, items: &[T]) -> Result<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(items)
        .map_err(|source| PlannerError::Encode { key: key.to_string(), source })?;
    kv.set(key, &raw).await
}
