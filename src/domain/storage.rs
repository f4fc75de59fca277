use async_trait::async_trait;

/// Slot holding the JSON-encoded task collection.
pub const TASKS_KEY: &str = "studentTasks";
/// Slot holding the JSON-encoded event collection.
pub const SCHEDULE_KEY: &str = "studentSchedule";

/// Durable string-keyed blob storage. Last write wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}
