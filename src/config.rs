use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://planner.db";
pub const DEFAULT_LOG_FILE: &str = "planner.log";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub log_file: PathBuf,
    pub log_filter: String,
}

impl Config {
    /// Reads `PLANNER_DATABASE_URL`, `PLANNER_LOG_FILE` and `RUST_LOG`.
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Self { Self::from_lookup(|key| std::env::var(key).ok()) }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| lookup(key).filter(|v| !v.trim().is_empty()).unwrap_or_else(|| default.to_string());
        Self {
            database_url: get("PLANNER_DATABASE_URL", DEFAULT_DATABASE_URL),
            log_file: PathBuf::from(get("PLANNER_LOG_FILE", DEFAULT_LOG_FILE)),
            log_filter: get("RUST_LOG", DEFAULT_LOG_FILTER),
        }
    }
}
