use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("stored blob `{key}` is not a valid collection: {source}")]
    CorruptBlob {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot encode collection for `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
