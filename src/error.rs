use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures of the file-backed collections.
///
/// `Read` and `Parse` only happen while loading at startup, `Serialize` and
/// `Write` while persisting a mutation. `IdsExhausted` rejects a create before
/// anything is written.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no product id left after {max_id}")]
    IdsExhausted { max_id: i64 },
}

/// A request body lacked a field the handler requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing required field: {field}")]
pub struct MissingField {
    pub field: &'static str,
}

impl MissingField {
    pub fn new(field: &'static str) -> Self {
        Self { field }
    }
}
