//! Realtime database access
//!
//! Provides a trait for the two calls the repository needs, with:
//! - Firebase Realtime Database implementation over the REST API
//! - In-memory implementation for tests and local development

pub mod firebase;
pub mod memory;

use async_trait::async_trait;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

pub use firebase::FirebaseStore;
pub use memory::MemoryStore;

/// Trait for realtime database access (testable)
#[async_trait]
pub trait RealtimeStore: Send + Sync {
    /// Append `value` as a new child of `path`, returning the generated key.
    async fn push(&self, path: &str, value: Value) -> Result<Option<String>, StoreError>;

    /// Read a snapshot of `path`. `None` when nothing is stored there.
    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError>;
}

/// Error from the underlying store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{method} {path} failed ({status}): {body}")]
    Status {
        method: &'static str,
        path: String,
        status: u16,
        body: String,
    },

    #[error("Failed to decode response for '{path}': {source}")]
    Decode {
        path: String,
        source: serde_json::Error,
    },

    #[error("Failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Invalid store path '{path}'")]
    InvalidPath { path: String },
}

/// Values the server fills in at commit time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerValue {
    /// Server clock in milliseconds since epoch
    Timestamp,
}

impl ServerValue {
    const KEY: &'static str = ".sv";

    fn name(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
        }
    }

    /// Recognize a placeholder in a JSON value.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        if obj.len() != 1 {
            return None;
        }
        match obj.get(Self::KEY)?.as_str()? {
            "timestamp" => Some(Self::Timestamp),
            _ => None,
        }
    }
}

impl Serialize for ServerValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(Self::KEY, self.name())?;
        map.end()
    }
}

/// Check a slash-separated store path.
///
/// Segments must be non-empty and free of `.`, `#`, `$`, `[` and `]`.
pub fn validate_path(path: &str) -> Result<&str, StoreError> {
    let valid = !path.is_empty()
        && path.split('/').all(|segment| {
            !segment.is_empty()
                && !segment
                    .chars()
                    .any(|c| matches!(c, '.' | '#' | '$' | '[' | ']') || c.is_control())
        });

    if valid {
        Ok(path)
    } else {
        Err(StoreError::InvalidPath {
            path: path.to_owned(),
        })
    }
}
