//! Database handle shared across the process
//!
//! Built once at startup and cloned into whatever needs it; clones share
//! the same underlying client.

use std::fmt;
use std::sync::Arc;

use crate::config::FirebaseConfig;
use crate::error::Result;
use crate::store::{FirebaseStore, MemoryStore, RealtimeStore};

/// Shared database handle
#[derive(Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

struct DatabaseInner {
    store: Arc<dyn RealtimeStore>,
    label: String,
}

impl Database {
    /// Connect to the Firebase project described by `config`.
    ///
    /// No request is made here; bad credentials or rules surface on the
    /// first read or write.
    pub fn connect(config: &FirebaseConfig) -> Result<Self> {
        let endpoint = config.database_endpoint()?;
        tracing::info!(
            project = %config.project_id,
            database = %endpoint,
            "Firebase database handle created"
        );

        let store = FirebaseStore::new(endpoint);
        Ok(Self::with_label(
            Arc::new(store),
            format!("firebase:{}", config.project_id),
        ))
    }

    /// Handle over an in-process store.
    pub fn in_memory() -> Self {
        Self::with_label(Arc::new(MemoryStore::new()), "memory".to_string())
    }

    /// Handle over any store implementation.
    pub fn from_store(store: Arc<dyn RealtimeStore>) -> Self {
        Self::with_label(store, "custom".to_string())
    }

    fn with_label(store: Arc<dyn RealtimeStore>, label: String) -> Self {
        Self {
            inner: Arc::new(DatabaseInner { store, label }),
        }
    }

    pub fn store(&self) -> &dyn RealtimeStore {
        self.inner.store.as_ref()
    }

    /// Short description of the backing store, for logs
    pub fn label(&self) -> &str {
        &self.inner.label
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("store", &self.inner.label)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> FirebaseConfig {
        FirebaseConfig {
            api_key: "key".into(),
            auth_domain: "demo.firebaseapp.com".into(),
            database_url: url.into(),
            project_id: "demo".into(),
            storage_bucket: "demo.appspot.com".into(),
            messaging_sender_id: "1".into(),
            app_id: "app".into(),
        }
    }

    #[test]
    fn connect_labels_project() {
        let db = Database::connect(&config("https://demo.firebaseio.com")).unwrap();
        assert_eq!(db.label(), "firebase:demo");
    }

    #[test]
    fn connect_rejects_bad_url() {
        assert!(Database::connect(&config("nope")).is_err());
    }

    #[test]
    fn clones_share_store() {
        let db = Database::in_memory();
        let clone = db.clone();
        assert!(Arc::ptr_eq(&db.inner, &clone.inner));
        assert_eq!(clone.label(), "memory");
    }
}
