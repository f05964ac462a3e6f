use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use burrow_core::model::UserProgress;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the single persisted progress record.
///
/// The store behaves like a key-value blob: one record, read at startup,
/// overwritten on every completion. Absence is not an error; callers apply
/// defaults.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the persisted record, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be read or decoded.
    async fn load(&self) -> Result<Option<UserProgress>, StorageError>;

    /// Persist the record, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be encoded or written.
    async fn save(&self, progress: &UserProgress) -> Result<(), StorageError>;
}

/// In-memory blob store for testing and prototyping.
///
/// Holds the serialized JSON payload rather than the domain value so tests
/// can assert on the exact persisted bytes.
#[derive(Clone, Default)]
pub struct InMemoryProgressStore {
    payload: Arc<Mutex<Option<String>>>,
}

impl InMemoryProgressStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw persisted payload, if any. Test hook.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn raw_payload(&self) -> Option<String> {
        self.payload
            .lock()
            .expect("progress store lock poisoned")
            .clone()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryProgressStore {
    async fn load(&self) -> Result<Option<UserProgress>, StorageError> {
        let guard = self
            .payload
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    async fn save(&self, progress: &UserProgress) -> Result<(), StorageError> {
        let payload = serde_json::to_string(progress)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let mut guard = self
            .payload
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(payload);
        Ok(())
    }
}

/// Aggregates the progress repository behind a trait object for easy backend
/// swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            progress: Arc::new(InMemoryProgressStore::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burrow_core::time::fixed_now;

    #[tokio::test]
    async fn load_on_empty_store_returns_none() {
        let store = InMemoryProgressStore::new();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = InMemoryProgressStore::new();
        let progress = UserProgress::new("Tester", fixed_now());
        store.save(&progress).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, progress);
    }

    #[tokio::test]
    async fn storage_aggregate_wires_the_in_memory_backend() {
        let storage = Storage::in_memory();
        let progress = UserProgress::new("Tester", fixed_now());
        storage.progress.save(&progress).await.unwrap();
        assert_eq!(storage.progress.load().await.unwrap(), Some(progress));
    }

    #[tokio::test]
    async fn load_then_save_is_byte_identical() {
        let store = InMemoryProgressStore::new();
        let progress = UserProgress::new("Tester", fixed_now());
        store.save(&progress).await.unwrap();
        let first = store.raw_payload().unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        store.save(&loaded).await.unwrap();
        let second = store.raw_payload().unwrap();

        assert_eq!(first, second);
    }
}
