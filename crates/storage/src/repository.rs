use async_trait::async_trait;
use pensum_core::ProgressRecord;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the persisted progress record.
///
/// The record is stored and replaced as a whole; there is no per-entry
/// access at this boundary.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the persisted record.
    ///
    /// An absent or unreadable record loads as the empty record; only genuine
    /// medium failures surface here.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be read.
    async fn load(&self) -> Result<ProgressRecord, StorageError>;

    /// Persist the record, replacing whatever was stored before.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn save(&self, record: &ProgressRecord) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    record: Arc<Mutex<ProgressRecord>>,
    saves: Arc<Mutex<u64>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed `save` calls, so tests can assert that no-op
    /// mutations persist nothing.
    #[must_use]
    pub fn save_count(&self) -> u64 {
        self.saves.lock().map(|guard| *guard).unwrap_or(0)
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load(&self) -> Result<ProgressRecord, StorageError> {
        let guard = self
            .record
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        {
            let mut guard = self
                .record
                .lock()
                .map_err(|e| StorageError::Connection(e.to_string()))?;
            *guard = record.clone();
        }

        let mut saves = self
            .saves
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *saves += 1;
        Ok(())
    }
}

/// Aggregates the progress repository behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let progress: Arc<dyn ProgressRepository> = Arc::new(InMemoryRepository::new());
        Self { progress }
    }
}
