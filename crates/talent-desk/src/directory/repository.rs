use std::sync::{Arc, RwLock};

use super::domain::{Record, RecordId};

/// Storage abstraction so the directory service can be exercised in isolation.
pub trait RecordRepository<T: Record>: Send + Sync {
    fn insert(&self, record: T) -> Result<T, RepositoryError>;
    fn update(&self, record: T) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &RecordId) -> Result<Option<T>, RepositoryError>;
    fn remove(&self, id: &RecordId) -> Result<bool, RepositoryError>;
    /// Every stored record, in insertion order.
    fn all(&self) -> Result<Vec<T>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local collection backing the dashboard. Nothing survives a restart.
pub struct InMemoryRepository<T> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<T> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Unavailable("collection lock poisoned".to_string())
}

impl<T: Record> RecordRepository<T> for InMemoryRepository<T> {
    fn insert(&self, record: T) -> Result<T, RepositoryError> {
        let mut guard = self.records.write().map_err(|_| poisoned())?;
        if guard.iter().any(|existing| existing.id() == record.id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn update(&self, record: T) -> Result<(), RepositoryError> {
        let mut guard = self.records.write().map_err(|_| poisoned())?;
        match guard.iter_mut().find(|existing| existing.id() == record.id()) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &RecordId) -> Result<Option<T>, RepositoryError> {
        let guard = self.records.read().map_err(|_| poisoned())?;
        Ok(guard.iter().find(|record| record.id() == id).cloned())
    }

    fn remove(&self, id: &RecordId) -> Result<bool, RepositoryError> {
        let mut guard = self.records.write().map_err(|_| poisoned())?;
        let before = guard.len();
        guard.retain(|record| record.id() != id);
        Ok(guard.len() < before)
    }

    fn all(&self) -> Result<Vec<T>, RepositoryError> {
        let guard = self.records.read().map_err(|_| poisoned())?;
        Ok(guard.clone())
    }
}
