use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{Admin, Candidate, Company, Record, RecordId};
use super::repository::{InMemoryRepository, RecordRepository, RepositoryError};
use super::search::{ListQuery, Searchable};
use super::validation::{Validate, ValidationErrors};

/// CRUD operations over one record collection.
///
/// Drafts are normalized and validated here, at submit time; the repository
/// only ever stores records that passed.
pub struct RecordCollection<T: Record> {
    repository: Arc<dyn RecordRepository<T>>,
    sequence: AtomicU64,
}

impl<T: Searchable> RecordCollection<T> {
    pub fn new(repository: Arc<dyn RecordRepository<T>>) -> Self {
        Self {
            repository,
            sequence: AtomicU64::new(1),
        }
    }

    fn next_id(&self) -> RecordId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        RecordId(format!("{}-{id:06}", T::KIND.id_prefix()))
    }

    fn not_found(id: &RecordId) -> DirectoryError {
        DirectoryError::NotFound {
            kind: T::KIND.label(),
            id: id.clone(),
        }
    }

    /// Records in insertion order, narrowed by the query.
    pub fn list(&self, query: &ListQuery) -> Result<Vec<T>, DirectoryError> {
        let records = self.repository.all()?;
        let total = records.len();
        let matched = query.apply(records);
        debug!(
            kind = T::KIND.label(),
            total,
            matched = matched.len(),
            "listed records"
        );
        Ok(matched)
    }

    pub fn find(&self, id: &RecordId) -> Result<Option<T>, DirectoryError> {
        Ok(self.repository.fetch(id)?)
    }

    pub fn get(&self, id: &RecordId) -> Result<T, DirectoryError> {
        self.find(id)?.ok_or_else(|| Self::not_found(id))
    }

    pub fn add(&self, draft: T::Draft) -> Result<T, DirectoryError> {
        let draft = draft.normalized();
        draft.validate()?;

        let record = T::build(self.next_id(), Utc::now(), draft);
        let stored = self.repository.insert(record)?;
        info!(kind = T::KIND.label(), id = %stored.id(), "record created");
        Ok(stored)
    }

    /// Replace every editable field, as the edit form does.
    pub fn update(&self, id: &RecordId, draft: T::Draft) -> Result<T, DirectoryError> {
        let record = self.get(id)?;
        self.store_revision(record, draft)
    }

    /// Merge the supplied fields over the stored record, then validate the result.
    pub fn patch(&self, id: &RecordId, patch: T::Patch) -> Result<T, DirectoryError> {
        let record = self.get(id)?;
        let draft = record.patched(patch);
        self.store_revision(record, draft)
    }

    fn store_revision(&self, mut record: T, draft: T::Draft) -> Result<T, DirectoryError> {
        let draft = draft.normalized();
        draft.validate()?;

        record.apply(draft, Utc::now());
        match self.repository.update(record.clone()) {
            Ok(()) => {}
            Err(RepositoryError::NotFound) => return Err(Self::not_found(record.id())),
            Err(other) => return Err(other.into()),
        }
        info!(kind = T::KIND.label(), id = %record.id(), "record updated");
        Ok(record)
    }

    /// `true` when a record was removed.
    pub fn delete(&self, id: &RecordId) -> Result<bool, DirectoryError> {
        let removed = self.repository.remove(id)?;
        if removed {
            info!(kind = T::KIND.label(), %id, "record deleted");
        }
        Ok(removed)
    }

    pub(crate) fn snapshot(&self) -> Result<Vec<T>, DirectoryError> {
        Ok(self.repository.all()?)
    }
}

/// The directory backing the dashboard: one collection per record kind.
pub struct DirectoryService {
    admins: RecordCollection<Admin>,
    candidates: RecordCollection<Candidate>,
    companies: RecordCollection<Company>,
}

impl DirectoryService {
    pub fn new(
        admins: Arc<dyn RecordRepository<Admin>>,
        candidates: Arc<dyn RecordRepository<Candidate>>,
        companies: Arc<dyn RecordRepository<Company>>,
    ) -> Self {
        Self {
            admins: RecordCollection::new(admins),
            candidates: RecordCollection::new(candidates),
            companies: RecordCollection::new(companies),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryRepository::<Admin>::new()),
            Arc::new(InMemoryRepository::<Candidate>::new()),
            Arc::new(InMemoryRepository::<Company>::new()),
        )
    }

    pub fn admins(&self) -> &RecordCollection<Admin> {
        &self.admins
    }

    pub fn candidates(&self) -> &RecordCollection<Candidate> {
        &self.candidates
    }

    pub fn companies(&self) -> &RecordCollection<Company> {
        &self.companies
    }
}

/// Resolves which collection of the directory holds a record type.
pub trait DirectoryEntry: Searchable {
    fn collection(directory: &DirectoryService) -> &RecordCollection<Self>;
}

impl DirectoryEntry for Admin {
    fn collection(directory: &DirectoryService) -> &RecordCollection<Self> {
        directory.admins()
    }
}

impl DirectoryEntry for Candidate {
    fn collection(directory: &DirectoryService) -> &RecordCollection<Self> {
        directory.candidates()
    }
}

impl DirectoryEntry for Company {
    fn collection(directory: &DirectoryService) -> &RecordCollection<Self> {
        directory.companies()
    }
}

/// Error raised by the directory service.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: RecordId },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
