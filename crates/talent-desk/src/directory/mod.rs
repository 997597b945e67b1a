//! Admin, candidate, and company records: storage, search, submit-time
//! validation, and the HTTP surface the dashboard pages call.

pub mod dashboard;
pub mod domain;
pub mod repository;
pub mod router;
pub mod search;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use dashboard::{
    ActivityAction, ActivityEntry, CollectionStats, DashboardSummary, PipelineEntry,
    DEFAULT_RECENT_ACTIVITY,
};
pub use domain::{
    ActivityStatus, Admin, AdminDraft, AdminPatch, Candidate, CandidateDraft, CandidatePatch,
    CandidateStatus, Company, CompanyDraft, CompanyPatch, CompanySize, Record, RecordId,
    RecordKind,
};
pub use repository::{InMemoryRepository, RecordRepository, RepositoryError};
pub use router::directory_router;
pub use search::{ListQuery, Searchable};
pub use service::{DirectoryEntry, DirectoryError, DirectoryService, RecordCollection};
pub use validation::{Validate, ValidationErrors};
