use std::sync::Arc;

use super::common::{
    admin_draft, candidate_draft, company_draft, ConflictRepository, UnavailableRepository,
};
use crate::directory::domain::{
    ActivityStatus, Admin, Candidate, CandidatePatch, CandidateStatus, Company, CompanyPatch,
    RecordId,
};
use crate::directory::repository::{InMemoryRepository, RecordRepository, RepositoryError};
use crate::directory::search::ListQuery;
use crate::directory::service::{DirectoryError, DirectoryService, RecordCollection};

#[test]
fn add_assigns_sequential_ids_per_collection() {
    let directory = DirectoryService::in_memory();

    let first = directory.admins().add(admin_draft()).expect("admin stored");
    let second = directory.admins().add(admin_draft()).expect("admin stored");
    let candidate = directory
        .candidates()
        .add(candidate_draft())
        .expect("candidate stored");
    let company = directory
        .companies()
        .add(company_draft())
        .expect("company stored");

    assert_eq!(first.id.as_str(), "adm-000001");
    assert_eq!(second.id.as_str(), "adm-000002");
    assert_eq!(candidate.id.as_str(), "cand-000001");
    assert_eq!(company.id.as_str(), "comp-000001");
    assert!(first.updated_at.is_none());
}

#[test]
fn add_normalizes_before_storing() {
    let directory = DirectoryService::in_memory();
    let mut draft = candidate_draft();
    draft.name = "  Alan Turing ".to_string();
    draft.location = Some("   ".to_string());

    let stored = directory.candidates().add(draft).expect("candidate stored");

    assert_eq!(stored.name, "Alan Turing");
    assert_eq!(stored.location, None);
}

#[test]
fn add_rejects_invalid_drafts_without_storing() {
    let directory = DirectoryService::in_memory();
    let mut draft = admin_draft();
    draft.email = "not-an-email".to_string();
    draft.designation.clear();

    let err = directory.admins().add(draft).expect_err("invalid admin");
    match err {
        DirectoryError::Validation(errors) => {
            assert_eq!(errors.len(), 2);
            assert_eq!(errors.get("email"), Some("Email is invalid"));
            assert_eq!(errors.get("designation"), Some("Designation is required"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    let listed = directory
        .admins()
        .list(&ListQuery::default())
        .expect("list admins");
    assert!(listed.is_empty());
}

#[test]
fn update_replaces_fields_and_stamps_revision() {
    let directory = DirectoryService::in_memory();
    let stored = directory
        .companies()
        .add(company_draft())
        .expect("company stored");

    let mut revision = company_draft();
    revision.name = "Bletchley Park Trust".to_string();
    revision.website = None;
    revision.status = ActivityStatus::Inactive;
    let updated = directory
        .companies()
        .update(&stored.id, revision)
        .expect("company updated");

    assert_eq!(updated.id, stored.id);
    assert_eq!(updated.created_at, stored.created_at);
    assert_eq!(updated.name, "Bletchley Park Trust");
    assert_eq!(updated.website, None);
    assert!(updated.updated_at.is_some());

    let fetched = directory.companies().get(&stored.id).expect("company fetched");
    assert_eq!(fetched.status, ActivityStatus::Inactive);
}

#[test]
fn update_of_unknown_record_reports_not_found_before_validation() {
    let directory = DirectoryService::in_memory();
    let mut draft = company_draft();
    draft.name.clear();

    let err = directory
        .companies()
        .update(&RecordId("comp-999999".to_string()), draft)
        .expect_err("missing company");
    assert!(matches!(err, DirectoryError::NotFound { kind: "Company", .. }));
    assert_eq!(err.to_string(), "Company comp-999999 not found");
}

#[test]
fn patch_merges_supplied_fields_only() {
    let directory = DirectoryService::in_memory();
    let stored = directory
        .candidates()
        .add(candidate_draft())
        .expect("candidate stored");

    let patched = directory
        .candidates()
        .patch(
            &stored.id,
            CandidatePatch {
                status: Some(CandidateStatus::Hired),
                ..CandidatePatch::default()
            },
        )
        .expect("candidate patched");

    assert_eq!(patched.status, CandidateStatus::Hired);
    assert_eq!(patched.name, stored.name);
    assert_eq!(patched.skills, stored.skills);
    assert!(patched.updated_at.is_some());
}

#[test]
fn patch_validates_the_merged_record() {
    let directory = DirectoryService::in_memory();
    let stored = directory
        .companies()
        .add(company_draft())
        .expect("company stored");

    let err = directory
        .companies()
        .patch(
            &stored.id,
            CompanyPatch {
                phone: Some("call reception".to_string()),
                ..CompanyPatch::default()
            },
        )
        .expect_err("bad phone");
    match err {
        DirectoryError::Validation(errors) => {
            assert_eq!(errors.get("phone"), Some("Invalid phone number"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let unchanged = directory.companies().get(&stored.id).expect("company");
    assert_eq!(unchanged.phone, stored.phone);
    assert!(unchanged.updated_at.is_none());
}

#[test]
fn delete_reports_whether_a_record_was_removed() {
    let directory = DirectoryService::in_memory();
    let stored = directory.admins().add(admin_draft()).expect("admin stored");

    assert!(directory.admins().delete(&stored.id).expect("delete"));
    assert!(!directory.admins().delete(&stored.id).expect("second delete"));
    assert!(directory.admins().find(&stored.id).expect("find").is_none());
}

#[test]
fn deleted_ids_are_not_reused() {
    let directory = DirectoryService::in_memory();
    let first = directory.admins().add(admin_draft()).expect("admin stored");
    directory.admins().delete(&first.id).expect("delete");

    let next = directory.admins().add(admin_draft()).expect("admin stored");
    assert_eq!(next.id.as_str(), "adm-000002");
}

#[test]
fn list_filters_by_term_and_status() {
    let directory = DirectoryService::in_memory();
    directory
        .candidates()
        .add(candidate_draft())
        .expect("candidate stored");
    let mut other = candidate_draft();
    other.name = "Grace Hopper".to_string();
    other.email = "grace@example.com".to_string();
    other.location = Some("Arlington".to_string());
    other.skills = vec!["COBOL".to_string()];
    other.status = CandidateStatus::New;
    directory.candidates().add(other).expect("candidate stored");

    let by_skill = directory
        .candidates()
        .list(&ListQuery::search("cobol"))
        .expect("list");
    assert_eq!(by_skill.len(), 1);
    assert_eq!(by_skill[0].name, "Grace Hopper");

    let by_status = directory
        .candidates()
        .list(&ListQuery::default().with_status("INTERVIEW"))
        .expect("list");
    assert_eq!(by_status.len(), 1);
    assert_eq!(by_status[0].name, "Alan Turing");

    let unknown = directory
        .candidates()
        .list(&ListQuery::default().with_status("archived"))
        .expect("list");
    assert!(unknown.is_empty());
}

#[test]
fn repository_conflicts_surface_as_repository_errors() {
    let admins: Arc<dyn RecordRepository<Admin>> = Arc::new(ConflictRepository::default());
    let collection = RecordCollection::new(admins);

    let err = collection.add(admin_draft()).expect_err("conflict");
    assert!(matches!(
        err,
        DirectoryError::Repository(RepositoryError::Conflict)
    ));
}

#[test]
fn unavailable_store_propagates_from_every_operation() {
    let directory = DirectoryService::new(
        Arc::new(UnavailableRepository::<Admin>::default()),
        Arc::new(InMemoryRepository::<Candidate>::new()),
        Arc::new(InMemoryRepository::<Company>::new()),
    );
    let id = RecordId("adm-000001".to_string());

    assert!(matches!(
        directory.admins().add(admin_draft()),
        Err(DirectoryError::Repository(RepositoryError::Unavailable(_)))
    ));
    assert!(matches!(
        directory.admins().list(&ListQuery::default()),
        Err(DirectoryError::Repository(RepositoryError::Unavailable(_)))
    ));
    assert!(matches!(
        directory.admins().delete(&id),
        Err(DirectoryError::Repository(RepositoryError::Unavailable(_)))
    ));
    assert!(directory.dashboard(5).is_err());

    directory
        .candidates()
        .add(candidate_draft())
        .expect("other collections keep working");
}
