use std::marker::PhantomData;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request};
use axum::response::Response;
use serde_json::Value;

use crate::auth::{AuthService, LoginRequest, SessionToken};
use crate::directory::domain::{
    ActivityStatus, AdminDraft, CandidateDraft, CandidateStatus, CompanyDraft, CompanySize,
    Record, RecordId,
};
use crate::directory::repository::{RecordRepository, RepositoryError};
use crate::directory::{directory_router, DirectoryService};

pub(super) fn admin_draft() -> AdminDraft {
    AdminDraft {
        full_name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        role: "Admin".to_string(),
        whatsapp_number: Some("+44 20 7946 0018".to_string()),
        employee_id: "EMP-1815".to_string(),
        designation: "Analytical Lead".to_string(),
        office_address: Some("12 St James's Square, London".to_string()),
        profile_image_url: None,
        status: ActivityStatus::Active,
    }
}

pub(super) fn candidate_draft() -> CandidateDraft {
    CandidateDraft {
        name: "Alan Turing".to_string(),
        email: "alan@example.com".to_string(),
        phone: "+44 161 496 0000".to_string(),
        location: Some("Manchester".to_string()),
        status: CandidateStatus::Interview,
        skills: vec!["Cryptanalysis".to_string(), "Mathematics".to_string()],
    }
}

pub(super) fn company_draft() -> CompanyDraft {
    CompanyDraft {
        name: "Bletchley Systems".to_string(),
        industry: "Computing".to_string(),
        founded: Some("1938".to_string()),
        website: Some("https://bletchley.example".to_string()),
        email: Some("hello@bletchley.example".to_string()),
        phone: Some("+44 1908 640404".to_string()),
        address: Some("Milton Keynes".to_string()),
        size: CompanySize::Large,
        status: ActivityStatus::Active,
    }
}

pub(super) struct ConflictRepository<T>(PhantomData<T>);

impl<T> Default for ConflictRepository<T> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<T: Record> RecordRepository<T> for ConflictRepository<T> {
    fn insert(&self, _record: T) -> Result<T, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: T) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &RecordId) -> Result<Option<T>, RepositoryError> {
        Ok(None)
    }

    fn remove(&self, _id: &RecordId) -> Result<bool, RepositoryError> {
        Ok(false)
    }

    fn all(&self) -> Result<Vec<T>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository<T>(PhantomData<T>);

impl<T> Default for UnavailableRepository<T> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<T: Record> RecordRepository<T> for UnavailableRepository<T> {
    fn insert(&self, _record: T) -> Result<T, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _record: T) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &RecordId) -> Result<Option<T>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn remove(&self, _id: &RecordId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn all(&self) -> Result<Vec<T>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) fn signed_in() -> (Arc<AuthService>, SessionToken) {
    let auth = Arc::new(AuthService::default());
    let session = auth
        .login(LoginRequest {
            email: "ops@example.com".to_string(),
            password: "hunter22".to_string(),
        })
        .expect("login succeeds");
    (auth, session.token)
}

pub(super) fn router_for(directory: Arc<DirectoryService>) -> (axum::Router, SessionToken) {
    let (auth, token) = signed_in();
    (directory_router(directory, auth), token)
}

pub(super) fn authed(
    method: &str,
    uri: &str,
    token: &SessionToken,
    body: Option<Value>,
) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token.as_str()));
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("encode body")))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
