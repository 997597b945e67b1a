use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::{admin_draft, authed, read_json_body, router_for, UnavailableRepository};
use crate::directory::domain::{ActivityStatus, Admin, Candidate, Company};
use crate::directory::repository::InMemoryRepository;
use crate::directory::service::DirectoryService;

#[tokio::test]
async fn collection_routes_require_a_session() {
    let (router, _token) = router_for(Arc::new(DirectoryService::in_memory()));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/candidates")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_then_fetch_candidate() {
    let (router, token) = router_for(Arc::new(DirectoryService::in_memory()));

    let created = router
        .clone()
        .oneshot(authed(
            "POST",
            "/api/v1/candidates",
            &token,
            Some(json!({
                "name": "Barbara Liskov",
                "email": "barbara@example.com",
                "phone": "+1 617 253 0000",
                "location": "Cambridge, MA",
                "status": "screening",
                "skills": ["Abstraction", "Distributed systems"]
            })),
        ))
        .await
        .expect("response");
    assert_eq!(created.status(), StatusCode::CREATED);
    let payload = read_json_body(created).await;
    assert_eq!(payload["id"], "cand-000001");
    assert_eq!(payload["status"], "screening");

    let fetched = router
        .oneshot(authed("GET", "/api/v1/candidates/cand-000001", &token, None))
        .await
        .expect("response");
    assert_eq!(fetched.status(), StatusCode::OK);
    let payload = read_json_body(fetched).await;
    assert_eq!(payload["name"], "Barbara Liskov");
    assert_eq!(payload["skills"][1], "Distributed systems");
}

#[tokio::test]
async fn create_reports_field_errors() {
    let (router, token) = router_for(Arc::new(DirectoryService::in_memory()));

    let response = router
        .oneshot(authed(
            "POST",
            "/api/v1/companies",
            &token,
            Some(json!({ "industry": "Robotics", "email": "sales@" })),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["fields"]["name"], "Company name is required");
    assert_eq!(payload["fields"]["email"], "Email is invalid");
}

#[tokio::test]
async fn list_applies_search_and_status_filters() {
    let directory = Arc::new(DirectoryService::in_memory());
    directory.admins().add(admin_draft()).expect("admin");
    let mut other = admin_draft();
    other.full_name = "Edsger Dijkstra".to_string();
    other.email = "edsger@example.com".to_string();
    other.status = ActivityStatus::Inactive;
    directory.admins().add(other).expect("admin");
    let (router, token) = router_for(directory);

    let response = router
        .clone()
        .oneshot(authed("GET", "/api/v1/admins?q=DIJKSTRA", &token, None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total"], 1);
    assert_eq!(payload["items"][0]["full_name"], "Edsger Dijkstra");

    let response = router
        .oneshot(authed("GET", "/api/v1/admins?status=active", &token, None))
        .await
        .expect("response");
    let payload = read_json_body(response).await;
    assert_eq!(payload["total"], 1);
    assert_eq!(payload["items"][0]["full_name"], "Ada Lovelace");
}

#[tokio::test]
async fn patch_and_put_update_records() {
    let directory = Arc::new(DirectoryService::in_memory());
    let stored = directory.admins().add(admin_draft()).expect("admin");
    let (router, token) = router_for(directory);
    let uri = format!("/api/v1/admins/{}", stored.id);

    let patched = router
        .clone()
        .oneshot(authed(
            "PATCH",
            &uri,
            &token,
            Some(json!({ "designation": "Chief Analyst" })),
        ))
        .await
        .expect("response");
    assert_eq!(patched.status(), StatusCode::OK);
    let payload = read_json_body(patched).await;
    assert_eq!(payload["designation"], "Chief Analyst");
    assert_eq!(payload["email"], "ada@example.com");

    let replaced = router
        .oneshot(authed(
            "PUT",
            &uri,
            &token,
            Some(json!({
                "full_name": "Ada King",
                "email": "ada.king@example.com",
                "role": "Super Admin",
                "employee_id": "EMP-1815",
                "designation": "Countess",
                "status": "inactive"
            })),
        ))
        .await
        .expect("response");
    assert_eq!(replaced.status(), StatusCode::OK);
    let payload = read_json_body(replaced).await;
    assert_eq!(payload["full_name"], "Ada King");
    assert_eq!(payload["status"], "inactive");
    assert!(payload.get("whatsapp_number").map_or(true, |value| value.is_null()));
}

#[tokio::test]
async fn unknown_records_return_not_found() {
    let (router, token) = router_for(Arc::new(DirectoryService::in_memory()));

    let response = router
        .clone()
        .oneshot(authed("GET", "/api/v1/companies/comp-000042", &token, None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "Company comp-000042 not found");

    let response = router
        .oneshot(authed("DELETE", "/api/v1/companies/comp-000042", &token, None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_returns_no_content() {
    let directory = Arc::new(DirectoryService::in_memory());
    let stored = directory.admins().add(admin_draft()).expect("admin");
    let (router, token) = router_for(Arc::clone(&directory));

    let response = router
        .oneshot(authed(
            "DELETE",
            &format!("/api/v1/admins/{}", stored.id),
            &token,
            None,
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(directory.admins().find(&stored.id).expect("find").is_none());
}

#[tokio::test]
async fn dashboard_honours_recent_limit() {
    let directory = Arc::new(DirectoryService::in_memory());
    for _ in 0..3 {
        directory.admins().add(admin_draft()).expect("admin");
    }
    let (router, token) = router_for(directory);

    let response = router
        .oneshot(authed("GET", "/api/v1/dashboard?recent=2", &token, None))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["admins"]["total"], 3);
    assert_eq!(payload["recent_activity"].as_array().map(Vec::len), Some(2));
    assert_eq!(payload["candidate_pipeline"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn repository_failures_map_to_server_error() {
    let directory = Arc::new(DirectoryService::new(
        Arc::new(InMemoryRepository::<Admin>::new()),
        Arc::new(UnavailableRepository::<Candidate>::default()),
        Arc::new(InMemoryRepository::<Company>::new()),
    ));
    let (router, token) = router_for(directory);

    let response = router
        .oneshot(authed("GET", "/api/v1/candidates", &token, None))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "repository unavailable: store offline");
}

#[tokio::test]
async fn unknown_enum_values_return_field_errors() {
    let (router, token) = router_for(Arc::new(DirectoryService::in_memory()));

    let response = router
        .clone()
        .oneshot(authed(
            "POST",
            "/api/v1/companies",
            &token,
            Some(json!({ "name": "Acme", "status": "archived" })),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    let message = payload["fields"]["body"].as_str().expect("body message");
    assert!(message.contains("unknown variant `archived`"), "{message}");

    let response = router
        .oneshot(authed(
            "POST",
            "/api/v1/companies",
            &token,
            Some(json!({ "name": "Acme", "size": "5000+" })),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"].as_str().is_some());
    assert!(payload["fields"]["body"].as_str().is_some());
}

#[tokio::test]
async fn malformed_query_and_body_answer_with_json() {
    let (router, token) = router_for(Arc::new(DirectoryService::in_memory()));

    let response = router
        .clone()
        .oneshot(authed("GET", "/api/v1/dashboard?recent=abc", &token, None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["fields"]["query"].as_str().is_some());

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/admins")
                .header("authorization", format!("Bearer {}", token.as_str()))
                .header("content-type", "application/json")
                .body(Body::from("{\"full_name\": "))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"].as_str().is_some());
    assert!(payload.get("fields").is_none());
}
