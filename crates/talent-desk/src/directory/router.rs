use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::dashboard::{DashboardSummary, DEFAULT_RECENT_ACTIVITY};
use super::domain::{Admin, Candidate, Company, Record, RecordId};
use super::search::ListQuery;
use super::service::{DirectoryEntry, DirectoryError, DirectoryService};
use crate::auth::{require_session, AuthService};
use crate::error::AppError;
use crate::extract::{JsonBody, QueryParams};

/// Router builder exposing the dashboard and the three record collections.
/// Every route sits behind the session guard.
pub fn directory_router(directory: Arc<DirectoryService>, auth: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/v1/dashboard", get(dashboard_handler))
        .merge(collection_routes::<Admin>("/api/v1/admins"))
        .merge(collection_routes::<Candidate>("/api/v1/candidates"))
        .merge(collection_routes::<Company>("/api/v1/companies"))
        .route_layer(middleware::from_fn_with_state(auth, require_session))
        .with_state(directory)
}

fn collection_routes<T: DirectoryEntry>(base: &str) -> Router<Arc<DirectoryService>> {
    Router::new()
        .route(base, get(list_handler::<T>).post(create_handler::<T>))
        .route(
            &format!("{base}/:id"),
            get(show_handler::<T>)
                .put(update_handler::<T>)
                .patch(patch_handler::<T>)
                .delete(delete_handler::<T>),
        )
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub total: usize,
    pub items: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub recent: Option<usize>,
}

fn not_found<T: Record>(id: RecordId) -> AppError {
    DirectoryError::NotFound {
        kind: T::KIND.label(),
        id,
    }
    .into()
}

pub(crate) async fn dashboard_handler(
    State(directory): State<Arc<DirectoryService>>,
    QueryParams(query): QueryParams<DashboardQuery>,
) -> Result<Json<DashboardSummary>, AppError> {
    let limit = query.recent.unwrap_or(DEFAULT_RECENT_ACTIVITY);
    Ok(Json(directory.dashboard(limit)?))
}

pub(crate) async fn list_handler<T: DirectoryEntry>(
    State(directory): State<Arc<DirectoryService>>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Result<Json<ListResponse<T>>, AppError> {
    let items = T::collection(&directory).list(&query)?;
    Ok(Json(ListResponse {
        total: items.len(),
        items,
    }))
}

pub(crate) async fn show_handler<T: DirectoryEntry>(
    State(directory): State<Arc<DirectoryService>>,
    Path(id): Path<String>,
) -> Result<Json<T>, AppError> {
    Ok(Json(T::collection(&directory).get(&RecordId(id))?))
}

pub(crate) async fn create_handler<T: DirectoryEntry>(
    State(directory): State<Arc<DirectoryService>>,
    JsonBody(draft): JsonBody<T::Draft>,
) -> Result<(StatusCode, Json<T>), AppError> {
    let record = T::collection(&directory).add(draft)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub(crate) async fn update_handler<T: DirectoryEntry>(
    State(directory): State<Arc<DirectoryService>>,
    Path(id): Path<String>,
    JsonBody(draft): JsonBody<T::Draft>,
) -> Result<Json<T>, AppError> {
    Ok(Json(T::collection(&directory).update(&RecordId(id), draft)?))
}

pub(crate) async fn patch_handler<T: DirectoryEntry>(
    State(directory): State<Arc<DirectoryService>>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<T::Patch>,
) -> Result<Json<T>, AppError> {
    Ok(Json(T::collection(&directory).patch(&RecordId(id), patch)?))
}

pub(crate) async fn delete_handler<T: DirectoryEntry>(
    State(directory): State<Arc<DirectoryService>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = RecordId(id);
    if T::collection(&directory).delete(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found::<T>(id))
    }
}
