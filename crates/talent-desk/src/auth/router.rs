use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};

use super::domain::{
    ActiveSession, AuthenticatedSession, LoginRequest, NotificationPreferences, PasswordChange,
    ProfilePatch, SessionToken, SignupRequest, UserProfile,
};
use super::service::{AuthError, AuthService};
use crate::error::AppError;
use crate::extract::JsonBody;

/// Router builder for sign-in, profile, and settings endpoints.
pub fn auth_router(auth: Arc<AuthService>) -> Router {
    let protected = Router::new()
        .route("/api/v1/auth/me", get(me_handler).patch(update_profile_handler))
        .route(
            "/api/v1/settings/preferences",
            get(preferences_handler).put(update_preferences_handler),
        )
        .route("/api/v1/settings/password", post(change_password_handler))
        .route_layer(middleware::from_fn_with_state(auth.clone(), require_session));

    Router::new()
        .route("/api/v1/auth/login", post(login_handler))
        .route("/api/v1/auth/signup", post(signup_handler))
        .route("/api/v1/auth/logout", post(logout_handler))
        .merge(protected)
        .with_state(auth)
}

pub fn bearer_token(headers: &HeaderMap) -> Option<SessionToken> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(SessionToken(token.to_string()))
    }
}

/// Rejects requests without a live session and attaches [`ActiveSession`] otherwise.
pub async fn require_session(
    State(auth): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()) else {
        return AppError::from(AuthError::Unauthenticated).into_response();
    };

    match auth.current_user(&token) {
        Ok(user) => {
            request
                .extensions_mut()
                .insert(ActiveSession { token, user });
            next.run(request).await
        }
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn login_handler(
    State(auth): State<Arc<AuthService>>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<AuthenticatedSession>, AppError> {
    auth.simulate_latency().await;
    Ok(Json(auth.login(request)?))
}

pub(crate) async fn signup_handler(
    State(auth): State<Arc<AuthService>>,
    JsonBody(request): JsonBody<SignupRequest>,
) -> Result<(StatusCode, Json<AuthenticatedSession>), AppError> {
    auth.simulate_latency().await;
    let session = auth.signup(request)?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub(crate) async fn logout_handler(
    State(auth): State<Arc<AuthService>>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    if let Some(token) = bearer_token(&headers) {
        auth.logout(&token)?;
    }
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn me_handler(Extension(session): Extension<ActiveSession>) -> Json<UserProfile> {
    Json(session.user)
}

pub(crate) async fn update_profile_handler(
    State(auth): State<Arc<AuthService>>,
    Extension(session): Extension<ActiveSession>,
    JsonBody(patch): JsonBody<ProfilePatch>,
) -> Result<Json<UserProfile>, AppError> {
    auth.simulate_latency().await;
    Ok(Json(auth.update_profile(&session.token, patch)?))
}

pub(crate) async fn preferences_handler(
    State(auth): State<Arc<AuthService>>,
    Extension(session): Extension<ActiveSession>,
) -> Result<Json<NotificationPreferences>, AppError> {
    Ok(Json(auth.preferences(&session.token)?))
}

pub(crate) async fn update_preferences_handler(
    State(auth): State<Arc<AuthService>>,
    Extension(session): Extension<ActiveSession>,
    JsonBody(preferences): JsonBody<NotificationPreferences>,
) -> Result<Json<NotificationPreferences>, AppError> {
    Ok(Json(auth.update_preferences(&session.token, preferences)?))
}

pub(crate) async fn change_password_handler(
    State(auth): State<Arc<AuthService>>,
    Extension(session): Extension<ActiveSession>,
    JsonBody(change): JsonBody<PasswordChange>,
) -> Result<StatusCode, AppError> {
    auth.change_password(&session.token, change)?;
    Ok(StatusCode::NO_CONTENT)
}
