use std::sync::RwLock;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use super::domain::{
    AuthenticatedSession, LoginRequest, NotificationPreferences, PasswordChange, ProfilePatch,
    SessionToken, SignupRequest, UserProfile,
};
use crate::config::SessionConfig;
use crate::directory::validation::{require, require_email, Validate, ValidationErrors};

const OPERATOR_ID: &str = "1";
const OPERATOR_NAME: &str = "John Doe";
const OPERATOR_ROLE: &str = "Super Admin";
pub const MIN_PASSWORD_LEN: usize = 8;

struct Session {
    token: SessionToken,
    user: UserProfile,
    password: String,
    preferences: NotificationPreferences,
    started_at: DateTime<Utc>,
}

/// Mock single-operator authentication.
///
/// Any well-formed credentials sign in as the dashboard operator. There is at
/// most one live session, holding the operator profile, preferences, and
/// password the way a browser's local storage would; signing in again
/// replaces it and retires the previous token.
pub struct AuthService {
    session: RwLock<Option<Session>>,
    latency: Duration,
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

impl AuthService {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            session: RwLock::new(None),
            latency: config.simulated_latency,
        }
    }

    /// Stand-in for the round trip a real identity backend would cost.
    pub async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    pub fn login(&self, request: LoginRequest) -> Result<AuthenticatedSession, AuthError> {
        request.validate()?;
        let user = UserProfile {
            id: OPERATOR_ID.to_string(),
            name: OPERATOR_NAME.to_string(),
            email: request.email.trim().to_string(),
            role: OPERATOR_ROLE.to_string(),
            avatar: None,
            phone: None,
            title: None,
            bio: None,
        };
        self.open_session(user, request.password)
    }

    pub fn signup(&self, request: SignupRequest) -> Result<AuthenticatedSession, AuthError> {
        request.validate()?;
        let user = UserProfile {
            id: OPERATOR_ID.to_string(),
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            role: OPERATOR_ROLE.to_string(),
            avatar: None,
            phone: None,
            title: None,
            bio: None,
        };
        self.open_session(user, request.password)
    }

    fn open_session(
        &self,
        user: UserProfile,
        password: String,
    ) -> Result<AuthenticatedSession, AuthError> {
        let token = SessionToken(Uuid::new_v4().simple().to_string());
        let session = Session {
            token: token.clone(),
            user: user.clone(),
            password,
            preferences: NotificationPreferences::default(),
            started_at: Utc::now(),
        };

        let mut slot = self.session.write().map_err(|_| poisoned())?;
        let replaced = slot.replace(session).is_some();
        info!(email = %user.email, replaced, "session opened");

        Ok(AuthenticatedSession { token, user })
    }

    /// Unknown tokens are ignored; returns whether a session was closed.
    pub fn logout(&self, token: &SessionToken) -> Result<bool, AuthError> {
        let mut slot = self.session.write().map_err(|_| poisoned())?;
        let owned = slot
            .as_ref()
            .is_some_and(|session| &session.token == token);
        let closed = match owned.then(|| slot.take()).flatten() {
            Some(session) => {
                let duration = Utc::now() - session.started_at;
                info!(
                    email = %session.user.email,
                    minutes = duration.num_minutes(),
                    "session closed"
                );
                true
            }
            None => false,
        };
        Ok(closed)
    }

    pub fn current_user(&self, token: &SessionToken) -> Result<UserProfile, AuthError> {
        self.with_session(token, |session| Ok(session.user.clone()))
    }

    pub fn update_profile(
        &self,
        token: &SessionToken,
        patch: ProfilePatch,
    ) -> Result<UserProfile, AuthError> {
        self.with_session_mut(token, |session| {
            let user = merge_profile(&session.user, patch);
            validate_profile(&user)?;
            session.user = user.clone();
            Ok(user)
        })
    }

    pub fn preferences(&self, token: &SessionToken) -> Result<NotificationPreferences, AuthError> {
        self.with_session(token, |session| Ok(session.preferences))
    }

    pub fn update_preferences(
        &self,
        token: &SessionToken,
        preferences: NotificationPreferences,
    ) -> Result<NotificationPreferences, AuthError> {
        self.with_session_mut(token, |session| {
            session.preferences = preferences;
            Ok(preferences)
        })
    }

    pub fn change_password(
        &self,
        token: &SessionToken,
        change: PasswordChange,
    ) -> Result<(), AuthError> {
        change.validate()?;
        self.with_session_mut(token, |session| {
            if session.password != change.current_password {
                return Err(ValidationErrors::single(
                    "current_password",
                    "Current password is incorrect",
                )
                .into());
            }
            session.password = change.new_password;
            info!(email = %session.user.email, "password changed");
            Ok(())
        })
    }

    /// Zero or one.
    pub fn active_sessions(&self) -> Result<usize, AuthError> {
        let slot = self.session.read().map_err(|_| poisoned())?;
        Ok(usize::from(slot.is_some()))
    }

    fn with_session<R>(
        &self,
        token: &SessionToken,
        read: impl FnOnce(&Session) -> Result<R, AuthError>,
    ) -> Result<R, AuthError> {
        let slot = self.session.read().map_err(|_| poisoned())?;
        let session = slot
            .as_ref()
            .filter(|session| &session.token == token)
            .ok_or(AuthError::Unauthenticated)?;
        read(session)
    }

    fn with_session_mut<R>(
        &self,
        token: &SessionToken,
        write: impl FnOnce(&mut Session) -> Result<R, AuthError>,
    ) -> Result<R, AuthError> {
        let mut slot = self.session.write().map_err(|_| poisoned())?;
        let session = slot
            .as_mut()
            .filter(|session| &session.token == token)
            .ok_or(AuthError::Unauthenticated)?;
        write(session)
    }
}

fn poisoned() -> AuthError {
    AuthError::Unavailable("session lock poisoned".to_string())
}

fn merge_profile(current: &UserProfile, patch: ProfilePatch) -> UserProfile {
    let optional = |value: Option<String>, existing: &Option<String>| match value {
        Some(value) if value.trim().is_empty() => None,
        Some(value) => Some(value.trim().to_string()),
        None => existing.clone(),
    };

    UserProfile {
        id: current.id.clone(),
        name: patch
            .name
            .map(|name| name.trim().to_string())
            .unwrap_or_else(|| current.name.clone()),
        email: patch
            .email
            .map(|email| email.trim().to_string())
            .unwrap_or_else(|| current.email.clone()),
        role: current.role.clone(),
        avatar: optional(patch.avatar, &current.avatar),
        phone: optional(patch.phone, &current.phone),
        title: optional(patch.title, &current.title),
        bio: optional(patch.bio, &current.bio),
    }
}

fn validate_profile(user: &UserProfile) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    require(&mut errors, "name", &user.name, "Name is required");
    require_email(&mut errors, "email", &user.email);
    errors.into_result()
}

fn check_new_password(errors: &mut ValidationErrors, field: &'static str, password: &str) {
    if password.is_empty() {
        errors.add(field, "New password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(field, "Password must be at least 8 characters");
    }
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_email(&mut errors, "email", &self.email);
        if self.password.is_empty() {
            errors.add("password", "Password is required");
        }
        errors.into_result()
    }
}

impl Validate for SignupRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "name", &self.name, "Name is required");
        require_email(&mut errors, "email", &self.email);
        if self.password.is_empty() {
            errors.add("password", "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.add("password", "Password must be at least 8 characters");
        }
        errors.into_result()
    }
}

impl Validate for PasswordChange {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.current_password.is_empty() {
            errors.add("current_password", "Current password is required");
        }
        check_new_password(&mut errors, "new_password", &self.new_password);
        if self.new_password != self.confirm_password {
            errors.add("confirm_password", "Passwords do not match");
        }
        errors.into_result()
    }
}

/// Error raised by the authentication service.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("authentication required")]
    Unauthenticated,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
