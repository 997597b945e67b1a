//! Mock operator authentication, profile, and account settings.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{
    ActiveSession, AuthenticatedSession, LoginRequest, NotificationPreferences, PasswordChange,
    ProfilePatch, SessionToken, SignupRequest, UserProfile,
};
pub use router::{auth_router, bearer_token, require_session};
pub use service::{AuthError, AuthService};
