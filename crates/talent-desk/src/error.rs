use std::fmt;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

use crate::auth::AuthError;
use crate::config::ConfigError;
use crate::directory::{DirectoryError, RepositoryError, ValidationErrors};
use crate::telemetry::TelemetryError;

/// Application-wide failure. Handlers return it directly; the binary reports
/// it on exit.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Directory(DirectoryError),
    Auth(AuthError),
    Body(JsonRejection),
    Query(QueryRejection),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Directory(DirectoryError::Validation(_))
            | AppError::Auth(AuthError::Validation(_))
            | AppError::Body(JsonRejection::JsonDataError(_))
            | AppError::Query(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Body(rejection) => rejection.status(),
            AppError::Directory(DirectoryError::NotFound { .. })
            | AppError::Directory(DirectoryError::Repository(RepositoryError::NotFound)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Directory(DirectoryError::Repository(RepositoryError::Conflict)) => {
                StatusCode::CONFLICT
            }
            AppError::Auth(AuthError::Unauthenticated) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Per-field messages for the form that produced this error, if any.
    pub fn field_errors(&self) -> Option<ValidationErrors> {
        match self {
            AppError::Directory(DirectoryError::Validation(errors))
            | AppError::Auth(AuthError::Validation(errors)) => Some(errors.clone()),
            AppError::Body(rejection @ JsonRejection::JsonDataError(_)) => {
                Some(ValidationErrors::single("body", rejection.body_text()))
            }
            AppError::Query(rejection) => {
                Some(ValidationErrors::single("query", rejection.body_text()))
            }
            _ => None,
        }
    }

    /// Message shown to HTTP clients, without the process-level prefix.
    fn client_message(&self) -> String {
        match self {
            AppError::Directory(err) => err.to_string(),
            AppError::Auth(err) => err.to_string(),
            AppError::Body(rejection) => rejection.body_text(),
            AppError::Query(rejection) => rejection.body_text(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Directory(err) => write!(f, "directory error: {}", err),
            AppError::Auth(err) => write!(f, "auth error: {}", err),
            AppError::Body(err) => write!(f, "invalid request body: {}", err.body_text()),
            AppError::Query(err) => write!(f, "invalid query string: {}", err.body_text()),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Directory(err) => Some(err),
            AppError::Auth(err) => Some(err),
            AppError::Body(err) => Some(err),
            AppError::Query(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(error = %self, "request failed");
        }

        let body = match self.field_errors() {
            Some(fields) => json!({ "error": self.client_message(), "fields": fields }),
            None => json!({ "error": self.client_message() }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<DirectoryError> for AppError {
    fn from(value: DirectoryError) -> Self {
        Self::Directory(value)
    }
}

impl From<AuthError> for AppError {
    fn from(value: AuthError) -> Self {
        Self::Auth(value)
    }
}

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        Self::Body(value)
    }
}

impl From<QueryRejection> for AppError {
    fn from(value: QueryRejection) -> Self {
        Self::Query(value)
    }
}
