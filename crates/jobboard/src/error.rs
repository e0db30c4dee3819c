use crate::config::ConfigError;
use crate::identity::password::PasswordError;
use crate::policy::PolicyViolation;
use crate::session::SessionError;
use crate::storage::StorageError;
use crate::store::RepositoryError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// Process-level failures surfaced by the binary.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Board(BoardError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Board(err) => write!(f, "job board error: {}", err),
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
            AppError::Board(err) => Some(err),
        }
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

impl From<BoardError> for AppError {
    fn from(value: BoardError) -> Self {
        Self::Board(value)
    }
}

/// Request-level failure taxonomy. Every variant carries the message shown to the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

impl BoardError {
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            BoardError::Conflict(_) => StatusCode::CONFLICT,
            BoardError::Forbidden(_) => StatusCode::FORBIDDEN,
            BoardError::NotFound(_) => StatusCode::NOT_FOUND,
            BoardError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            BoardError::BadRequest(_) => StatusCode::BAD_REQUEST,
            BoardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<RepositoryError> for BoardError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Conflict(message) => Self::Conflict(message),
            RepositoryError::NotFound => Self::NotFound("record not found".to_string()),
            RepositoryError::Unavailable(_) => Self::Internal(value.to_string()),
        }
    }
}

impl From<StorageError> for BoardError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::UnsupportedType { .. } | StorageError::Empty => {
                Self::BadRequest(value.to_string())
            }
            StorageError::NotFound(_) => Self::NotFound(value.to_string()),
            StorageError::Transport(_) => Self::Internal(value.to_string()),
        }
    }
}

impl From<PasswordError> for BoardError {
    fn from(value: PasswordError) -> Self {
        match value {
            PasswordError::Length { .. } => Self::BadRequest(value.to_string()),
            PasswordError::Hashing(_) => Self::Internal(value.to_string()),
        }
    }
}

impl From<SessionError> for BoardError {
    fn from(value: SessionError) -> Self {
        match value {
            SessionError::MissingToken => Self::Unauthorized(value.to_string()),
            SessionError::InvalidToken(_) => {
                Self::Unauthorized("Not authorized, token failed".to_string())
            }
            SessionError::Encoding(_) => Self::Internal(value.to_string()),
        }
    }
}

impl From<PolicyViolation> for BoardError {
    fn from(value: PolicyViolation) -> Self {
        Self::Forbidden(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_http_statuses() {
        assert_eq!(BoardError::conflict("x").status(), StatusCode::CONFLICT);
        assert_eq!(BoardError::forbidden("x").status(), StatusCode::FORBIDDEN);
        assert_eq!(BoardError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            BoardError::unauthorized("x").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(BoardError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            BoardError::internal("x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn response_body_carries_message_verbatim() {
        let response = BoardError::forbidden("Only recruiters can post jobs").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .expect("read body");
        let payload: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
        assert_eq!(payload["error"], "Only recruiters can post jobs");
    }

    #[test]
    fn repository_conflict_becomes_conflict() {
        let error: BoardError = RepositoryError::Conflict("User already exists".to_string()).into();
        assert_eq!(error, BoardError::conflict("User already exists"));

        let error: BoardError = RepositoryError::Unavailable("offline".to_string()).into();
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
