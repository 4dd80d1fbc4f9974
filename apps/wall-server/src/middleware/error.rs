//! Error handling - RFC 7807 compliant responses.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use wall_core::error::{DomainError, RepoError};
use wall_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Rejected(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Rejected(msg) => write!(f, "Rejected: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Rejected(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Rejected(detail) => ErrorResponse::post_rejected(detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Rejected(kind) => AppError::Rejected(kind.to_string()),
            DomainError::Storage(e) => e.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use wall_core::AbuseKind;

    #[test]
    fn test_domain_errors_map_to_status() {
        let validation: AppError = DomainError::Validation("Message text is required".into()).into();
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);

        let rejected: AppError = DomainError::Rejected(AbuseKind::RepeatedWords).into();
        assert_eq!(rejected.status_code(), StatusCode::BAD_REQUEST);
        assert!(rejected.to_string().contains("same word"));

        let storage: AppError = DomainError::Storage(RepoError::Query("boom".into())).into();
        assert_eq!(storage.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        // storage details never leak into the response
        assert_eq!(storage.to_string(), "Internal error: Database error");
    }
}
