//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use messenger_common::AppError;
use messenger_core::{DomainError, ErrorKind};
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation, including rejected actor checks
    Domain(DomainError),

    /// Application error (configuration, database bootstrap)
    App(AppError),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Validation error
    Validation(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl fmt::Display) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Coarse category, matching `DomainError::kind` for domain failures
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(e) => e.kind(),
            Self::App(_) | Self::Internal(_) => ErrorKind::Internal,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::InvalidArgument,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::App(e) => e.status_code(),
            _ => match self.kind() {
                ErrorKind::InvalidArgument => 400,
                ErrorKind::PermissionDenied => 403,
                ErrorKind::NotFound => 404,
                ErrorKind::AlreadyExists => 409,
                ErrorKind::Internal => 500,
            },
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check whether the acting user was refused
    pub fn is_permission_denied(&self) -> bool {
        self.kind() == ErrorKind::PermissionDenied
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        Self::App(AppError::Database(err.to_string()))
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::NotFound { resource, id } => {
                AppError::NotFound(format!("{resource} {id}"))
            }
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use messenger_core::Snowflake;

    #[test]
    fn test_not_found_error() {
        let err = ServiceError::not_found("Group", 123);
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(err.to_string().contains("Group not found: 123"));
    }

    #[test]
    fn test_validation_error() {
        let err = ServiceError::validation("pool is required");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_domain_errors_keep_their_kind() {
        let err = ServiceError::from(DomainError::NotMessageSender);
        assert_eq!(err.status_code(), 403);
        assert!(err.is_permission_denied());

        let err = ServiceError::from(DomainError::UsernameTaken("luigi".to_string()));
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);

        let err = ServiceError::from(DomainError::MessageNotFound(Snowflake::new(9)));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(!err.is_permission_denied());
    }

    #[test]
    fn test_database_error_is_internal() {
        let err = ServiceError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "DATABASE_ERROR");
    }

    #[test]
    fn test_convert_to_app_error() {
        let service_err = ServiceError::not_found("Conversation", 456);
        let app_err: AppError = service_err.into();
        assert_eq!(app_err.status_code(), 404);

        let app_err: AppError = ServiceError::from(DomainError::NotParticipant).into();
        assert_eq!(app_err.status_code(), 403);
    }
}
