use thiserror::Error;

use crate::repository::errors::RepositoryError;

/// Failures surfaced by the service layer to the HTTP handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The addressed product does not exist.
    #[error("Product not found")]
    NotFound,

    /// Request payload was rejected.
    #[error("{0}")]
    Validation(String),

    /// The store failed; the message is forwarded to the caller.
    #[error("{0}")]
    Store(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ValidationError(message)
            | RepositoryError::ConstraintViolation(message) => ServiceError::Validation(message),
            other => ServiceError::Store(other.to_string()),
        }
    }
}
