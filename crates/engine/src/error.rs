//! The module contains the error the engine can throw.
//!
//! Every failure is one of five kinds:
//!
//! - [`InvalidArgument`] malformed or inconsistent input.
//! - [`NotFound`] a referenced entity does not exist (or is hidden from the caller).
//! - [`Conflict`] a uniqueness or referential rule would be broken.
//! - [`Unauthorized`] bad credentials or an ownership violation.
//! - [`Database`] / [`Internal`] storage or collaborator failures.
//!
//!  [`InvalidArgument`]: EngineError::InvalidArgument
//!  [`NotFound`]: EngineError::NotFound
//!  [`Conflict`]: EngineError::Conflict
//!  [`Unauthorized`]: EngineError::Unauthorized
//!  [`Database`]: EngineError::Database
//!  [`Internal`]: EngineError::Internal
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("\"{0}\" not found!")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

/// Coarse classification of an [`EngineError`], stable across messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    Conflict,
    Unauthorized,
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Unauthorized => "unauthorized",
            Self::Internal => "internal",
        }
    }
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::Internal(_) | Self::Database(_) => ErrorKind::Internal,
        }
    }

    /// Translate a unique-constraint violation into [`EngineError::Conflict`].
    ///
    /// `describe` receives the backend message (e.g. `UNIQUE constraint failed:
    /// users.email`) and returns the message exposed to callers. Any other
    /// error is kept as [`EngineError::Database`].
    pub(crate) fn from_unique_violation(err: DbErr, describe: impl FnOnce(&str) -> String) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => {
                Self::Conflict(describe(message.as_str()))
            }
            _ => Self::Database(err),
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidArgument(a), Self::InvalidArgument(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Conflict(a), Self::Conflict(b)) => a == b,
            (Self::Unauthorized(a), Self::Unauthorized(b)) => a == b,
            (Self::Internal(a), Self::Internal(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_errors_are_internal() {
        let err = EngineError::from(DbErr::Custom("boom".to_string()));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn non_unique_errors_are_not_conflicts() {
        let err = EngineError::from_unique_violation(DbErr::Custom("boom".to_string()), |_| {
            "duplicate".to_string()
        });
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn kind_names_are_snake_case() {
        assert_eq!(ErrorKind::InvalidArgument.as_str(), "invalid_argument");
        assert_eq!(ErrorKind::NotFound.as_str(), "not_found");
    }
}
