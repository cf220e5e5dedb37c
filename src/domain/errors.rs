use std::fmt;
use thiserror::Error;

/// Client-facing error classification shared by every bounded context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  BadRequest,
  UnprocessableEntity,
  Unauthorized,
  Forbidden,
  Conflict,
  NotFound,
  InternalServerError,
}

impl ErrorKind {
  /// HTTP-equivalent status code
  pub fn code(self) -> u16 {
    match self {
      ErrorKind::BadRequest => 400,
      ErrorKind::Unauthorized => 401,
      ErrorKind::Forbidden => 403,
      ErrorKind::NotFound => 404,
      ErrorKind::Conflict => 409,
      ErrorKind::UnprocessableEntity => 422,
      ErrorKind::InternalServerError => 500,
    }
  }

  /// Message used when the error carries nothing more specific
  pub fn default_message(self) -> &'static str {
    match self {
      ErrorKind::BadRequest => "Bad request",
      ErrorKind::UnprocessableEntity => "Unprocessable entity",
      ErrorKind::Unauthorized => "Unauthorized",
      ErrorKind::Forbidden => "Forbidden",
      ErrorKind::Conflict => "Conflict",
      ErrorKind::NotFound => "Not found",
      ErrorKind::InternalServerError => "Internal server error",
    }
  }
}

impl fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.default_message())
  }
}

/// Storage errors reported by every repository implementation
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Record not found")]
  NotFound,

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Stored data is corrupted: {0}")]
  Corrupted(String),

  #[error("Database error: {0}")]
  DatabaseError(String),
}

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::RowNotFound => RepositoryError::NotFound,
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          RepositoryError::DuplicateKey(db_err.message().to_string())
        } else if db_err.is_foreign_key_violation() {
          RepositoryError::NotFound
        } else {
          RepositoryError::DatabaseError(db_err.message().to_string())
        }
      }
      sqlx::Error::PoolTimedOut => RepositoryError::ConnectionFailed("Pool timed out".to_string()),
      sqlx::Error::PoolClosed => RepositoryError::ConnectionFailed("Pool closed".to_string()),
      _ => RepositoryError::QueryFailed(error.to_string()),
    }
  }
}
