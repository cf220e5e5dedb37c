use thiserror::Error;

use super::tokens::{TokenError, UnauthorizedReason};
use super::value_objects::PasswordError;
use crate::domain::errors::{ErrorKind, RepositoryError};
use crate::domain::validation::Violations;

/// Main authentication error type
#[derive(Debug, Error)]
pub enum AuthError {
  #[error("User with this name already exists")]
  NameAlreadyExists,

  #[error("Nick or password incorrect")]
  InvalidCredentials,

  #[error("Unauthorized: {0}")]
  Unauthorized(UnauthorizedReason),

  #[error("Insufficient role for this operation")]
  Forbidden,

  #[error("{0}")]
  Password(#[from] PasswordError),

  #[error("Validation failed: {0}")]
  Validation(#[from] Violations),

  #[error("Token error: {0}")]
  Token(#[from] TokenError),

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Internal error: {0}")]
  Internal(String),
}

impl AuthError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      AuthError::NameAlreadyExists => ErrorKind::Conflict,
      AuthError::InvalidCredentials | AuthError::Forbidden => ErrorKind::Forbidden,
      AuthError::Unauthorized(_) => ErrorKind::Unauthorized,
      AuthError::Password(PasswordError::HashingFailed(_) | PasswordError::InvalidHash) => {
        ErrorKind::InternalServerError
      }
      AuthError::Password(_) | AuthError::Validation(_) => ErrorKind::UnprocessableEntity,
      AuthError::Token(_) | AuthError::Repository(_) | AuthError::Internal(_) => {
        ErrorKind::InternalServerError
      }
    }
  }

  /// Message safe to return to the client
  pub fn public_message(&self) -> String {
    match self.kind() {
      ErrorKind::InternalServerError => ErrorKind::InternalServerError.default_message().to_string(),
      _ => self.to_string(),
    }
  }
}
