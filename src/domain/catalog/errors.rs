use thiserror::Error;

use crate::domain::errors::{ErrorKind, RepositoryError};
use crate::domain::validation::Violations;

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("Actor not found")]
  ActorNotFound,

  #[error("Film not found")]
  FilmNotFound,

  #[error("Actor or film not found")]
  LinkTargetNotFound,

  #[error("Search film not found")]
  SearchNotFound,

  #[error("{0}")]
  InvalidQuery(String),

  #[error("Validation failed: {0}")]
  Validation(#[from] Violations),

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),
}

impl CatalogError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      CatalogError::ActorNotFound
      | CatalogError::FilmNotFound
      | CatalogError::LinkTargetNotFound
      | CatalogError::SearchNotFound => ErrorKind::NotFound,
      CatalogError::InvalidQuery(_) => ErrorKind::BadRequest,
      CatalogError::Validation(_) => ErrorKind::UnprocessableEntity,
      CatalogError::Repository(_) => ErrorKind::InternalServerError,
    }
  }

  pub fn public_message(&self) -> String {
    match self.kind() {
      ErrorKind::InternalServerError => ErrorKind::InternalServerError.default_message().to_string(),
      _ => self.to_string(),
    }
  }
}
