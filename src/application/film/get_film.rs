use std::sync::Arc;
use uuid::Uuid;

use crate::domain::catalog::{CatalogError, CatalogService, FilmAggregate};

/// Use case for loading one film with its cast
pub struct GetFilmUseCase {
  catalog: Arc<CatalogService>,
}

impl GetFilmUseCase {
  pub fn new(catalog: Arc<CatalogService>) -> Self {
    Self { catalog }
  }

  pub async fn execute(&self, id: Uuid) -> Result<FilmAggregate, CatalogError> {
    self.catalog.get_film(id).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::test_support::catalog_service;

  #[tokio::test]
  async fn test_get_missing_film() {
    let result = GetFilmUseCase::new(catalog_service()).execute(Uuid::new_v4()).await;
    assert!(matches!(result, Err(CatalogError::FilmNotFound)));
  }
}
