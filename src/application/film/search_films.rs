use std::sync::Arc;

use crate::domain::catalog::{CatalogError, CatalogService, Film};

/// Use case for the film search box: matches film titles and cast names
pub struct SearchFilmsUseCase {
  catalog: Arc<CatalogService>,
}

impl SearchFilmsUseCase {
  pub fn new(catalog: Arc<CatalogService>) -> Self {
    Self { catalog }
  }

  pub async fn execute(&self, term: &str) -> Result<Vec<Film>, CatalogError> {
    self.catalog.search_films(term).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::test_support::catalog_service;

  #[tokio::test]
  async fn test_short_term_is_rejected() {
    let result = SearchFilmsUseCase::new(catalog_service()).execute("Ma").await;
    assert!(matches!(result, Err(CatalogError::InvalidQuery(_))));
  }

  #[tokio::test]
  async fn test_no_match() {
    let result = SearchFilmsUseCase::new(catalog_service()).execute("Matrix").await;
    assert!(matches!(result, Err(CatalogError::SearchNotFound)));
  }
}
