use std::sync::Arc;
use uuid::Uuid;

use crate::domain::catalog::{CatalogError, CatalogService};

/// Use case for removing a film together with its actor links
pub struct DeleteFilmUseCase {
  catalog: Arc<CatalogService>,
}

impl DeleteFilmUseCase {
  pub fn new(catalog: Arc<CatalogService>) -> Self {
    Self { catalog }
  }

  pub async fn execute(&self, id: Uuid) -> Result<(), CatalogError> {
    self.catalog.delete_film(id).await
  }
}
