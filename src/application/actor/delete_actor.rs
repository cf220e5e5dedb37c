use std::sync::Arc;
use uuid::Uuid;

use crate::domain::catalog::{CatalogError, CatalogService};

/// Use case for removing an actor together with its film links
pub struct DeleteActorUseCase {
  catalog: Arc<CatalogService>,
}

impl DeleteActorUseCase {
  pub fn new(catalog: Arc<CatalogService>) -> Self {
    Self { catalog }
  }

  pub async fn execute(&self, id: Uuid) -> Result<(), CatalogError> {
    self.catalog.delete_actor(id).await
  }
}
