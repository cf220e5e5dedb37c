use std::sync::Arc;
use uuid::Uuid;

use crate::domain::catalog::{ActorAggregate, CatalogError, CatalogService};

/// Use case for loading one actor with its films
pub struct GetActorUseCase {
  catalog: Arc<CatalogService>,
}

impl GetActorUseCase {
  pub fn new(catalog: Arc<CatalogService>) -> Self {
    Self { catalog }
  }

  pub async fn execute(&self, id: Uuid) -> Result<ActorAggregate, CatalogError> {
    self.catalog.get_actor(id).await
  }
}
