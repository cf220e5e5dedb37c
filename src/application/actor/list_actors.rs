use std::sync::Arc;

use crate::domain::catalog::{ActorAggregate, ActorQuery, CatalogError, CatalogService, Page};

/// Paging options for the actor list
#[derive(Debug, Clone, Copy)]
pub struct ListActorsCommand {
  pub page: u32,
  pub page_size: u32,
  /// Load each actor's films
  pub with_films: bool,
}

impl From<ListActorsCommand> for ActorQuery {
  fn from(command: ListActorsCommand) -> Self {
    ActorQuery {
      page: command.page,
      page_size: command.page_size,
      with_films: command.with_films,
    }
  }
}

/// Use case for listing actors ordered by name
pub struct ListActorsUseCase {
  catalog: Arc<CatalogService>,
}

impl ListActorsUseCase {
  pub fn new(catalog: Arc<CatalogService>) -> Self {
    Self { catalog }
  }

  pub async fn execute(&self, command: ListActorsCommand) -> Result<Page<ActorAggregate>, CatalogError> {
    self.catalog.list_actors(command.into()).await
  }
}
