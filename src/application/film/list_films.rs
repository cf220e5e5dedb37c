use std::sync::Arc;

use crate::domain::catalog::{
  CatalogError, CatalogService, FilmAggregate, FilmQuery, FilmSortField, Page, SortOrder,
};

/// Sorting and paging options for the film list
#[derive(Debug, Clone, Copy)]
pub struct ListFilmsCommand {
  pub sort_field: FilmSortField,
  pub order: SortOrder,
  pub page: u32,
  pub page_size: u32,
  /// Load each film's actors
  pub with_actors: bool,
}

impl From<ListFilmsCommand> for FilmQuery {
  fn from(command: ListFilmsCommand) -> Self {
    FilmQuery {
      sort_field: command.sort_field,
      order: command.order,
      page: command.page,
      page_size: command.page_size,
      with_actors: command.with_actors,
    }
  }
}

pub struct ListFilmsUseCase {
  catalog: Arc<CatalogService>,
}

impl ListFilmsUseCase {
  pub fn new(catalog: Arc<CatalogService>) -> Self {
    Self { catalog }
  }

  pub async fn execute(&self, command: ListFilmsCommand) -> Result<Page<FilmAggregate>, CatalogError> {
    self.catalog.list_films(command.into()).await
  }
}
