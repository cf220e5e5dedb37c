use std::sync::Arc;
use uuid::Uuid;

use super::FilmCommand;
use crate::domain::catalog::{CatalogError, CatalogService, Film};

/// Full replacement of a film's fields
#[derive(Debug, Clone)]
pub struct UpdateFilmCommand {
  pub id: Uuid,
  pub fields: FilmCommand,
}

pub struct UpdateFilmUseCase {
  catalog: Arc<CatalogService>,
}

impl UpdateFilmUseCase {
  pub fn new(catalog: Arc<CatalogService>) -> Self {
    Self { catalog }
  }

  pub async fn execute(&self, command: UpdateFilmCommand) -> Result<Film, CatalogError> {
    self.catalog.update_film(command.id, command.fields.into()).await
  }
}
