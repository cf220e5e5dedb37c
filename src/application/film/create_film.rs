use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::catalog::{CatalogError, CatalogService, Film, FilmDraft};

/// Film fields as supplied by the caller
#[derive(Debug, Clone)]
pub struct FilmCommand {
  pub name: String,
  pub description: Option<String>,
  pub release_date: Option<NaiveDate>,
  pub rate: f32,
}

impl From<FilmCommand> for FilmDraft {
  fn from(command: FilmCommand) -> Self {
    FilmDraft {
      name: command.name,
      description: command.description,
      release_date: command.release_date,
      rate: command.rate,
    }
  }
}

/// Use case for adding a film to the catalog
pub struct CreateFilmUseCase {
  catalog: Arc<CatalogService>,
}

impl CreateFilmUseCase {
  pub fn new(catalog: Arc<CatalogService>) -> Self {
    Self { catalog }
  }

  pub async fn execute(&self, command: FilmCommand) -> Result<Film, CatalogError> {
    self.catalog.create_film(command.into()).await
  }
}
