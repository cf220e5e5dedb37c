use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::catalog::{Actor, ActorDraft, CatalogError, CatalogService};

/// Actor fields as supplied by the caller
#[derive(Debug, Clone)]
pub struct ActorCommand {
  pub name: String,
  pub gender: String,
  pub birthday: Option<NaiveDate>,
}

impl From<ActorCommand> for ActorDraft {
  fn from(command: ActorCommand) -> Self {
    ActorDraft {
      name: command.name,
      gender: command.gender,
      birthday: command.birthday,
    }
  }
}

/// Use case for adding an actor to the catalog
pub struct CreateActorUseCase {
  catalog: Arc<CatalogService>,
}

impl CreateActorUseCase {
  pub fn new(catalog: Arc<CatalogService>) -> Self {
    Self { catalog }
  }

  pub async fn execute(&self, command: ActorCommand) -> Result<Actor, CatalogError> {
    self.catalog.create_actor(command.into()).await
  }
}
