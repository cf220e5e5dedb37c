use std::sync::Arc;
use uuid::Uuid;

use super::ActorCommand;
use crate::domain::catalog::{Actor, CatalogError, CatalogService};

/// Full replacement of an actor's fields
#[derive(Debug, Clone)]
pub struct UpdateActorCommand {
  pub id: Uuid,
  pub fields: ActorCommand,
}

pub struct UpdateActorUseCase {
  catalog: Arc<CatalogService>,
}

impl UpdateActorUseCase {
  pub fn new(catalog: Arc<CatalogService>) -> Self {
    Self { catalog }
  }

  pub async fn execute(&self, command: UpdateActorCommand) -> Result<Actor, CatalogError> {
    self.catalog.update_actor(command.id, command.fields.into()).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::actor::CreateActorUseCase;
  use crate::application::test_support::catalog_service;
  use chrono::NaiveDate;

  fn fields(name: &str) -> ActorCommand {
    ActorCommand {
      name: name.to_string(),
      gender: "female".to_string(),
      birthday: NaiveDate::from_ymd_opt(1967, 8, 21),
    }
  }

  #[tokio::test]
  async fn test_update_keeps_id() {
    let catalog = catalog_service();
    let created = CreateActorUseCase::new(catalog.clone())
      .execute(fields("Carrie Moss"))
      .await
      .unwrap();

    let updated = UpdateActorUseCase::new(catalog)
      .execute(UpdateActorCommand {
        id: created.id,
        fields: fields("Carrie-Anne Moss"),
      })
      .await
      .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Carrie-Anne Moss");
  }

  #[tokio::test]
  async fn test_update_missing_actor() {
    let use_case = UpdateActorUseCase::new(catalog_service());

    let result = use_case
      .execute(UpdateActorCommand {
        id: Uuid::new_v4(),
        fields: fields("Nobody"),
      })
      .await;

    assert!(matches!(result, Err(CatalogError::ActorNotFound)));
  }
}
