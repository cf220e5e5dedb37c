use std::sync::Arc;
use uuid::Uuid;

use crate::domain::catalog::{CatalogError, CatalogService};

/// Films to attach to an actor
#[derive(Debug, Clone)]
pub struct LinkFilmsCommand {
  pub actor_id: Uuid,
  pub film_ids: Vec<Uuid>,
}

/// Use case for linking an actor to films; existing links are kept
pub struct LinkFilmsUseCase {
  catalog: Arc<CatalogService>,
}

impl LinkFilmsUseCase {
  pub fn new(catalog: Arc<CatalogService>) -> Self {
    Self { catalog }
  }

  pub async fn execute(&self, command: LinkFilmsCommand) -> Result<(), CatalogError> {
    self
      .catalog
      .link_films(command.actor_id, &command.film_ids)
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::actor::{ActorCommand, CreateActorUseCase, GetActorUseCase};
  use crate::application::film::{CreateFilmUseCase, FilmCommand};
  use crate::application::test_support::catalog_service;
  use chrono::NaiveDate;

  #[tokio::test]
  async fn test_link_then_load() {
    let catalog = catalog_service();
    let actor = CreateActorUseCase::new(catalog.clone())
      .execute(ActorCommand {
        name: "Laurence Fishburne".to_string(),
        gender: "male".to_string(),
        birthday: NaiveDate::from_ymd_opt(1961, 7, 30),
      })
      .await
      .unwrap();
    let film = CreateFilmUseCase::new(catalog.clone())
      .execute(FilmCommand {
        name: "The Matrix".to_string(),
        description: None,
        release_date: NaiveDate::from_ymd_opt(1999, 3, 31),
        rate: 8.7,
      })
      .await
      .unwrap();

    LinkFilmsUseCase::new(catalog.clone())
      .execute(LinkFilmsCommand {
        actor_id: actor.id,
        film_ids: vec![film.id, film.id],
      })
      .await
      .unwrap();

    let loaded = GetActorUseCase::new(catalog).execute(actor.id).await.unwrap();
    assert_eq!(loaded.films, vec![film]);
  }

  #[tokio::test]
  async fn test_link_unknown_targets() {
    let use_case = LinkFilmsUseCase::new(catalog_service());

    let result = use_case
      .execute(LinkFilmsCommand {
        actor_id: Uuid::new_v4(),
        film_ids: vec![Uuid::new_v4()],
      })
      .await;

    assert!(matches!(result, Err(CatalogError::LinkTargetNotFound)));
  }
}
