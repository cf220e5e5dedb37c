use std::sync::Arc;
use uuid::Uuid;

use super::entities::{Actor, ActorAggregate, ActorDraft, Film, FilmAggregate, FilmDraft};
use super::errors::CatalogError;
use super::ports::{ActorQuery, ActorRepository, FilmQuery, FilmRepository, Page};
use crate::domain::errors::RepositoryError;

pub const MAX_PAGE_SIZE: u32 = 100;
pub const SEARCH_MIN_LENGTH: usize = 3;
pub const SEARCH_LIMIT: u32 = 20;

/// Actor and film operations. Every write goes through a validated aggregate.
pub struct CatalogService {
  actor_repo: Arc<dyn ActorRepository>,
  film_repo: Arc<dyn FilmRepository>,
}

impl CatalogService {
  pub fn new(actor_repo: Arc<dyn ActorRepository>, film_repo: Arc<dyn FilmRepository>) -> Self {
    Self {
      actor_repo,
      film_repo,
    }
  }

  pub async fn create_actor(&self, draft: ActorDraft) -> Result<Actor, CatalogError> {
    let actor = Actor::create(draft)?;
    let created = self.actor_repo.create(actor).await?;
    tracing::info!(actor_id = %created.id, "actor created");
    Ok(created)
  }

  pub async fn update_actor(&self, id: Uuid, draft: ActorDraft) -> Result<Actor, CatalogError> {
    let actor = Actor::build(id, draft)?;
    self
      .actor_repo
      .update(actor)
      .await
      .map_err(|e| not_found_as(e, CatalogError::ActorNotFound))
  }

  pub async fn delete_actor(&self, id: Uuid) -> Result<(), CatalogError> {
    self
      .actor_repo
      .delete(id)
      .await
      .map_err(|e| not_found_as(e, CatalogError::ActorNotFound))
  }

  pub async fn get_actor(&self, id: Uuid) -> Result<ActorAggregate, CatalogError> {
    self
      .actor_repo
      .get_by_id(id)
      .await
      .map_err(|e| not_found_as(e, CatalogError::ActorNotFound))
  }

  pub async fn list_actors(&self, query: ActorQuery) -> Result<Page<ActorAggregate>, CatalogError> {
    check_paging(query.page, query.page_size)?;
    Ok(self.actor_repo.get_by_query(&query).await?)
  }

  pub async fn link_films(&self, actor_id: Uuid, film_ids: &[Uuid]) -> Result<(), CatalogError> {
    if film_ids.is_empty() {
      return Err(CatalogError::InvalidQuery("at least one film id is required".to_string()));
    }

    let mut ids = film_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();

    self
      .actor_repo
      .add_films(actor_id, &ids)
      .await
      .map_err(|e| not_found_as(e, CatalogError::LinkTargetNotFound))?;

    tracing::info!(%actor_id, films = ids.len(), "films linked to actor");
    Ok(())
  }

  pub async fn create_film(&self, draft: FilmDraft) -> Result<Film, CatalogError> {
    let film = Film::create(draft)?;
    let created = self.film_repo.create(film).await?;
    tracing::info!(film_id = %created.id, "film created");
    Ok(created)
  }

  pub async fn update_film(&self, id: Uuid, draft: FilmDraft) -> Result<Film, CatalogError> {
    let film = Film::build(id, draft)?;
    self
      .film_repo
      .update(film)
      .await
      .map_err(|e| not_found_as(e, CatalogError::FilmNotFound))
  }

  pub async fn delete_film(&self, id: Uuid) -> Result<(), CatalogError> {
    self
      .film_repo
      .delete(id)
      .await
      .map_err(|e| not_found_as(e, CatalogError::FilmNotFound))
  }

  pub async fn get_film(&self, id: Uuid) -> Result<FilmAggregate, CatalogError> {
    self
      .film_repo
      .get_by_id(id)
      .await
      .map_err(|e| not_found_as(e, CatalogError::FilmNotFound))
  }

  pub async fn list_films(&self, query: FilmQuery) -> Result<Page<FilmAggregate>, CatalogError> {
    check_paging(query.page, query.page_size)?;
    Ok(self.film_repo.get_by_query(&query).await?)
  }

  /// Substring search over film names and linked actor names
  pub async fn search_films(&self, term: &str) -> Result<Vec<Film>, CatalogError> {
    if term.chars().count() < SEARCH_MIN_LENGTH {
      return Err(CatalogError::InvalidQuery(format!(
        "searched value min {} chars",
        SEARCH_MIN_LENGTH
      )));
    }

    let films = self.film_repo.search(term, SEARCH_LIMIT).await?;
    if films.is_empty() {
      return Err(CatalogError::SearchNotFound);
    }

    Ok(films)
  }
}

fn not_found_as(error: RepositoryError, not_found: CatalogError) -> CatalogError {
  match error {
    RepositoryError::NotFound => not_found,
    other => CatalogError::Repository(other),
  }
}

fn check_paging(page: u32, page_size: u32) -> Result<(), CatalogError> {
  if page == 0 {
    return Err(CatalogError::InvalidQuery("page must be at least 1".to_string()));
  }
  if page_size == 0 || page_size > MAX_PAGE_SIZE {
    return Err(CatalogError::InvalidQuery(format!(
      "page-count must be between 1 and {}",
      MAX_PAGE_SIZE
    )));
  }
  Ok(())
}
