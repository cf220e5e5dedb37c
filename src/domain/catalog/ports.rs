use async_trait::async_trait;
use std::str::FromStr;
use uuid::Uuid;

use super::entities::{Actor, ActorAggregate, Film, FilmAggregate};
use crate::domain::errors::RepositoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
  #[default]
  Asc,
  Desc,
}

impl FromStr for SortOrder {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "asc" => Ok(SortOrder::Asc),
      "desc" => Ok(SortOrder::Desc),
      other => Err(format!("unknown order: {}", other)),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilmSortField {
  Name,
  ReleaseDate,
  #[default]
  Rate,
}

impl FromStr for FilmSortField {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "name" => Ok(FilmSortField::Name),
      "release_date" => Ok(FilmSortField::ReleaseDate),
      "rate" => Ok(FilmSortField::Rate),
      other => Err(format!("unknown sort field: {}", other)),
    }
  }
}

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorQuery {
  pub page: u32,
  pub page_size: u32,
  pub with_films: bool,
}

impl Default for ActorQuery {
  fn default() -> Self {
    Self {
      page: 1,
      page_size: DEFAULT_PAGE_SIZE,
      with_films: false,
    }
  }
}

impl ActorQuery {
  pub fn offset(&self) -> u64 {
    u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilmQuery {
  pub sort_field: FilmSortField,
  pub order: SortOrder,
  pub page: u32,
  pub page_size: u32,
  pub with_actors: bool,
}

impl Default for FilmQuery {
  fn default() -> Self {
    Self {
      sort_field: FilmSortField::default(),
      order: SortOrder::default(),
      page: 1,
      page_size: DEFAULT_PAGE_SIZE,
      with_actors: false,
    }
  }
}

impl FilmQuery {
  pub fn offset(&self) -> u64 {
    u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
  }
}

/// One page of results and the number of pages available
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
  pub items: Vec<T>,
  pub page_count: u32,
}

/// `ceil(total / page_size)`
pub fn page_count(total: u64, page_size: u32) -> u32 {
  if page_size == 0 {
    return 0;
  }
  let pages = total.div_ceil(u64::from(page_size));
  u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Repository trait for actor persistence operations
#[async_trait]
pub trait ActorRepository: Send + Sync {
  async fn create(&self, actor: Actor) -> Result<Actor, RepositoryError>;

  /// Fails with `RepositoryError::NotFound` when the actor does not exist
  async fn update(&self, actor: Actor) -> Result<Actor, RepositoryError>;

  /// Removes the actor and its film links
  async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

  /// Actor with its linked films
  async fn get_by_id(&self, id: Uuid) -> Result<ActorAggregate, RepositoryError>;

  async fn get_by_query(&self, query: &ActorQuery) -> Result<Page<ActorAggregate>, RepositoryError>;

  /// Links the actor to every film; existing links are kept.
  /// Fails with `RepositoryError::NotFound` if the actor or any film is missing.
  async fn add_films(&self, actor_id: Uuid, film_ids: &[Uuid]) -> Result<(), RepositoryError>;
}

/// Repository trait for film persistence operations
#[async_trait]
pub trait FilmRepository: Send + Sync {
  async fn create(&self, film: Film) -> Result<Film, RepositoryError>;

  async fn update(&self, film: Film) -> Result<Film, RepositoryError>;

  async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

  /// Film with its linked actors
  async fn get_by_id(&self, id: Uuid) -> Result<FilmAggregate, RepositoryError>;

  async fn get_by_query(&self, query: &FilmQuery) -> Result<Page<FilmAggregate>, RepositoryError>;

  /// Distinct films whose name, or a linked actor's name, contains `term`;
  /// ordered by rate ascending
  async fn search(&self, term: &str, limit: u32) -> Result<Vec<Film>, RepositoryError>;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_page_count_rounds_up() {
    assert_eq!(page_count(0, 10), 0);
    assert_eq!(page_count(10, 10), 1);
    assert_eq!(page_count(11, 10), 2);
    assert_eq!(page_count(3, 1), 3);
  }

  #[test]
  fn test_query_defaults() {
    let query = FilmQuery::default();
    assert_eq!(query.sort_field, FilmSortField::Rate);
    assert_eq!(query.order, SortOrder::Asc);
    assert_eq!(query.page, 1);
    assert_eq!(query.page_size, 10);
    assert_eq!(query.offset(), 0);

    let actors = ActorQuery {
      page: 3,
      ..ActorQuery::default()
    };
    assert_eq!(actors.offset(), 20);
  }

  #[test]
  fn test_parse_sort_options() {
    assert_eq!("release_date".parse::<FilmSortField>().unwrap(), FilmSortField::ReleaseDate);
    assert!("released_date".parse::<FilmSortField>().is_err());
    assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
    assert!("DESC".parse::<SortOrder>().is_err());
  }
}
