//! Row structures shared by the catalog repositories.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::catalog::{Actor, Film, FilmSortField, SortOrder};

#[derive(Debug, sqlx::FromRow)]
pub(super) struct ActorRow {
  pub id: Uuid,
  pub name: String,
  pub gender: String,
  pub birthday: NaiveDate,
}

impl From<ActorRow> for Actor {
  fn from(row: ActorRow) -> Self {
    Actor {
      id: row.id,
      name: row.name,
      gender: row.gender,
      birthday: Some(row.birthday),
    }
  }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct FilmRow {
  pub id: Uuid,
  pub name: String,
  pub description: Option<String>,
  pub release_date: NaiveDate,
  pub rate: f32,
}

impl From<FilmRow> for Film {
  fn from(row: FilmRow) -> Self {
    Film {
      id: row.id,
      name: row.name,
      description: row.description,
      release_date: Some(row.release_date),
      rate: row.rate,
    }
  }
}

/// Film joined through `actor_film`, keyed by the actor it belongs to
#[derive(Debug, sqlx::FromRow)]
pub(super) struct LinkedFilmRow {
  pub owner_id: Uuid,
  #[sqlx(flatten)]
  pub film: FilmRow,
}

/// Actor joined through `actor_film`, keyed by the film it belongs to
#[derive(Debug, sqlx::FromRow)]
pub(super) struct LinkedActorRow {
  pub owner_id: Uuid,
  #[sqlx(flatten)]
  pub actor: ActorRow,
}

/// Date columns are NOT NULL; validated entities always carry a date.
pub(super) fn required_date(date: Option<NaiveDate>) -> NaiveDate {
  date.unwrap_or_default()
}

pub(super) fn sort_column(field: FilmSortField) -> &'static str {
  match field {
    FilmSortField::Name => "name",
    FilmSortField::ReleaseDate => "release_date",
    FilmSortField::Rate => "rate",
  }
}

pub(super) fn order_keyword(order: SortOrder) -> &'static str {
  match order {
    SortOrder::Asc => "ASC",
    SortOrder::Desc => "DESC",
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_sort_fragments() {
    assert_eq!(sort_column(FilmSortField::default()), "rate");
    assert_eq!(sort_column(FilmSortField::ReleaseDate), "release_date");
    assert_eq!(order_keyword(SortOrder::default()), "ASC");
    assert_eq!(order_keyword(SortOrder::Desc), "DESC");
  }
}
