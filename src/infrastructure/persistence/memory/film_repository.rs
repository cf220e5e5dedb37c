use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::Arc;
use uuid::Uuid;

use super::{InMemoryStore, paginate};
use crate::domain::catalog::ports::page_count;
use crate::domain::catalog::{
  Film, FilmAggregate, FilmQuery, FilmRepository, FilmSortField, Page, SortOrder,
};
use crate::domain::errors::RepositoryError;

pub struct InMemoryFilmRepository {
  store: Arc<InMemoryStore>,
}

impl InMemoryFilmRepository {
  pub fn new(store: Arc<InMemoryStore>) -> Self {
    Self { store }
  }
}

fn compare(a: &Film, b: &Film, field: FilmSortField) -> Ordering {
  match field {
    FilmSortField::Name => a.name.cmp(&b.name),
    FilmSortField::ReleaseDate => a.release_date.cmp(&b.release_date),
    FilmSortField::Rate => a.rate.partial_cmp(&b.rate).unwrap_or(Ordering::Equal),
  }
}

#[async_trait]
impl FilmRepository for InMemoryFilmRepository {
  async fn create(&self, film: Film) -> Result<Film, RepositoryError> {
    let mut state = self.store.write().await;

    if state.films.contains_key(&film.id) {
      return Err(RepositoryError::DuplicateKey(format!("films.id = {}", film.id)));
    }

    state.films.insert(film.id, film.clone());
    Ok(film)
  }

  async fn update(&self, film: Film) -> Result<Film, RepositoryError> {
    let mut state = self.store.write().await;

    let stored = state
      .films
      .get_mut(&film.id)
      .ok_or(RepositoryError::NotFound)?;
    *stored = film.clone();
    Ok(film)
  }

  async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
    let mut state = self.store.write().await;

    state.films.remove(&id).ok_or(RepositoryError::NotFound)?;
    state.links.retain(|(_, film)| *film != id);
    Ok(())
  }

  async fn get_by_id(&self, id: Uuid) -> Result<FilmAggregate, RepositoryError> {
    let state = self.store.read().await;

    let film = state.films.get(&id).cloned().ok_or(RepositoryError::NotFound)?;
    Ok(FilmAggregate {
      actors: state.actors_of(id),
      film,
    })
  }

  async fn get_by_query(&self, query: &FilmQuery) -> Result<Page<FilmAggregate>, RepositoryError> {
    let state = self.store.read().await;

    let mut films: Vec<Film> = state.films.values().cloned().collect();
    films.sort_by(|a, b| {
      let ordering = compare(a, b, query.sort_field);
      let ordering = match query.order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
      };
      ordering.then(a.id.cmp(&b.id))
    });
    let total = films.len() as u64;

    let items = paginate(films, query.offset(), query.page_size)
      .into_iter()
      .map(|film| {
        let actors = if query.with_actors {
          state.actors_of(film.id)
        } else {
          Vec::new()
        };
        FilmAggregate { film, actors }
      })
      .collect();

    Ok(Page {
      items,
      page_count: page_count(total, query.page_size),
    })
  }

  async fn search(&self, term: &str, limit: u32) -> Result<Vec<Film>, RepositoryError> {
    let state = self.store.read().await;

    let mut films: Vec<Film> = state
      .films
      .values()
      .filter(|film| {
        film.name.contains(term)
          || state
            .actors_of(film.id)
            .iter()
            .any(|actor| actor.name.contains(term))
      })
      .cloned()
      .collect();
    films.sort_by(|a, b| compare(a, b, FilmSortField::Rate).then(a.id.cmp(&b.id)));
    films.truncate(limit as usize);

    Ok(films)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::catalog::FilmDraft;
  use chrono::NaiveDate;

  fn film(name: &str, year: i32, rate: f32) -> Film {
    Film::create(FilmDraft {
      name: name.to_string(),
      description: None,
      release_date: NaiveDate::from_ymd_opt(year, 1, 1),
      rate,
    })
    .unwrap()
  }

  #[tokio::test]
  async fn test_sort_by_release_date_desc() {
    let repo = InMemoryFilmRepository::new(Arc::new(InMemoryStore::new()));
    repo.create(film("Old", 1950, 7.0)).await.unwrap();
    repo.create(film("New", 2020, 6.0)).await.unwrap();
    repo.create(film("Mid", 1990, 8.0)).await.unwrap();

    let query = FilmQuery {
      sort_field: FilmSortField::ReleaseDate,
      order: SortOrder::Desc,
      ..FilmQuery::default()
    };
    let page = repo.get_by_query(&query).await.unwrap();

    let names: Vec<&str> = page.items.iter().map(|f| f.film.name.as_str()).collect();
    assert_eq!(names, vec!["New", "Mid", "Old"]);
  }

  #[tokio::test]
  async fn test_search_respects_limit_and_rate_order() {
    let repo = InMemoryFilmRepository::new(Arc::new(InMemoryStore::new()));
    for i in 0..25 {
      repo.create(film(&format!("Saga {}", i), 2000, (i % 10) as f32)).await.unwrap();
    }

    let found = repo.search("Saga", 20).await.unwrap();
    assert_eq!(found.len(), 20);
    assert!(found.windows(2).all(|pair| pair[0].rate <= pair[1].rate));
  }

  #[tokio::test]
  async fn test_search_is_case_sensitive() {
    let repo = InMemoryFilmRepository::new(Arc::new(InMemoryStore::new()));
    repo.create(film("Heat", 1995, 8.3)).await.unwrap();

    assert!(repo.search("heat", 20).await.unwrap().is_empty());
    assert_eq!(repo.search("Hea", 20).await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn test_update_missing_film() {
    let repo = InMemoryFilmRepository::new(Arc::new(InMemoryStore::new()));
    let result = repo.update(film("Ghost", 1990, 7.0)).await;
    assert!(matches!(result, Err(RepositoryError::NotFound)));
  }
}
