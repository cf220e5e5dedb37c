use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::{InMemoryStore, paginate};
use crate::domain::catalog::ports::page_count;
use crate::domain::catalog::{Actor, ActorAggregate, ActorQuery, ActorRepository, Page};
use crate::domain::errors::RepositoryError;

pub struct InMemoryActorRepository {
  store: Arc<InMemoryStore>,
}

impl InMemoryActorRepository {
  pub fn new(store: Arc<InMemoryStore>) -> Self {
    Self { store }
  }
}

#[async_trait]
impl ActorRepository for InMemoryActorRepository {
  async fn create(&self, actor: Actor) -> Result<Actor, RepositoryError> {
    let mut state = self.store.write().await;

    if state.actors.contains_key(&actor.id) {
      return Err(RepositoryError::DuplicateKey(format!("actors.id = {}", actor.id)));
    }

    state.actors.insert(actor.id, actor.clone());
    Ok(actor)
  }

  async fn update(&self, actor: Actor) -> Result<Actor, RepositoryError> {
    let mut state = self.store.write().await;

    let stored = state
      .actors
      .get_mut(&actor.id)
      .ok_or(RepositoryError::NotFound)?;
    *stored = actor.clone();
    Ok(actor)
  }

  async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
    let mut state = self.store.write().await;

    state.actors.remove(&id).ok_or(RepositoryError::NotFound)?;
    state.links.retain(|(actor, _)| *actor != id);
    Ok(())
  }

  async fn get_by_id(&self, id: Uuid) -> Result<ActorAggregate, RepositoryError> {
    let state = self.store.read().await;

    let actor = state.actors.get(&id).cloned().ok_or(RepositoryError::NotFound)?;
    Ok(ActorAggregate {
      films: state.films_of(id),
      actor,
    })
  }

  async fn get_by_query(&self, query: &ActorQuery) -> Result<Page<ActorAggregate>, RepositoryError> {
    let state = self.store.read().await;

    let mut actors: Vec<Actor> = state.actors.values().cloned().collect();
    actors.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    let total = actors.len() as u64;

    let items = paginate(actors, query.offset(), query.page_size)
      .into_iter()
      .map(|actor| {
        let films = if query.with_films {
          state.films_of(actor.id)
        } else {
          Vec::new()
        };
        ActorAggregate { actor, films }
      })
      .collect();

    Ok(Page {
      items,
      page_count: page_count(total, query.page_size),
    })
  }

  async fn add_films(&self, actor_id: Uuid, film_ids: &[Uuid]) -> Result<(), RepositoryError> {
    let mut state = self.store.write().await;

    if !state.actors.contains_key(&actor_id) {
      return Err(RepositoryError::NotFound);
    }
    if film_ids.iter().any(|id| !state.films.contains_key(id)) {
      return Err(RepositoryError::NotFound);
    }

    for film_id in film_ids {
      state.links.insert((actor_id, *film_id));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::catalog::{ActorDraft, Film, FilmDraft, FilmRepository};
  use crate::infrastructure::persistence::memory::InMemoryFilmRepository;
  use chrono::NaiveDate;

  fn actor(name: &str) -> Actor {
    Actor::create(ActorDraft {
      name: name.to_string(),
      gender: "female".to_string(),
      birthday: NaiveDate::from_ymd_opt(1970, 1, 1),
    })
    .unwrap()
  }

  fn film(name: &str) -> Film {
    Film::create(FilmDraft {
      name: name.to_string(),
      description: None,
      release_date: NaiveDate::from_ymd_opt(2000, 1, 1),
      rate: 5.0,
    })
    .unwrap()
  }

  #[tokio::test]
  async fn test_query_pages_sorted_by_name() {
    let repo = InMemoryActorRepository::new(Arc::new(InMemoryStore::new()));
    for name in ["Carol", "Alice", "Bob"] {
      repo.create(actor(name)).await.unwrap();
    }

    let query = ActorQuery {
      page: 1,
      page_size: 2,
      with_films: false,
    };
    let page = repo.get_by_query(&query).await.unwrap();

    let names: Vec<&str> = page.items.iter().map(|a| a.actor.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
    assert_eq!(page.page_count, 2);
  }

  #[tokio::test]
  async fn test_links_loaded_on_demand_and_removed_with_actor() {
    let store = Arc::new(InMemoryStore::new());
    let actors = InMemoryActorRepository::new(store.clone());
    let films = InMemoryFilmRepository::new(store.clone());

    let alice = actors.create(actor("Alice")).await.unwrap();
    let heat = films.create(film("Heat")).await.unwrap();
    actors.add_films(alice.id, &[heat.id]).await.unwrap();
    actors.add_films(alice.id, &[heat.id]).await.unwrap();

    let without = actors.get_by_query(&ActorQuery::default()).await.unwrap();
    assert!(without.items[0].films.is_empty());

    let query = ActorQuery {
      with_films: true,
      ..ActorQuery::default()
    };
    let with = actors.get_by_query(&query).await.unwrap();
    assert_eq!(with.items[0].films, vec![heat.clone()]);

    actors.delete(alice.id).await.unwrap();
    assert!(store.read().await.links.is_empty());
  }

  #[tokio::test]
  async fn test_add_films_requires_existing_targets() {
    let repo = InMemoryActorRepository::new(Arc::new(InMemoryStore::new()));
    let alice = repo.create(actor("Alice")).await.unwrap();

    let result = repo.add_films(alice.id, &[Uuid::new_v4()]).await;
    assert!(matches!(result, Err(RepositoryError::NotFound)));
  }
}
