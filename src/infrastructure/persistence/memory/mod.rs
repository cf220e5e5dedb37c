//! In-memory storage backend.
//!
//! All repositories share one [`InMemoryStore`]; each write takes the store's
//! write lock, so concurrent writes are serialized.

mod account_repository;
mod actor_repository;
mod film_repository;
mod token_repository;

pub use account_repository::InMemoryAccountRepository;
pub use actor_repository::InMemoryActorRepository;
pub use film_repository::InMemoryFilmRepository;
pub use token_repository::InMemoryTokenRepository;

use std::collections::{BTreeSet, HashMap};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::domain::auth::Account;
use crate::domain::catalog::{Actor, Film};

#[derive(Default)]
struct MemoryState {
  accounts: HashMap<Uuid, Account>,
  /// account id -> refresh token value
  tokens: HashMap<Uuid, String>,
  actors: HashMap<Uuid, Actor>,
  films: HashMap<Uuid, Film>,
  /// (actor id, film id)
  links: BTreeSet<(Uuid, Uuid)>,
}

impl MemoryState {
  fn films_of(&self, actor_id: Uuid) -> Vec<Film> {
    let mut films: Vec<Film> = self
      .links
      .iter()
      .filter(|(actor, _)| *actor == actor_id)
      .filter_map(|(_, film)| self.films.get(film).cloned())
      .collect();
    films.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    films
  }

  fn actors_of(&self, film_id: Uuid) -> Vec<Actor> {
    let mut actors: Vec<Actor> = self
      .links
      .iter()
      .filter(|(_, film)| *film == film_id)
      .filter_map(|(actor, _)| self.actors.get(actor).cloned())
      .collect();
    actors.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    actors
  }
}

/// Shared state behind the in-memory repositories
#[derive(Default)]
pub struct InMemoryStore {
  state: RwLock<MemoryState>,
}

impl InMemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  async fn read(&self) -> RwLockReadGuard<'_, MemoryState> {
    self.state.read().await
  }

  async fn write(&self) -> RwLockWriteGuard<'_, MemoryState> {
    self.state.write().await
  }
}

fn paginate<T>(items: Vec<T>, offset: u64, limit: u32) -> Vec<T> {
  let offset = usize::try_from(offset).unwrap_or(usize::MAX);
  items
    .into_iter()
    .skip(offset)
    .take(limit as usize)
    .collect()
}
