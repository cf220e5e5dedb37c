use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::InMemoryStore;
use crate::domain::auth::{RefreshTokenRecord, TokenRepository};
use crate::domain::errors::RepositoryError;

pub struct InMemoryTokenRepository {
  store: Arc<InMemoryStore>,
}

impl InMemoryTokenRepository {
  pub fn new(store: Arc<InMemoryStore>) -> Self {
    Self { store }
  }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
  async fn create(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, RepositoryError> {
    let mut state = self.store.write().await;

    if !state.accounts.contains_key(&record.id) {
      return Err(RepositoryError::NotFound);
    }
    if state.tokens.contains_key(&record.id) {
      return Err(RepositoryError::DuplicateKey(format!("tokens.id = {}", record.id)));
    }

    state.tokens.insert(record.id, record.value.clone());
    Ok(record)
  }

  async fn update(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, RepositoryError> {
    let mut state = self.store.write().await;

    let value = state
      .tokens
      .get_mut(&record.id)
      .ok_or(RepositoryError::NotFound)?;
    *value = record.value.clone();
    Ok(record)
  }

  async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
    self.store.write().await.tokens.remove(&id);
    Ok(())
  }

  async fn get_by_id(&self, id: Uuid) -> Result<Option<RefreshTokenRecord>, RepositoryError> {
    let state = self.store.read().await;
    Ok(state.tokens.get(&id).map(|value| RefreshTokenRecord {
      id,
      value: value.clone(),
    }))
  }

  async fn delete_by_value(&self, value: &str) -> Result<(), RepositoryError> {
    self
      .store
      .write()
      .await
      .tokens
      .retain(|_, stored| stored != value);
    Ok(())
  }

  async fn has_by_value(&self, value: &str) -> Result<bool, RepositoryError> {
    let state = self.store.read().await;
    Ok(state.tokens.values().any(|stored| stored == value))
  }
}
