use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::InMemoryStore;
use crate::domain::auth::{Account, AccountAggregate, AccountRepository};
use crate::domain::errors::RepositoryError;

pub struct InMemoryAccountRepository {
  store: Arc<InMemoryStore>,
}

impl InMemoryAccountRepository {
  pub fn new(store: Arc<InMemoryStore>) -> Self {
    Self { store }
  }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
  async fn create(&self, aggregate: AccountAggregate) -> Result<AccountAggregate, RepositoryError> {
    let mut state = self.store.write().await;
    let account = &aggregate.account;

    if state.accounts.contains_key(&account.id) {
      return Err(RepositoryError::DuplicateKey(format!("users.id = {}", account.id)));
    }
    if state.accounts.values().any(|existing| existing.name == account.name) {
      return Err(RepositoryError::DuplicateKey(format!("users.name = {}", account.name)));
    }

    state.accounts.insert(account.id, account.clone());
    if let Some(token) = &aggregate.token {
      state.tokens.insert(token.id, token.value.clone());
    }

    Ok(aggregate)
  }

  async fn update(&self, account: Account) -> Result<Account, RepositoryError> {
    let mut state = self.store.write().await;

    if !state.accounts.contains_key(&account.id) {
      return Err(RepositoryError::NotFound);
    }
    if state
      .accounts
      .values()
      .any(|existing| existing.name == account.name && existing.id != account.id)
    {
      return Err(RepositoryError::DuplicateKey(format!("users.name = {}", account.name)));
    }

    state.accounts.insert(account.id, account.clone());
    Ok(account)
  }

  async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
    let mut state = self.store.write().await;

    state.accounts.remove(&id).ok_or(RepositoryError::NotFound)?;
    state.tokens.remove(&id);
    Ok(())
  }

  async fn get_by_id(&self, id: Uuid) -> Result<Account, RepositoryError> {
    let state = self.store.read().await;
    state.accounts.get(&id).cloned().ok_or(RepositoryError::NotFound)
  }

  async fn get_by_name(&self, name: &str) -> Result<Account, RepositoryError> {
    let state = self.store.read().await;
    state
      .accounts
      .values()
      .find(|account| account.name == name)
      .cloned()
      .ok_or(RepositoryError::NotFound)
  }

  async fn has_by_name(&self, name: &str) -> Result<bool, RepositoryError> {
    let state = self.store.read().await;
    Ok(state.accounts.values().any(|account| account.name == name))
  }
}
