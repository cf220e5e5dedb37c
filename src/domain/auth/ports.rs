use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Account, AccountAggregate, RefreshTokenRecord};
use super::errors::AuthError;
use super::tokens::{TokenError, TokenPair, TokenSubject};
use crate::domain::errors::RepositoryError;

/// Repository trait for account persistence operations
#[async_trait]
pub trait AccountRepository: Send + Sync {
  /// Creates the account and, when attached, its refresh token record
  async fn create(&self, aggregate: AccountAggregate) -> Result<AccountAggregate, RepositoryError>;

  async fn update(&self, account: Account) -> Result<Account, RepositoryError>;

  async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

  /// Fails with `RepositoryError::NotFound` when absent
  async fn get_by_id(&self, id: Uuid) -> Result<Account, RepositoryError>;

  /// Fails with `RepositoryError::NotFound` when absent
  async fn get_by_name(&self, name: &str) -> Result<Account, RepositoryError>;

  async fn has_by_name(&self, name: &str) -> Result<bool, RepositoryError>;
}

/// Session store: at most one refresh token record per account id
#[async_trait]
pub trait TokenRepository: Send + Sync {
  /// Fails with `RepositoryError::DuplicateKey` if a record for the id exists
  async fn create(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, RepositoryError>;

  /// Fails with `RepositoryError::NotFound` if no record for the id exists
  async fn update(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, RepositoryError>;

  async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

  async fn get_by_id(&self, id: Uuid) -> Result<Option<RefreshTokenRecord>, RepositoryError>;

  /// Removing an unknown value is not an error
  async fn delete_by_value(&self, value: &str) -> Result<(), RepositoryError>;

  async fn has_by_value(&self, value: &str) -> Result<bool, RepositoryError>;
}

/// Issues and verifies signed session tokens
pub trait TokenIssuer: Send + Sync {
  fn generate(&self, subject: TokenSubject) -> Result<TokenPair, TokenError>;

  /// Fails only with `AuthError::Unauthorized`
  fn verify_refresh(&self, token: &str) -> Result<TokenSubject, AuthError>;

  /// Fails only with `AuthError::Unauthorized`
  fn verify_access(&self, token: &str) -> Result<TokenSubject, AuthError>;
}
