use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::auth::{RefreshTokenRecord, TokenRepository};
use crate::domain::errors::RepositoryError;

/// Database row structure for tokens table
#[derive(Debug, FromRow)]
struct TokenRow {
  id: Uuid,
  value: String,
}

impl From<TokenRow> for RefreshTokenRecord {
  fn from(row: TokenRow) -> Self {
    RefreshTokenRecord {
      id: row.id,
      value: row.value,
    }
  }
}

/// PostgreSQL session store. `tokens.id` is the primary key, so each account
/// has at most one record.
pub struct PostgresTokenRepository {
  pool: PgPool,
}

impl PostgresTokenRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl TokenRepository for PostgresTokenRepository {
  async fn create(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, RepositoryError> {
    let row = sqlx::query_as::<_, TokenRow>(
      "INSERT INTO tokens (id, value) VALUES ($1, $2) RETURNING id, value",
    )
    .bind(record.id)
    .bind(&record.value)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn update(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, RepositoryError> {
    let row = sqlx::query_as::<_, TokenRow>(
      "UPDATE tokens SET value = $2 WHERE id = $1 RETURNING id, value",
    )
    .bind(record.id)
    .bind(&record.value)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
    sqlx::query("DELETE FROM tokens WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  async fn get_by_id(&self, id: Uuid) -> Result<Option<RefreshTokenRecord>, RepositoryError> {
    let row = sqlx::query_as::<_, TokenRow>("SELECT id, value FROM tokens WHERE id = $1")
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;

    Ok(row.map(Into::into))
  }

  async fn delete_by_value(&self, value: &str) -> Result<(), RepositoryError> {
    sqlx::query("DELETE FROM tokens WHERE value = $1")
      .bind(value)
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  async fn has_by_value(&self, value: &str) -> Result<bool, RepositoryError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tokens WHERE value = $1)")
      .bind(value)
      .fetch_one(&self.pool)
      .await?;

    Ok(exists)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::{Account, AccountAggregate, AccountRepository, Password, Role};
  use crate::infrastructure::persistence::postgres::PostgresAccountRepository;
  use crate::infrastructure::persistence::postgres::test_support::setup_test_db;

  async fn seed_account(pool: &PgPool) -> Uuid {
    let account = Account::new("Neo", Password::new("Supperpupper123").unwrap(), Role::User).unwrap();
    let id = account.id;
    PostgresAccountRepository::new(pool.clone())
      .create(AccountAggregate::new(account))
      .await
      .unwrap();
    id
  }

  #[tokio::test]
  #[ignore = "requires a container runtime"]
  async fn test_single_record_per_account() {
    let (pool, _container) = setup_test_db().await;
    let id = seed_account(&pool).await;
    let repo = PostgresTokenRepository::new(pool);

    repo.create(RefreshTokenRecord::new(id, "first").unwrap()).await.unwrap();
    let duplicate = repo.create(RefreshTokenRecord::new(id, "second").unwrap()).await;
    assert!(matches!(duplicate, Err(RepositoryError::DuplicateKey(_))));

    repo.update(RefreshTokenRecord::new(id, "second").unwrap()).await.unwrap();
    assert!(!repo.has_by_value("first").await.unwrap());
    assert!(repo.has_by_value("second").await.unwrap());
  }

  #[tokio::test]
  #[ignore = "requires a container runtime"]
  async fn test_delete_by_value_twice() {
    let (pool, _container) = setup_test_db().await;
    let id = seed_account(&pool).await;
    let repo = PostgresTokenRepository::new(pool);

    repo.create(RefreshTokenRecord::new(id, "value").unwrap()).await.unwrap();
    repo.delete_by_value("value").await.unwrap();
    repo.delete_by_value("value").await.unwrap();

    assert!(repo.get_by_id(id).await.unwrap().is_none());
  }
}
