use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{Account, AccountAggregate, AccountRepository, Password, Role};
use crate::domain::errors::RepositoryError;

/// PostgreSQL implementation of the AccountRepository trait
pub struct PostgresAccountRepository {
  pool: PgPool,
}

impl PostgresAccountRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
  id: Uuid,
  name: String,
  password: String,
  role: String,
}

impl TryFrom<AccountRow> for Account {
  type Error = RepositoryError;

  fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
    let password = Password::from_hash(row.password)
      .map_err(|e| RepositoryError::Corrupted(format!("users.password for {}: {}", row.id, e)))?;
    let role = row
      .role
      .parse::<Role>()
      .map_err(|e| RepositoryError::Corrupted(format!("users.role for {}: {}", row.id, e)))?;

    Ok(Account::from_db(row.id, row.name, password, role))
  }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
  async fn create(&self, aggregate: AccountAggregate) -> Result<AccountAggregate, RepositoryError> {
    let account = &aggregate.account;
    let mut tx = self.pool.begin().await?;

    sqlx::query(
      r#"
            INSERT INTO users (id, name, password, role)
            VALUES ($1, $2, $3, $4)
            "#,
    )
    .bind(account.id)
    .bind(&account.name)
    .bind(account.password.as_hash())
    .bind(account.role.as_str())
    .execute(&mut *tx)
    .await?;

    if let Some(token) = &aggregate.token {
      sqlx::query("INSERT INTO tokens (id, value) VALUES ($1, $2)")
        .bind(token.id)
        .bind(&token.value)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(aggregate)
  }

  async fn update(&self, account: Account) -> Result<Account, RepositoryError> {
    let row = sqlx::query_as::<_, AccountRow>(
      r#"
            UPDATE users
            SET name = $2, password = $3, role = $4
            WHERE id = $1
            RETURNING id, name, password, role
            "#,
    )
    .bind(account.id)
    .bind(&account.name)
    .bind(account.password.as_hash())
    .bind(account.role.as_str())
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(RepositoryError::NotFound);
    }
    Ok(())
  }

  async fn get_by_id(&self, id: Uuid) -> Result<Account, RepositoryError> {
    let row = sqlx::query_as::<_, AccountRow>(
      "SELECT id, name, password, role FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn get_by_name(&self, name: &str) -> Result<Account, RepositoryError> {
    let row = sqlx::query_as::<_, AccountRow>(
      "SELECT id, name, password, role FROM users WHERE name = $1",
    )
    .bind(name)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn has_by_name(&self, name: &str) -> Result<bool, RepositoryError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE name = $1)")
      .bind(name)
      .fetch_one(&self.pool)
      .await?;

    Ok(exists)
  }
}
