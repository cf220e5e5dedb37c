use std::sync::Arc;
use uuid::Uuid;

use super::entities::{Account, AccountAggregate, RefreshTokenRecord};
use super::errors::AuthError;
use super::ports::{AccountRepository, TokenIssuer, TokenRepository};
use super::tokens::{TokenPair, TokenSubject, UnauthorizedReason};
use super::value_objects::{Password, Role};
use crate::domain::errors::RepositoryError;

/// Coordinates registration, login, refresh rotation and logout.
///
/// Holds no state between calls: everything lives in the account store and
/// the session store, which keeps at most one refresh token per account.
pub struct AuthService {
  account_repo: Arc<dyn AccountRepository>,
  token_repo: Arc<dyn TokenRepository>,
  token_issuer: Arc<dyn TokenIssuer>,
}

impl AuthService {
  pub fn new(
    account_repo: Arc<dyn AccountRepository>,
    token_repo: Arc<dyn TokenRepository>,
    token_issuer: Arc<dyn TokenIssuer>,
  ) -> Self {
    Self {
      account_repo,
      token_repo,
      token_issuer,
    }
  }

  /// Registers a new USER account and opens its first session
  pub async fn register(&self, name: &str, plaintext: &str) -> Result<(Account, TokenPair), AuthError> {
    if self.account_repo.has_by_name(name).await? {
      tracing::info!(name, "registration rejected: name taken");
      return Err(AuthError::NameAlreadyExists);
    }

    let password = Password::new(plaintext)?;
    let account = Account::new(name, password, Role::User)?;
    let tokens = self.issue(&account)?;

    let mut aggregate = AccountAggregate::new(account);
    aggregate.attach_token(tokens.refresh_token.as_str())?;

    let created = self.account_repo.create(aggregate).await.map_err(|e| match e {
      RepositoryError::DuplicateKey(_) => AuthError::NameAlreadyExists,
      other => AuthError::Repository(other),
    })?;

    tracing::info!(account_id = %created.account.id, "account registered");
    Ok((created.account, tokens))
  }

  /// Verifies credentials and replaces the account's refresh token.
  ///
  /// Unknown names and wrong passwords fail identically. Two concurrent logins
  /// for one account both succeed; the later write wins the token record and
  /// the other session's refresh token stops working.
  pub async fn login(&self, name: &str, plaintext: &str) -> Result<(Account, TokenPair), AuthError> {
    if !self.account_repo.has_by_name(name).await? {
      Password::verify_decoy(plaintext);
      return Err(AuthError::InvalidCredentials);
    }

    let account = match self.account_repo.get_by_name(name).await {
      Ok(account) => account,
      Err(RepositoryError::NotFound) => {
        Password::verify_decoy(plaintext);
        return Err(AuthError::InvalidCredentials);
      }
      Err(e) => return Err(e.into()),
    };

    if !account.password.verify(plaintext) {
      return Err(AuthError::InvalidCredentials);
    }

    let tokens = self.issue(&account)?;
    self
      .save_refresh_token(account.id, &tokens.refresh_token)
      .await?;

    tracing::info!(account_id = %account.id, "account logged in");
    Ok((account, tokens))
  }

  /// Exchanges a live refresh token for a new pair. The presented token stops
  /// being accepted once the new one is stored.
  pub async fn refresh(&self, refresh_token: &str) -> Result<(Account, TokenPair), AuthError> {
    if refresh_token.is_empty() {
      return Err(AuthError::Unauthorized(UnauthorizedReason::Missing));
    }

    let subject = self.token_issuer.verify_refresh(refresh_token)?;

    if !self.token_repo.has_by_value(refresh_token).await? {
      tracing::info!(account_id = %subject.account_id, "refresh rejected: token not active");
      return Err(AuthError::Unauthorized(UnauthorizedReason::Revoked));
    }

    let account = self
      .account_repo
      .get_by_id(subject.account_id)
      .await
      .map_err(|e| match e {
        RepositoryError::NotFound => AuthError::Internal(format!(
          "account {} referenced by a live refresh token is missing",
          subject.account_id
        )),
        other => AuthError::Repository(other),
      })?;

    let tokens = self.token_issuer.generate(subject)?;
    self
      .save_refresh_token(subject.account_id, &tokens.refresh_token)
      .await?;

    Ok((account, tokens))
  }

  /// Revokes a refresh token. Unknown or empty values are ignored.
  pub async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
    if refresh_token.is_empty() {
      return Ok(());
    }

    self.token_repo.delete_by_value(refresh_token).await?;
    Ok(())
  }

  /// Stateless role check on an access token
  pub fn authorize(&self, access_token: &str, allowed: &[Role]) -> Result<TokenSubject, AuthError> {
    if access_token.is_empty() {
      return Err(AuthError::Unauthorized(UnauthorizedReason::Missing));
    }

    let subject = self.token_issuer.verify_access(access_token)?;

    if !allowed.contains(&subject.role) {
      return Err(AuthError::Forbidden);
    }

    Ok(subject)
  }

  /// Creates the bootstrap administrator unless an account with that name exists.
  /// Returns whether an account was created.
  pub async fn seed_admin(&self, name: &str, plaintext: &str) -> Result<bool, AuthError> {
    if self.account_repo.has_by_name(name).await? {
      return Ok(false);
    }

    let password = Password::new(plaintext)?;
    let account = Account::new(name, password, Role::Admin)?;
    self
      .account_repo
      .create(AccountAggregate::new(account))
      .await?;

    tracing::info!(name, "bootstrap administrator created");
    Ok(true)
  }

  /// Creates or replaces the refresh token record of an account
  pub async fn save_refresh_token(&self, account_id: Uuid, value: &str) -> Result<RefreshTokenRecord, AuthError> {
    let record = RefreshTokenRecord::new(account_id, value)?;

    if self.token_repo.get_by_id(account_id).await?.is_some() {
      return Ok(self.token_repo.update(record).await?);
    }

    match self.token_repo.create(record.clone()).await {
      Ok(saved) => Ok(saved),
      // A concurrent login created the record first
      Err(RepositoryError::DuplicateKey(_)) => Ok(self.token_repo.update(record).await?),
      Err(e) => Err(e.into()),
    }
  }

  fn issue(&self, account: &Account) -> Result<TokenPair, AuthError> {
    let subject = TokenSubject {
      account_id: account.id,
      role: account.role,
    };
    Ok(self.token_issuer.generate(subject)?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::errors::ErrorKind;
  use crate::infrastructure::persistence::memory::{
    InMemoryAccountRepository, InMemoryStore, InMemoryTokenRepository,
  };
  use crate::infrastructure::security::{JwtTokenIssuer, TokenLifetimes};

  struct Fixture {
    service: AuthService,
    tokens: Arc<InMemoryTokenRepository>,
  }

  fn fixture() -> Fixture {
    let store = Arc::new(InMemoryStore::new());
    let accounts = Arc::new(InMemoryAccountRepository::new(store.clone()));
    let tokens = Arc::new(InMemoryTokenRepository::new(store));
    let issuer = Arc::new(JwtTokenIssuer::new(
      "test-secret",
      TokenLifetimes::new("15m", "720h"),
    ));

    Fixture {
      service: AuthService::new(accounts, tokens.clone(), issuer),
      tokens,
    }
  }

  #[tokio::test]
  async fn test_register_opens_session() {
    let f = fixture();

    let (account, tokens) = f.service.register("Neo", "Supperpupper123").await.unwrap();

    assert_eq!(account.name, "Neo");
    assert_eq!(account.role, Role::User);
    assert!(f.tokens.has_by_value(&tokens.refresh_token).await.unwrap());
    assert_ne!(tokens.access_token, tokens.refresh_token);
  }

  #[tokio::test]
  async fn test_register_same_name_twice_conflicts() {
    let f = fixture();
    f.service.register("Neo", "Supperpupper123").await.unwrap();

    let error = f.service.register("Neo", "Supperpupper123").await.unwrap_err();
    assert!(matches!(error, AuthError::NameAlreadyExists));
    assert_eq!(error.kind(), ErrorKind::Conflict);
  }

  #[tokio::test]
  async fn test_register_checks_name_before_password() {
    let f = fixture();
    f.service.register("Neo", "Supperpupper123").await.unwrap();

    let error = f.service.register("Neo", "short").await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Conflict);
  }

  #[tokio::test]
  async fn test_register_rejects_weak_password_and_short_name() {
    let f = fixture();

    let error = f.service.register("Neo", "nodigits").await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnprocessableEntity);

    let error = f.service.register("Ne", "Supperpupper123").await.unwrap_err();
    assert!(matches!(error, AuthError::Validation(_)));
    assert_eq!(error.kind(), ErrorKind::UnprocessableEntity);
  }

  #[tokio::test]
  async fn test_login_failures_are_indistinguishable() {
    let f = fixture();
    f.service.register("Neo", "Supperpupper123").await.unwrap();

    let wrong_password = f.service.login("Neo", "wrongpass").await.unwrap_err();
    let unknown_name = f.service.login("Smith", "Supperpupper123").await.unwrap_err();

    assert_eq!(wrong_password.kind(), ErrorKind::Forbidden);
    assert_eq!(wrong_password.to_string(), unknown_name.to_string());
    assert_eq!(unknown_name.kind(), ErrorKind::Forbidden);
  }

  #[tokio::test]
  async fn test_login_replaces_previous_refresh_token() {
    let f = fixture();
    let (_, first) = f.service.register("Neo", "Supperpupper123").await.unwrap();

    let (_, second) = f.service.login("Neo", "Supperpupper123").await.unwrap();

    assert!(!f.tokens.has_by_value(&first.refresh_token).await.unwrap());
    assert!(f.tokens.has_by_value(&second.refresh_token).await.unwrap());

    let error = f.service.refresh(&first.refresh_token).await.unwrap_err();
    assert!(matches!(error, AuthError::Unauthorized(UnauthorizedReason::Revoked)));
  }

  #[tokio::test]
  async fn test_refresh_rotation_is_single_use() {
    let f = fixture();
    let (account, r1) = f.service.register("Neo", "Supperpupper123").await.unwrap();

    let (refreshed, r2) = f.service.refresh(&r1.refresh_token).await.unwrap();
    assert_eq!(refreshed.id, account.id);
    assert_ne!(r1.refresh_token, r2.refresh_token);

    let reused = f.service.refresh(&r1.refresh_token).await.unwrap_err();
    assert_eq!(reused.kind(), ErrorKind::Unauthorized);

    assert!(f.service.refresh(&r2.refresh_token).await.is_ok());
  }

  #[tokio::test]
  async fn test_refresh_rejects_empty_and_malformed_tokens() {
    let f = fixture();

    let empty = f.service.refresh("").await.unwrap_err();
    assert!(matches!(empty, AuthError::Unauthorized(UnauthorizedReason::Missing)));

    let garbage = f.service.refresh("not-a-token").await.unwrap_err();
    assert!(matches!(garbage, AuthError::Unauthorized(UnauthorizedReason::BadToken)));
  }

  #[tokio::test]
  async fn test_logout_is_idempotent_and_revokes() {
    let f = fixture();
    let (_, tokens) = f.service.register("Neo", "Supperpupper123").await.unwrap();

    f.service.logout(&tokens.refresh_token).await.unwrap();
    f.service.logout(&tokens.refresh_token).await.unwrap();
    f.service.logout("").await.unwrap();

    let error = f.service.refresh(&tokens.refresh_token).await.unwrap_err();
    assert!(matches!(error, AuthError::Unauthorized(UnauthorizedReason::Revoked)));
  }

  #[tokio::test]
  async fn test_authorize_checks_role() {
    let f = fixture();
    f.service.seed_admin("Admin", "Adminadmin41").await.unwrap();
    let (_, admin) = f.service.login("Admin", "Adminadmin41").await.unwrap();
    let (_, user) = f.service.register("Neo", "Supperpupper123").await.unwrap();

    let subject = f.service.authorize(&admin.access_token, &[Role::Admin]).unwrap();
    assert_eq!(subject.role, Role::Admin);

    let error = f.service.authorize(&user.access_token, &[Role::Admin]).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Forbidden);

    let error = f.service.authorize("", &[Role::Admin]).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Unauthorized);
  }

  #[tokio::test]
  async fn test_revoked_refresh_token_grants_no_access() {
    let f = fixture();
    f.service.seed_admin("Admin", "Adminadmin41").await.unwrap();
    let (_, admin) = f.service.login("Admin", "Adminadmin41").await.unwrap();

    f.service.logout(&admin.refresh_token).await.unwrap();

    let error = f.service.authorize(&admin.refresh_token, &[Role::Admin]).unwrap_err();
    assert!(matches!(error, AuthError::Unauthorized(UnauthorizedReason::BadToken)));

    let error = f.service.refresh(&admin.access_token).await.unwrap_err();
    assert!(matches!(error, AuthError::Unauthorized(UnauthorizedReason::BadToken)));
  }

  #[tokio::test]
  async fn test_seed_admin_runs_once() {
    let f = fixture();

    assert!(f.service.seed_admin("Admin", "Adminadmin41").await.unwrap());
    assert!(!f.service.seed_admin("Admin", "Adminadmin41").await.unwrap());
  }

  #[tokio::test]
  async fn test_save_refresh_token_overwrites_in_place() {
    let f = fixture();
    let (account, _) = f.service.register("Neo", "Supperpupper123").await.unwrap();

    f.service.save_refresh_token(account.id, "second").await.unwrap();
    f.service.save_refresh_token(account.id, "third").await.unwrap();

    let record = f.tokens.get_by_id(account.id).await.unwrap().unwrap();
    assert_eq!(record.value, "third");
    assert!(!f.tokens.has_by_value("second").await.unwrap());
  }
}
